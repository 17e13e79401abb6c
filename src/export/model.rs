// src/export/model.rs

use serde::Serialize;
use std::fmt::{self, Write as _};

/// One heading of the exported logbook.
///
/// `depth` is the number of heading stars: 1 for the session, `level + 2`
/// for splits. `start`/`end`/`duration` are already formatted.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub depth: usize,
    pub name: String,
    pub start: String,
    pub end: String,
    pub duration: String,
}

impl LogEntry {
    pub fn stars(&self) -> String {
        "*".repeat(self.depth)
    }

    pub fn clock_line(&self) -> String {
        format!(
            "CLOCK: [{}]--[{}] => {}",
            self.start, self.end, self.duration
        )
    }

    /// Org-mode text, optionally wrapping the clock line in a `:LOGBOOK:`
    /// drawer. Always ends with a newline.
    pub fn to_org(&self, drawer: bool) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "{} {}", self.stars(), self.name);
        if drawer {
            let _ = writeln!(out, "  :LOGBOOK:");
            let _ = writeln!(out, "  {}", self.clock_line());
            let _ = writeln!(out, "  :END:");
            out.push('\n');
        } else {
            let _ = writeln!(out, "  {}", self.clock_line());
        }
        out
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_org(false))
    }
}
