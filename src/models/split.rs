use serde::Serialize;
use std::fmt;

/// Stable handle into the split arena. Handles are creation indices and are
/// never reused while the tree lives; a reset invalidates all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SplitId(pub(crate) usize);

impl SplitId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Interval {
    Open,
    Closed { end: f64 },
}

/// One timed subgoal. `start`/`end` are session-relative seconds.
#[derive(Debug, Clone, Serialize)]
pub struct SplitNode {
    pub name: String,
    pub start: f64,
    pub interval: Interval,
    pub parent: Option<SplitId>,
    pub level: usize,
}

impl SplitNode {
    pub fn is_open(&self) -> bool {
        matches!(self.interval, Interval::Open)
    }

    pub fn end(&self) -> Option<f64> {
        match self.interval {
            Interval::Open => None,
            Interval::Closed { end } => Some(end),
        }
    }

    /// Finalized duration, `None` while the interval is open.
    pub fn duration(&self) -> Option<f64> {
        self.end().map(|end| (end - self.start).max(0.0))
    }
}
