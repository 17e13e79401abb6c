//! Formatting utilities used for terminal output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` so that its display width does not exceed `width` columns.
/// Wide glyphs that would straddle the edge are dropped entirely.
pub fn clip_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
