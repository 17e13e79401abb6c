//! Frame drawing for the interactive stopwatch.
//!
//! Structural changes (new split, close, ascend, session start/stop/reset)
//! mark the renderer dirty and the next `draw` repaints the whole frame.
//! Otherwise only the time line and the active split's row are repainted,
//! so a tick costs the same regardless of how many splits exist.

use crate::core::clock::Clock;
use crate::core::split_tree::SplitTree;
use crate::errors::AppResult;
use crate::models::SplitId;
use crate::ui::surface::Surface;
use crate::utils::formatting::clip_to_width;
use crate::utils::time::{PLACEHOLDER, format_hms};

pub const TITLE: &str = "=== rSplitwatch ===";
pub const CONTROLS: &str = "Controls: s/start-stop r/reset g/start-subgoal n/nested-subgoal h/stop u/up d/redraw t/save-log q/quit";

pub const GOAL_ROW: u16 = 1;
pub const TIME_ROW: u16 = 2;
pub const SPLITS_HEADER_ROW: u16 = 3;
pub const FIRST_SPLIT_ROW: u16 = 4;

/// What a call to `draw` painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Full,
    Partial,
    Idle,
}

#[derive(Debug)]
pub struct Renderer {
    dirty: bool,
    indent_width: usize,
    status: Option<String>,
}

impl Renderer {
    pub fn new(indent_width: usize) -> Self {
        Self {
            dirty: true,
            indent_width,
            status: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Message shown under the controls on the next full frame.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
        self.dirty = true;
    }

    pub fn clear_status(&mut self) {
        if self.status.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn draw<C: Clock, S: Surface>(
        &mut self,
        tree: &SplitTree<C>,
        surface: &mut S,
    ) -> AppResult<Frame> {
        if self.dirty {
            self.draw_full(tree, surface)?;
            self.dirty = false;
            return Ok(Frame::Full);
        }
        if tree.is_running() {
            self.draw_live(tree, surface)?;
            return Ok(Frame::Partial);
        }
        Ok(Frame::Idle)
    }

    fn draw_full<C: Clock, S: Surface>(
        &self,
        tree: &SplitTree<C>,
        surface: &mut S,
    ) -> AppResult<()> {
        surface.clear()?;

        let goal = if tree.goal().is_empty() {
            "(none)"
        } else {
            tree.goal()
        };
        put(surface, 0, 0, TITLE)?;
        put(surface, 0, GOAL_ROW, &format!("Goal  : {goal}"))?;
        put(surface, 0, TIME_ROW, &time_line(tree))?;
        put(
            surface,
            0,
            SPLITS_HEADER_ROW,
            &format!("Subgoals ({}/{}):", tree.len(), tree.capacity()),
        )?;

        for (id, node) in tree.iter() {
            let x = (node.level * self.indent_width).min(u16::MAX as usize) as u16;
            put(surface, x, split_row(id), &self.row_text(tree, id))?;
        }

        let mut y = FIRST_SPLIT_ROW.saturating_add(tree.len() as u16).saturating_add(1);
        put(surface, 0, y, CONTROLS)?;
        if let Some(status) = &self.status {
            y = y.saturating_add(1);
            put(surface, 0, y, status)?;
        }

        surface.flush()
    }

    fn draw_live<C: Clock, S: Surface>(
        &self,
        tree: &SplitTree<C>,
        surface: &mut S,
    ) -> AppResult<()> {
        put_padded(surface, 0, TIME_ROW, &time_line(tree))?;
        if let Some(id) = tree.active()
            && let Some(node) = tree.node(id)
        {
            let x = (node.level * self.indent_width).min(u16::MAX as usize) as u16;
            put_padded(surface, x, split_row(id), &self.row_text(tree, id))?;
        }
        surface.flush()
    }

    /// Text of one split row, without indentation.
    ///
    /// Closed rows show start, end and duration. Open rows show placeholders
    /// for start and end; the active one carries its live duration.
    pub fn row_text<C: Clock>(&self, tree: &SplitTree<C>, id: SplitId) -> String {
        let Some(node) = tree.node(id) else {
            return String::new();
        };
        let (start, end) = match node.end() {
            Some(end) => (format_hms(node.start), format_hms(end)),
            None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
        };
        let duration = tree
            .node_duration(id)
            .map(format_hms)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        format!(
            "{:2}) {} -> {} = {} {}",
            id.index() + 1,
            start,
            end,
            duration,
            node.name
        )
    }
}

fn time_line<C: Clock>(tree: &SplitTree<C>) -> String {
    format!("Time  : {}", format_hms(tree.current_elapsed()))
}

fn split_row(id: SplitId) -> u16 {
    FIRST_SPLIT_ROW.saturating_add(id.index().min(u16::MAX as usize) as u16)
}

/// Write `text` at (x, y), clipped to the surface. Off-screen rows are skipped.
fn put<S: Surface>(surface: &mut S, x: u16, y: u16, text: &str) -> AppResult<()> {
    let (cols, rows) = surface.size();
    if y >= rows || x >= cols {
        return Ok(());
    }
    surface.move_to(x, y)?;
    surface.write(&clip_to_width(text, (cols - x) as usize))
}

/// Like `put`, but blanks the rest of the row so shorter text leaves no
/// residue from the previous paint.
fn put_padded<S: Surface>(surface: &mut S, x: u16, y: u16, text: &str) -> AppResult<()> {
    let (cols, rows) = surface.size();
    if y >= rows || x >= cols {
        return Ok(());
    }
    let room = (cols - x) as usize;
    let clipped = clip_to_width(text, room);
    let used = unicode_width::UnicodeWidthStr::width(clipped.as_str());
    surface.move_to(x, y)?;
    surface.write(&format!("{clipped}{}", " ".repeat(room.saturating_sub(used))))
}
