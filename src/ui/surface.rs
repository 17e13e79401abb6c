//! Character-grid output surfaces.
//!
//! A surface only paints: it moves a cursor, writes text at it and clears.
//! Deciding what to redraw is the renderer's job.

use crate::errors::{AppError, AppResult};
use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{QueueableCommand, queue};
use std::io::Write;
use unicode_width::UnicodeWidthChar;

pub trait Surface {
    /// (columns, rows)
    fn size(&self) -> (u16, u16);
    fn clear(&mut self) -> AppResult<()>;
    fn move_to(&mut self, x: u16, y: u16) -> AppResult<()>;
    fn write(&mut self, text: &str) -> AppResult<()>;
    fn flush(&mut self) -> AppResult<()>;
}

/// Surface over a crossterm-capable writer (normally stdout in raw mode).
pub struct TerminalSurface<W: Write> {
    out: W,
    size: (u16, u16),
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        let size = terminal::size().unwrap_or((80, 24));
        Self { out, size }
    }

    /// Re-query the terminal size, e.g. before a full redraw.
    pub fn refresh_size(&mut self) {
        if let Ok(size) = terminal::size() {
            self.size = size;
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn clear(&mut self) -> AppResult<()> {
        self.refresh_size();
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> AppResult<()> {
        self.out.queue(MoveTo(x, y))?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> AppResult<()> {
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> AppResult<()> {
        self.out
            .flush()
            .map_err(|e| AppError::Terminal(format!("flush failed: {e}")))
    }
}

/// In-memory grid. Writes overwrite cells from the cursor onwards and are
/// cut at the right edge; there is no wrapping.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    cols: u16,
    rows: u16,
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
    pub clears: usize,
    pub writes: usize,
}

impl MemorySurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![' '; cols as usize]; rows as usize],
            cursor: (0, 0),
            clears: 0,
            writes: 0,
        }
    }

    /// Row `y` with trailing blanks removed.
    pub fn line(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.rows).map(|y| self.line(y)).collect()
    }

    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }

    pub fn reset_counters(&mut self) {
        self.clears = 0;
        self.writes = 0;
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> AppResult<()> {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.cursor = (0, 0);
        self.clears += 1;
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> AppResult<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn write(&mut self, text: &str) -> AppResult<()> {
        self.writes += 1;
        let (mut x, y) = self.cursor;
        let Some(row) = self.cells.get_mut(y as usize) else {
            return Ok(());
        };
        for ch in text.chars() {
            if ch == '\n' {
                break;
            }
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x + w > self.cols {
                break;
            }
            row[x as usize] = ch;
            // wide glyphs occupy a second, blank cell
            for extra in 1..w {
                row[(x + extra) as usize] = ' ';
            }
            x += w;
        }
        self.cursor = (x, y);
        Ok(())
    }

    fn flush(&mut self) -> AppResult<()> {
        Ok(())
    }
}
