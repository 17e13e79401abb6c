// src/export/sink.rs

use crate::errors::{AppError, AppResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only destination of exported logbooks.
///
/// One call to `append` is one open-append-close cycle; nothing is buffered
/// between calls and prior content is never rewritten.
pub trait LogSink {
    fn append(&mut self, text: &str) -> AppResult<()>;

    /// Human-readable location, used in status messages.
    fn location(&self) -> String;
}

/// Sink backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&mut self, text: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AppError::Sink {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory sink, handy for previews and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub contents: String,
    pub appends: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, text: &str) -> AppResult<()> {
        self.contents.push_str(text);
        self.appends += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn append(&mut self, text: &str) -> AppResult<()> {
        (**self).append(text)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
