// src/export/mod.rs

pub mod logic;
mod model;
pub mod sink;

pub use logic::{ExportLogic, ExportOptions, ExportOutcome};
pub use model::LogEntry;
pub use sink::{FileSink, LogSink, MemorySink};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Org,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Org => "org",
            ExportFormat::Json => "json",
        }
    }
}
