// src/export/logic.rs

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::split_tree::SplitTree;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::model::LogEntry;
use crate::export::sink::LogSink;
use crate::utils::time::{format_calendar_duration, format_hms};
use tracing::{debug, info, warn};

/// Formatting knobs for an export, usually derived from `Config`.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub timestamp_format: String,
    pub logbook_drawer: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Org,
            timestamp_format: crate::config::default_timestamp_format(),
            logbook_drawer: true,
        }
    }
}

impl From<&Config> for ExportOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            format: cfg.export_format,
            timestamp_format: cfg.timestamp_format.clone(),
            logbook_drawer: cfg.logbook_drawer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Session still running or without a goal: nothing was written.
    Skipped,
    /// `entries` headings were appended (session heading included).
    Written { entries: usize },
}

/// High level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the logbook for a stopped session: the session heading first,
    /// then every closed split in creation order. Open splits are skipped.
    ///
    /// Returns `None` when there is nothing to export.
    pub fn build_entries<C: Clock>(
        tree: &SplitTree<C>,
        options: &ExportOptions,
    ) -> Option<Vec<LogEntry>> {
        let session = tree.session();
        if session.is_running() || !session.has_goal() {
            return None;
        }

        let end = tree.clock().wall_clock_now();
        // a session with a goal always carries a start stamp
        let start = session.log_start().unwrap_or(end);

        let mut entries = Vec::with_capacity(tree.len() + 1);
        entries.push(LogEntry {
            depth: 1,
            name: session.goal.clone(),
            start: start.format(&options.timestamp_format).to_string(),
            end: end.format(&options.timestamp_format).to_string(),
            duration: format_calendar_duration(start, end),
        });

        for node in tree.nodes() {
            let (Some(end), Some(duration)) = (node.end(), node.duration()) else {
                continue;
            };
            entries.push(LogEntry {
                depth: node.level + 2,
                name: node.name.clone(),
                start: format_hms(node.start),
                end: format_hms(end),
                duration: format_hms(duration),
            });
        }

        Some(entries)
    }

    /// Render the entries in the requested format.
    pub fn render(entries: &[LogEntry], options: &ExportOptions) -> AppResult<String> {
        match options.format {
            ExportFormat::Org => Ok(entries
                .iter()
                .map(|e| e.to_org(options.logbook_drawer))
                .collect()),
            ExportFormat::Json => {
                let mut line = serde_json::to_string(entries)
                    .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
                line.push('\n');
                Ok(line)
            }
        }
    }

    /// Append the session logbook to `sink` in a single write.
    pub fn export<C: Clock, S: LogSink + ?Sized>(
        tree: &SplitTree<C>,
        sink: &mut S,
        options: &ExportOptions,
    ) -> AppResult<ExportOutcome> {
        let Some(entries) = Self::build_entries(tree, options) else {
            debug!("export skipped: session running or without goal");
            return Ok(ExportOutcome::Skipped);
        };

        let text = Self::render(&entries, options)?;

        if let Err(e) = sink.append(&text) {
            warn!(location = %sink.location(), error = %e, "export failed");
            return Err(e);
        }

        info!(
            location = %sink.location(),
            entries = entries.len(),
            format = options.format.as_str(),
            "logbook exported"
        );
        Ok(ExportOutcome::Written {
            entries: entries.len(),
        })
    }
}
