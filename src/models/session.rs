use chrono::{DateTime, Local};

/// The outer timed activity, bound to a single goal label.
///
/// An empty `goal` means "no session". `run_start` only exists while the
/// session is running, so a stopped session cannot carry a stale start.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub goal: String,
    pub(crate) elapsed_before: f64,
    pub(crate) run_start: Option<f64>,
    pub(crate) log_start: Option<DateTime<Local>>,
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.run_start.is_some()
    }

    pub fn has_goal(&self) -> bool {
        !self.goal.is_empty()
    }

    /// Seconds accumulated by earlier start/stop cycles.
    pub fn elapsed_before_current_run(&self) -> f64 {
        self.elapsed_before
    }

    pub fn current_run_start(&self) -> Option<f64> {
        self.run_start
    }

    /// Calendar time captured when the session started.
    pub fn log_start(&self) -> Option<DateTime<Local>> {
        self.log_start
    }

    pub(crate) fn elapsed_at(&self, now: f64) -> f64 {
        match self.run_start {
            Some(start) => self.elapsed_before + (now - start).max(0.0),
            None => self.elapsed_before,
        }
    }
}
