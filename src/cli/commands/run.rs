use crate::config::Config;
use crate::core::app::App;
use crate::core::clock::MonotonicClock;
use crate::errors::AppResult;
use crate::export::FileSink;
use crate::ui::input::TerminalInput;
use crate::ui::surface::TerminalSurface;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{self, Stdout};
use tracing::info;

/// Raw mode + alternate screen for as long as it lives. Restores the
/// terminal on drop, error paths included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> AppResult<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Handle the `run` command: the interactive stopwatch.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let log_path = cfg.log_path();
    info!(log_file = %log_path.display(), max_splits = cfg.max_splits, "stopwatch starting");

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let mut app = App::new(
        cfg,
        MonotonicClock::new(),
        TerminalInput::new(),
        TerminalSurface::new(stdout),
        FileSink::new(log_path),
    );
    let result = app.run();

    info!("stopwatch exiting");
    result
}
