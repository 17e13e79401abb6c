//! The interactive polling loop.
//!
//! Each tick waits up to `tick` for one key, applies the matching command to
//! the tree synchronously, then lets the renderer paint either a full frame
//! (after a structural change) or just the live rows. Text prompts block the
//! loop until answered.

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::keymap::{Command, Key};
use crate::core::split_tree::{Outcome, Placement, SplitTree};
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportOptions, ExportOutcome, LogSink};
use crate::ui::input::Input;
use crate::ui::renderer::Renderer;
use crate::ui::surface::Surface;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<C: Clock, I: Input, S: Surface, K: LogSink> {
    tree: SplitTree<C>,
    renderer: Renderer,
    input: I,
    surface: S,
    sink: K,
    export: ExportOptions,
    tick: Duration,
}

impl<C: Clock, I: Input, S: Surface, K: LogSink> App<C, I, S, K> {
    pub fn new(cfg: &Config, clock: C, input: I, surface: S, sink: K) -> Self {
        Self {
            tree: SplitTree::new(clock, cfg.max_splits),
            renderer: Renderer::new(cfg.indent_width),
            input,
            surface,
            sink,
            export: ExportOptions::from(cfg),
            tick: Duration::from_millis(cfg.tick_ms),
        }
    }

    pub fn tree(&self) -> &SplitTree<C> {
        &self.tree
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Run until a quit command. The first frame is always a full one.
    pub fn run(&mut self) -> AppResult<()> {
        self.renderer.mark_dirty();
        self.renderer.draw(&self.tree, &mut self.surface)?;
        while self.step()? == Flow::Continue {}
        Ok(())
    }

    /// One tick: poll, apply at most one command, redraw.
    pub fn step(&mut self) -> AppResult<Flow> {
        if let Some(key) = self.input.poll_key(self.tick)?
            && self.handle_key(key)? == Flow::Quit
        {
            return Ok(Flow::Quit);
        }
        self.renderer.draw(&self.tree, &mut self.surface)?;
        Ok(Flow::Continue)
    }

    pub fn handle_key(&mut self, key: Key) -> AppResult<Flow> {
        match Command::from_key(key) {
            Some(cmd) => self.handle(cmd),
            None => {
                debug!(?key, "unbound key");
                Ok(Flow::Continue)
            }
        }
    }

    pub fn handle(&mut self, cmd: Command) -> AppResult<Flow> {
        let outcome = match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::ToggleSession => {
                if self.tree.is_running() {
                    self.tree.stop_session()
                } else {
                    let goal = self.ask("Enter main goal")?;
                    self.tree.start_session(&goal)
                }
            }
            Command::Reset => {
                self.renderer.clear_status();
                self.tree.reset_session()
            }
            Command::OpenSubgoal => self.open(Placement::Contextual, "Enter subgoal name")?,
            Command::OpenNested => self.open(Placement::Nested, "Enter nested subgoal name")?,
            Command::CloseActive => self.tree.close_active(),
            Command::Ascend => self.tree.ascend(),
            Command::Redraw => Outcome::Changed,
            Command::SaveLog => {
                self.save_log();
                Outcome::Ignored
            }
        };
        if outcome.is_changed() {
            self.renderer.mark_dirty();
        }
        Ok(Flow::Continue)
    }

    fn open(&mut self, placement: Placement, label: &str) -> AppResult<Outcome> {
        if !self.tree.can_open(placement) {
            debug!(?placement, "open ignored");
            return Ok(Outcome::Ignored);
        }
        let name = self.ask(label)?;
        Ok(self.tree.open_split(&name, placement))
    }

    /// Prompts write over the frame, so a full redraw always follows.
    fn ask(&mut self, label: &str) -> AppResult<String> {
        self.renderer.mark_dirty();
        self.input.prompt(label)
    }

    /// Sink failures go to the status line; the session stays untouched so
    /// the save can be retried.
    fn save_log(&mut self) {
        match ExportLogic::export(&self.tree, &mut self.sink, &self.export) {
            Ok(ExportOutcome::Written { entries }) => {
                self.renderer.set_status(format!(
                    "Log saved to {} ({} entries)",
                    self.sink.location(),
                    entries
                ));
            }
            Ok(ExportOutcome::Skipped) => {}
            Err(e) => {
                warn!(error = %e, "save failed");
                self.renderer.set_status(format!("Save failed: {e}"));
            }
        }
    }
}
