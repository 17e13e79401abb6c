//! Keyboard input sources.

use crate::core::keymap::Key;
use crate::errors::{AppError, AppResult};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

pub trait Input {
    /// Wait at most `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> AppResult<Option<Key>>;

    /// Ask for a line of text. Blocks until the user answers; the answer is
    /// trimmed.
    fn prompt(&mut self, label: &str) -> AppResult<String>;
}

/// Raw-mode terminal keyboard. Prompts drop back to cooked mode for the
/// duration of the line read.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl Input for TerminalInput {
    fn poll_key(&mut self, timeout: Duration) -> AppResult<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        let mapped = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Interrupt)
            }
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Esc => Some(Key::Esc),
            _ => None,
        };
        Ok(mapped)
    }

    fn prompt(&mut self, label: &str) -> AppResult<String> {
        disable_raw_mode()?;
        let answer = read_answer(label);
        enable_raw_mode()?;
        answer
    }
}

fn read_answer(label: &str) -> AppResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "\n{label}: ")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Pre-recorded keys and prompt answers.
///
/// Running out of keys is an error so a forgotten quit cannot spin forever.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    keys: VecDeque<Key>,
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every char of `keys` as a key press.
    pub fn keys(mut self, keys: &str) -> Self {
        self.keys.extend(keys.chars().map(Key::Char));
        self
    }

    pub fn key(mut self, key: Key) -> Self {
        self.keys.push_back(key);
        self
    }

    pub fn answer(mut self, text: &str) -> Self {
        self.answers.push_back(text.to_string());
        self
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Input for ScriptedInput {
    fn poll_key(&mut self, _timeout: Duration) -> AppResult<Option<Key>> {
        self.keys
            .pop_front()
            .map(Some)
            .ok_or_else(|| AppError::Other("input script exhausted".into()))
    }

    fn prompt(&mut self, label: &str) -> AppResult<String> {
        self.prompts.push(label.to_string());
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| AppError::Other(format!("no scripted answer for prompt '{label}'")))?;
        Ok(answer.trim().to_string())
    }
}
