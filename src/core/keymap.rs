//! Key bindings of the interactive stopwatch.

/// A key press as seen by the app, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Esc,
    /// Ctrl-C while in raw mode.
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new session when stopped, stop the running one otherwise.
    ToggleSession,
    Reset,
    /// Open a split under the active one, or at top level.
    OpenSubgoal,
    /// Open a split strictly under the active one.
    OpenNested,
    CloseActive,
    Ascend,
    Redraw,
    SaveLog,
    Quit,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Esc | Key::Interrupt => Some(Command::Quit),
            Key::Char(c) => match c.to_ascii_lowercase() {
                's' => Some(Command::ToggleSession),
                'r' => Some(Command::Reset),
                'g' => Some(Command::OpenSubgoal),
                'n' => Some(Command::OpenNested),
                'h' => Some(Command::CloseActive),
                'u' => Some(Command::Ascend),
                'd' => Some(Command::Redraw),
                't' => Some(Command::SaveLog),
                'q' => Some(Command::Quit),
                _ => None,
            },
        }
    }
}
