pub mod input;
pub mod messages;
pub mod renderer;
pub mod surface;

pub use input::{Input, ScriptedInput, TerminalInput};
pub use renderer::{Frame, Renderer};
pub use surface::{MemorySurface, Surface, TerminalSurface};
