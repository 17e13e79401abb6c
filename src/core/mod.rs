pub mod app;
pub mod clock;
pub mod keymap;
pub mod split_tree;

pub use app::{App, Flow};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use keymap::{Command, Key};
pub use split_tree::{Outcome, Placement, SplitTree};
