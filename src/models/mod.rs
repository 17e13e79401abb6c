pub mod session;
pub mod split;

pub use session::Session;
pub use split::{Interval, SplitId, SplitNode};
