pub mod formatting;
pub mod path;
pub mod time;

pub use time::format_hms;
