//! Platform abstraction layer
//!
//! Everything the game needs from the outside world:
//! - Time/ticks
//! - Input events
//! - Text output
//! - Storage (files under the data directory)

pub mod display;
pub mod input;
#[cfg(test)]
pub mod script;
pub mod storage;
pub mod terminal;
pub mod time;

pub use display::DisplaySink;
pub use input::InputSource;
pub use storage::{DirStorage, MemoryStorage, Storage};
pub use terminal::TerminalConsole;
pub use time::{ManualClock, SleepScheduler, TickScheduler, tick_interval};

/// A terminal-like device: keyboard in, text out
pub trait Console: InputSource + DisplaySink {}

impl<T: InputSource + DisplaySink> Console for T {}
