//! Character-grid rendering
//!
//! Every board column is drawn two characters wide.

pub mod glyphs;
pub mod grid;

pub use grid::{ViewMode, render};
