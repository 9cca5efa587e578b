//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Input events (key state per tick)
//! - Terminal setup/teardown
//! - Rasterizing draw lists onto the cell grid

pub mod input;
pub mod terminal;

pub use input::{Command, KeyTracker};
pub use terminal::{Tui, rasterize};
