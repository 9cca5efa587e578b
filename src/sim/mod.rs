//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, integer velocities
//! - Stable iteration order (block row is left to right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{
    WallContact, angled_velocity, bounce_off_block, impact_offset, resolve_paddle, resolve_walls,
};
pub use rect::{Axis, Rect, overlaps, penetration, primary_axis};
pub use score::Scoreboard;
pub use state::{
    Ball, Block, BlockRow, BlockView, GameEvent, GamePhase, GameState, Paddle, Snapshot, Wall,
};
pub use tick::{TickInput, tick};
