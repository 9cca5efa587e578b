//! Brick Pong - a single-screen brick breaker / Pong hybrid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, game state)
//! - `renderer`: Draw lists and GPU-ready vertex export
//! - `platform`: Terminal input and rasterization
//! - `settings`: Startup configuration and color palette

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig, Palette, PaddleBounce};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, velocities are units per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen dimensions (logical pixels, top-left origin, y down)
    pub const SCREEN_WIDTH: i32 = 665;
    pub const SCREEN_HEIGHT: i32 = 480;
    /// Largest accepted screen side; keeps every position sum inside i32
    pub const MAX_SCREEN_SIZE: i32 = 16_384;

    /// Speeds (units per tick)
    pub const BALL_SPEED: i32 = 4;
    pub const PADDLE_SPEED: i32 = 6;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 100;
    pub const PADDLE_HEIGHT: i32 = 15;
    /// Distance from the paddle's top edge to the bottom of the screen
    pub const PADDLE_Y_OFFSET: i32 = 30;

    /// Ball defaults (square)
    pub const BALL_SIZE: i32 = 15;

    /// Block row defaults
    pub const BLOCK_COUNT: usize = 10;
    pub const BLOCK_WIDTH: i32 = 50;
    pub const BLOCK_HEIGHT: i32 = 15;
    pub const BLOCK_GAP: i32 = 15;
    pub const BLOCK_TOP: i32 = 10;
    pub const BLOCK_HIT_CAPACITY: u32 = 3;
    /// Height lost per hit (cosmetic)
    pub const BLOCK_SHRINK: i32 = 5;
    pub const BLOCK_MIN_HEIGHT: i32 = 1;

    /// Maximum paddle deflection from vertical (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f64 = 60.0;

    /// Glyph width used to center text (7x13 bitmap font)
    pub const GLYPH_WIDTH: i32 = 7;
    pub const GLYPH_HEIGHT: i32 = 13;
}
