//! ASCII Breakout - a terminal paddle-and-ball game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, collisions, game state)
//! - `renderer`: Character-grid projection of the game state
//! - `app`: Menu / play / editor state machine
//! - `platform`: Terminal, clock and filesystem abstraction
//! - `persistence`: Plain-text config and level records

pub mod app;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use highscores::HighScores;
pub use settings::Config;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const DEFAULT_FPS: u32 = 50;
    /// Input poll interval while paused (ms)
    pub const PAUSED_POLL_MS: u64 = 50;

    /// Board dimensions before any level is loaded (columns, rows)
    pub const DEFAULT_BOARD_WIDTH: i32 = 19;
    pub const DEFAULT_BOARD_HEIGHT: i32 = 18;

    /// Paddle width in board columns
    pub const PADDLE_WIDTH: i32 = 7;
    pub const INITIAL_LIVES: i32 = 3;
    /// Levels beyond this one end the run in victory
    pub const LEVEL_CAP: u32 = 3;

    /// Side length of a brick's hit box, measured from its corner.
    /// Slightly larger than a cell so corner grazes register.
    pub const HIT_TOLERANCE: f64 = 1.3;
    /// Horizontal deflection gain for paddle bounces
    pub const PADDLE_DEFLECTION: f64 = 1.5;
    /// Config ball speed is scaled by this / fps to get cells per tick
    pub const SPEED_SCALE: f64 = 5.0;
    /// Launch direction choices (fraction of speed on the x axis)
    pub const LAUNCH_SPREAD: f64 = 0.5;

    pub const SCORE_NORMAL: u64 = 10;
    pub const SCORE_DURABLE: u64 = 5;
    pub const DURABLE_DEFAULT_DURABILITY: i32 = 2;

    /// Bottom rows kept clear of bricks in the editor
    pub const EDITOR_RESERVED_ROWS: i32 = 3;
    /// Allowed level width/height in the editor
    pub const EDITOR_MIN_SIZE: i32 = 8;
    pub const EDITOR_MAX_SIZE: i32 = 20;

    /// Largest width or height a level record may declare
    pub const MAX_LEVEL_SIZE: i32 = 100;
    /// Fewest rows a level may have
    pub const MIN_LEVEL_HEIGHT: i32 = 3;

    /// Level loaded at startup and after a defeat
    pub const FIRST_LEVEL: u32 = 1;
}

/// Name of the stored level for a level number
pub fn level_name(level: u32) -> String {
    format!("Level_{level}")
}
