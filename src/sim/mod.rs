//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Fixed tick only
//! - Seeded RNG only (held by the session)
//! - Bricks resolved in stored order
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{BrickContact, CollisionEvent, CollisionResult, resolve};
pub use level::Level;
pub use state::{
    Ball, Board, Brick, BrickKind, BrickStrike, GamePhase, Outcome, Paddle, Session,
};
pub use tick::{TickInput, advance_level, tick};
