//! Level records
//!
//! A level is the authoritative brick layout; the live board is derived
//! from it, never written back into it.

use std::collections::HashSet;

use super::state::{Board, Brick};
use crate::consts::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_LEVEL_SIZE, MIN_LEVEL_HEIGHT, PADDLE_WIDTH,
};
use crate::error::{GameError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Record name (also the storage key)
    pub filename: String,
    /// Logical width; the board is `2 * width + 1` columns
    pub width: i32,
    /// Rows
    pub height: i32,
    pub initial_level: u32,
    /// Bricks in stored order
    pub bricks: Vec<Brick>,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            filename: String::new(),
            width: DEFAULT_BOARD_WIDTH / 2,
            height: DEFAULT_BOARD_HEIGHT,
            initial_level: 1,
            bricks: Vec::new(),
        }
    }
}

impl Level {
    pub fn empty(filename: &str, width: i32, height: i32, initial_level: u32) -> Self {
        Self {
            filename: filename.to_string(),
            width,
            height,
            initial_level,
            bricks: Vec::new(),
        }
    }

    pub fn board(&self) -> Board {
        Board::for_level(self.width, self.height)
    }

    /// Check dimensions and the one-brick-per-cell rule.
    /// The board must fit the paddle and stay small enough to draw.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LEVEL_SIZE).contains(&self.width)
            || !(MIN_LEVEL_HEIGHT..=MAX_LEVEL_SIZE).contains(&self.height)
        {
            return Err(GameError::invalid(format!(
                "Level size {}x{} is out of range!",
                self.width, self.height
            )));
        }
        if self.board().width < PADDLE_WIDTH {
            return Err(GameError::invalid("Level is too narrow for the paddle!"));
        }
        if self.initial_level < 1 {
            return Err(GameError::invalid("Initial level must be at least 1!"));
        }
        let mut seen = HashSet::with_capacity(self.bricks.len());
        for brick in &self.bricks {
            if brick.is_empty() {
                return Err(GameError::invalid("Levels cannot store empty bricks!"));
            }
            if !seen.insert((brick.x, brick.y)) {
                return Err(GameError::invalid(format!(
                    "Duplicate brick at ({}, {})!",
                    brick.x, brick.y
                )));
            }
        }
        Ok(())
    }
}
