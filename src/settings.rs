//! Game configuration record
//!
//! Persisted as a plain-text record through `persistence`; replaced as a
//! whole, never edited in place.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::SPEED_SCALE;
use crate::error::{GameError, Result};

/// Seed value meaning "seed from the OS"
pub const TIME_SEEDED: i64 = -1;

/// User-editable game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Record name (also the storage key)
    pub filename: String,
    /// Ball speed in config units (1-10 in the prompt)
    pub ball_speed: f64,
    /// RNG seed, or `TIME_SEEDED`
    pub random_seed: i64,
    /// Level number a new game starts at
    pub initial_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: "default".to_string(),
            ball_speed: 5.0,
            random_seed: TIME_SEEDED,
            initial_level: 1,
        }
    }
}

impl Config {
    /// Check the field invariants
    pub fn validate(&self) -> Result<()> {
        if self.filename.trim().is_empty() || self.filename.contains(char::is_whitespace) {
            return Err(GameError::invalid("Config name must be a single word!"));
        }
        if !(self.ball_speed.is_finite() && self.ball_speed > 0.0) {
            return Err(GameError::invalid("Ball speed must be positive!"));
        }
        if self.initial_level < 1 {
            return Err(GameError::invalid("Initial level must be at least 1!"));
        }
        Ok(())
    }

    /// Ball travel per tick (board cells) at the given tick rate
    pub fn tick_speed(&self, fps: u32) -> f64 {
        self.ball_speed / f64::from(fps.max(1)) * SPEED_SCALE
    }

    /// Seeded generator for launch directions
    pub fn rng(&self) -> Pcg32 {
        if self.random_seed == TIME_SEEDED {
            Pcg32::seed_from_u64(rand::random())
        } else {
            Pcg32::seed_from_u64(self.random_seed as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.tick_speed(50) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut config = Config::default();
        config.ball_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.initial_level = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filename = "two words".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let config = Config {
            random_seed: 42,
            ..Config::default()
        };
        let mut rng1 = config.rng();
        let mut rng2 = config.rng();
        for _ in 0..8 {
            assert_eq!(rng1.random::<u32>(), rng2.random::<u32>());
        }
    }
}
