//! Save/load of config and level records
//!
//! Features:
//! - Plain-text records, one field per line
//! - All-or-nothing loads (a record is fully decoded before it is returned)
//! - Configs stored as `<name>.cfg`, levels as `<name>.lvl`

pub mod codec;

use log::{info, warn};

pub use codec::{decode_config, decode_level, encode_config, encode_level};

use crate::error::{GameError, Result};
use crate::platform::Storage;
use crate::settings::Config;
use crate::sim::Level;

pub fn config_key(name: &str) -> String {
    format!("{name}.cfg")
}

pub fn level_key(name: &str) -> String {
    format!("{name}.lvl")
}

pub fn load_config(storage: &dyn Storage, name: &str) -> Result<Config> {
    let result = read(storage, &config_key(name), name).and_then(|text| decode_config(name, &text));
    log_load("config", name, &result);
    result
}

pub fn save_config(storage: &mut dyn Storage, config: &Config) -> Result<()> {
    write(storage, &config_key(&config.filename), &config.filename, &encode_config(config))
}

pub fn load_level(storage: &dyn Storage, name: &str) -> Result<Level> {
    let result = read(storage, &level_key(name), name).and_then(|text| decode_level(name, &text));
    log_load("level", name, &result);
    result
}

pub fn save_level(storage: &mut dyn Storage, level: &Level) -> Result<()> {
    write(storage, &level_key(&level.filename), &level.filename, &encode_level(level))
}

fn read(storage: &dyn Storage, key: &str, name: &str) -> Result<String> {
    storage.read(key).ok_or_else(|| GameError::NotFound {
        name: name.to_string(),
    })
}

fn write(storage: &mut dyn Storage, key: &str, name: &str, text: &str) -> Result<()> {
    match storage.write(key, text) {
        Ok(()) => {
            info!("saved {key}");
            Ok(())
        }
        Err(source) => {
            warn!("failed to save {key}: {source}");
            Err(GameError::Io {
                name: name.to_string(),
                source,
            })
        }
    }
}

fn log_load<T>(kind: &str, name: &str, result: &Result<T>) {
    match result {
        Ok(_) => info!("loaded {kind} {name}"),
        Err(err) => warn!("failed to load {kind} {name}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DirStorage, MemoryStorage};
    use crate::sim::{Brick, BrickKind};

    fn sample_level() -> Level {
        let mut level = Level::empty("custom", 10, 12, 2);
        level.bricks = vec![
            Brick::new(5, 0, BrickKind::Durable),
            Brick::new(1, 3, BrickKind::Normal),
            Brick::new(3, 0, BrickKind::Indestructible),
        ];
        level
    }

    #[test]
    fn test_level_save_then_load() {
        let mut storage = MemoryStorage::new();
        let level = sample_level();
        save_level(&mut storage, &level).expect("save");
        assert!(storage.files.contains_key("custom.lvl"));
        assert_eq!(load_level(&storage, "custom").expect("load"), level);
    }

    #[test]
    fn test_missing_records_are_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            load_level(&storage, "nope"),
            Err(GameError::NotFound { .. })
        ));
        assert!(matches!(
            load_config(&storage, "nope"),
            Err(GameError::NotFound { .. })
        ));
    }

    #[test]
    fn test_save_failure_is_io_error() {
        let mut storage = MemoryStorage {
            read_only: true,
            ..MemoryStorage::default()
        };
        let err = save_config(&mut storage, &Config::default()).unwrap_err();
        assert!(matches!(err, GameError::Io { .. }));
        assert_eq!(err.user_message(), "Failed to save default!");
    }

    #[test]
    fn test_config_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = DirStorage::new(dir.path());
        let config = Config {
            filename: "slow".into(),
            ball_speed: 2.0,
            random_seed: 9,
            initial_level: 1,
        };
        save_config(&mut storage, &config).expect("save");
        assert_eq!(load_config(&storage, "slow").expect("load"), config);
    }

    #[test]
    fn test_shipped_levels_parse() {
        let storage = DirStorage::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        for n in 1..=crate::consts::LEVEL_CAP {
            let name = crate::level_name(n);
            let level = load_level(&storage, &name).expect("shipped level");
            assert_eq!(level.board().width, 19);
            assert!(level.bricks.iter().any(|b| b.kind.counts_for_clear()));
        }
    }
}
