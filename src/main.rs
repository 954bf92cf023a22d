//! ASCII Breakout entry point
//!
//! Sets up logging, the record directory and the terminal, then hands
//! control to the main menu.

use std::env;
use std::path::PathBuf;

use ascii_breakout::app::App;
use ascii_breakout::platform::{DirStorage, SleepScheduler, TerminalConsole};

/// Overrides where levels, configs and high scores are stored
const DATA_DIR_ENV: &str = "BREAKOUT_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

fn main() {
    env_logger::init();

    let data_dir = env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let storage = DirStorage::new(data_dir);
    log::info!("ASCII Breakout starting, records in {}", storage.root().display());

    let mut app = App::new(TerminalConsole::new(), storage, SleepScheduler::new());
    app.run();
}
