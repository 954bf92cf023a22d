//! Config editor and the load prompts

use log::info;

use super::App;
use crate::error::Result;
use crate::persistence;
use crate::platform::{Console, Storage, TickScheduler};
use crate::settings::Config;

impl<C: Console, S: Storage, T: TickScheduler> App<C, S, T> {
    /// Prompt for a new config, save it, then make it active
    pub fn config_editor(&mut self) {
        let config = match self.prompt_config() {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(err) => {
                self.notify(&err.user_message());
                return;
            }
        };
        // The active config only changes once the record is on disk
        match persistence::save_config(&mut self.storage, &config) {
            Ok(()) => {
                info!("config {} is now active", config.filename);
                self.session.apply_config(config);
                self.notify("Config created successfully!");
            }
            Err(err) => self.notify(&err.user_message()),
        }
    }

    fn prompt_config(&mut self) -> Result<Option<Config>> {
        let Some(filename) = self.prompt_name("Enter config name (q to cancel): ") else {
            return Ok(None);
        };
        let config = Config {
            filename,
            ball_speed: self.prompt_value("Enter ball speed (1-10): ")?,
            random_seed: self.prompt_value("Enter random seed (-1 for time-based): ")?,
            initial_level: self.prompt_value("Enter initial level: ")?,
        };
        config.validate()?;
        Ok(Some(config))
    }

    pub fn load_config_prompt(&mut self) {
        let question = format!(
            "Current config: {}\nEnter config name to load (q to cancel): ",
            self.session.config.filename
        );
        let Some(name) = self.prompt_name(&question) else {
            return;
        };
        match persistence::load_config(&self.storage, &name) {
            Ok(config) => {
                self.session.apply_config(config);
                self.notify("Config loaded successfully!");
            }
            Err(err) => self.notify(&err.user_message()),
        }
    }

    pub fn load_level_prompt(&mut self) {
        let question = format!(
            "Current level: {}\nEnter level name to load (q to cancel): ",
            self.session.loaded.filename
        );
        let Some(name) = self.prompt_name(&question) else {
            return;
        };
        match persistence::load_level(&self.storage, &name) {
            Ok(level) => {
                self.session.apply_level(level);
                self.notify("Level loaded successfully!");
            }
            Err(err) => self.notify(&err.user_message()),
        }
    }

    pub fn show_high_scores(&mut self) {
        let table = format!("High Scores\n\n{}\n", self.scores.table());
        self.console.clear_and_write(&table);
        self.acknowledge();
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::app;
    use crate::platform::script::ScriptedConsole;
    use crate::sim::{BrickKind, GamePhase, Outcome, advance_level};

    #[test]
    fn test_create_config_activates_it() {
        let mut app = app(ScriptedConsole::new().lines(&["i", "fast", "8", "42", "2", "q"]));
        app.run();
        assert!(app.console.saw_message("Config created successfully!"));
        assert_eq!(app.session.config.filename, "fast");
        assert_eq!(app.session.config.ball_speed, 8.0);
        assert_eq!(app.session.config.random_seed, 42);
        assert_eq!(app.session.config.initial_level, 2);
        assert!(app.storage.files.contains_key("fast.cfg"));
    }

    #[test]
    fn test_invalid_config_is_not_applied() {
        let mut app = app(ScriptedConsole::new().lines(&["i", "slow", "0", "1", "1", "q"]));
        app.run();
        assert_eq!(app.session.config.filename, "default");
        assert!(!app.storage.files.contains_key("slow.cfg"));
    }

    #[test]
    fn test_failed_save_keeps_old_config() {
        let mut app = app(ScriptedConsole::new().lines(&["i", "fast", "8", "42", "2", "q"]));
        app.storage.read_only = true;
        app.run();
        assert!(app.console.saw_message("Failed to save fast!"));
        assert_eq!(app.session.config.filename, "default");
    }

    #[test]
    fn test_load_config_round_trip() {
        let mut app = app(ScriptedConsole::new().lines(&[
            "i", "fast", "8", "42", "2", "u", "default", "u", "fast", "q",
        ]));
        app.run();
        assert!(app.console.saw_message("Failed to load default!"));
        assert!(app.console.saw_message("Config loaded successfully!"));
        assert_eq!(app.session.config.filename, "fast");
    }

    #[test]
    fn test_load_level_failure_keeps_current() {
        let mut app = app(ScriptedConsole::new().lines(&["m", "missing", "m", "q"]));
        app.run();
        assert!(app.console.saw_message("Failed to load missing!"));
        assert!(
            app.console
                .messages
                .iter()
                .any(|m| m.contains("Current level: Level_1"))
        );
        assert_eq!(app.session.loaded.filename, "Level_1");
    }

    #[test]
    fn test_load_level_replaces_board() {
        let mut app = app(ScriptedConsole::new().lines(&["m", "custom", "q"]));
        app.storage
            .files
            .insert("custom.lvl".into(), "custom\n10\n12\n2\n3 0 # 2\n".into());
        app.run();
        assert!(app.console.saw_message("Level loaded successfully!"));
        assert_eq!(app.session.loaded.filename, "custom");
        assert_eq!(app.session.board.width, 21);
        assert_eq!(app.session.level, 2);
        assert_eq!(app.session.bricks[0].kind, BrickKind::Durable);
        assert_eq!(app.session.phase, GamePhase::Idle);
    }

    #[test]
    fn test_oversized_level_is_rejected_on_load() {
        let mut app = app(ScriptedConsole::new().lines(&["m", "huge", "q"]));
        app.storage
            .files
            .insert("huge.lvl".into(), "huge\n1500000000\n12\n1\n".into());
        app.run();
        assert!(app.console.saw_message("Failed to load huge!"));
        assert_eq!(app.session.loaded.filename, "Level_1");
        assert_eq!(app.session.board.width, 19);
    }

    #[test]
    fn test_max_initial_level_run_ends_in_victory() {
        let mut app = app(ScriptedConsole::new().lines(&["i", "big", "5", "1", "4294967295", "q"]));
        app.run();
        assert_eq!(app.session.config.initial_level, u32::MAX);

        app.session.start_game();
        app.session.phase = GamePhase::LevelTransition;
        advance_level(&mut app.session, |name| panic!("unexpected load of {name}"))
            .expect("victory");
        assert_eq!(app.session.phase, GamePhase::Terminated(Outcome::Victory));
    }

    #[test]
    fn test_high_scores_screen() {
        let mut app = app(ScriptedConsole::new().lines(&["h", "", "q"]));
        app.scores.add_score(70, 2, 0);
        app.run();
        assert!(app.console.frames.iter().any(|f| f.contains("High Scores") && f.contains("70")));
    }
}
