//! Realtime play loop and pause menu

use std::time::Duration;

use log::{debug, info, warn};

use super::App;
use crate::consts::{LEVEL_CAP, PAUSED_POLL_MS};
use crate::highscores::now_timestamp;
use crate::persistence;
use crate::platform::{Console, Storage, TickScheduler, tick_interval};
use crate::sim::{GamePhase, Outcome, TickInput, advance_level, tick};

/// Keys folded into one tick at most
const MAX_KEYS_PER_TICK: usize = 16;

impl<C: Console, S: Storage, T: TickScheduler> App<C, S, T> {
    /// Play one run from a fresh start until it terminates
    pub fn play(&mut self) {
        self.session.start_game();
        info!(
            "starting run on {} (config {})",
            self.session.loaded.filename, self.session.config.filename
        );
        self.console.set_realtime(true);

        let interval = tick_interval(self.session.fps);
        let paused_interval = Duration::from_millis(PAUSED_POLL_MS);
        loop {
            match self.session.phase {
                GamePhase::Running => {
                    let input = self.collect_input();
                    tick(&mut self.session, &input);
                    self.draw();
                    self.clock.wait_until_next_tick(interval);
                }
                GamePhase::Paused => {
                    if let Some(key) = self.console.poll_key() {
                        self.pause_command(key);
                    }
                    self.clock.wait_until_next_tick(paused_interval);
                }
                GamePhase::LevelTransition => self.finish_level(),
                GamePhase::Terminated(outcome) => {
                    self.end_run(outcome);
                    break;
                }
                GamePhase::Idle => break,
            }
        }

        self.session.phase = GamePhase::Idle;
        self.console.set_realtime(false);
    }

    /// Drain pending keys into one tick's input; stops at a pause
    fn collect_input(&mut self) -> TickInput {
        let mut input = TickInput::default();
        for _ in 0..MAX_KEYS_PER_TICK {
            let Some(key) = self.console.poll_key() else {
                break;
            };
            input.press(key);
            if input.pause {
                break;
            }
        }
        input
    }

    fn pause_command(&mut self, key: char) {
        match key {
            'p' => {
                tick(&mut self.session, &TickInput {
                    pause: true,
                    ..TickInput::default()
                });
            }
            'r' => {
                self.session.restart_level();
                self.session.phase = GamePhase::Running;
            }
            's' => self.save_snapshot(),
            'q' => self.session.phase = GamePhase::Terminated(Outcome::Quit),
            _ => return,
        }
        self.draw();
    }

    /// Save the live board as a level record
    fn save_snapshot(&mut self) {
        self.console.set_realtime(false);
        if let Some(name) = self.prompt_name("Enter filename to save level: ") {
            let level = self.session.snapshot_level(&name);
            match persistence::save_level(&mut self.storage, &level) {
                Ok(()) => self.console.write_line("Level saved successfully!"),
                Err(err) => self.console.write_line(&err.user_message()),
            }
            self.acknowledge();
        }
        self.console.set_realtime(true);
    }

    fn finish_level(&mut self) {
        let completed = self.session.level;
        self.console.set_realtime(false);
        self.console
            .write_line(&format!("Level {completed} complete!"));

        let storage = &self.storage;
        let result = advance_level(&mut self.session, |name| {
            persistence::load_level(storage, name)
        });
        if let Err(err) = result {
            warn!("cannot continue after level {completed}: {err}");
            self.console.write_line(&err.user_message());
        }
        if self.session.phase == GamePhase::Running {
            self.acknowledge();
        }
        self.console.set_realtime(true);
    }

    fn end_run(&mut self, outcome: Outcome) {
        info!(
            "run ended: {outcome:?}, score {}, level {}",
            self.session.score, self.session.level
        );
        self.console.set_realtime(false);
        match outcome {
            Outcome::Victory => {
                self.console
                    .write_line("Congratulations! You beat all levels!");
                self.record_score();
                self.acknowledge();
            }
            Outcome::Defeat => {
                self.console.write_line(&format!(
                    "GAME OVER! Final Score: {}",
                    self.session.score
                ));
                self.record_score();
                self.acknowledge();
                self.load_first_level();
            }
            Outcome::LoadFailed => {
                self.record_score();
                self.acknowledge();
            }
            Outcome::Quit => {}
        }
    }

    fn record_score(&mut self) {
        let score = self.session.score;
        let level = self.session.level.min(LEVEL_CAP);
        let Some(rank) = self.scores.add_score(score, level, now_timestamp()) else {
            debug!("score {score} did not place");
            return;
        };
        self.console
            .write_line(&format!("New high score! Rank #{rank}"));
        if let Err(err) = self.scores.save(&mut self.storage) {
            self.console.write_line(&err.user_message());
        }
    }
}
