//! Session state machine: main menu, play loop, editors
//!
//! The app owns the console, the record store and the tick clock, so the
//! whole thing can be driven by scripted input in tests.

pub mod config;
pub mod editor;
pub mod play;

use std::str::FromStr;

use log::{info, warn};

use crate::consts::FIRST_LEVEL;
use crate::error::{GameError, Result};
use crate::highscores::HighScores;
use crate::level_name;
use crate::persistence;
use crate::platform::{Console, Storage, TickScheduler};
use crate::renderer;
use crate::settings::Config;
use crate::sim::Session;

pub use editor::{EditorCommand, EditorStep, LevelDraft, LevelEditor};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    ConfigEditor,
    LevelEditor,
    Exit,
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    StartGame,
    NewLevel,
    LoadLevel,
    NewConfig,
    LoadConfig,
    HighScores,
    Quit,
}

/// Key, command and label for each menu entry, in display order
pub const MENU: &[(char, MenuCommand, &str)] = &[
    ('g', MenuCommand::StartGame, "Start Game"),
    ('n', MenuCommand::NewLevel, "Create New Level"),
    ('m', MenuCommand::LoadLevel, "Load Level"),
    ('i', MenuCommand::NewConfig, "Create New Config"),
    ('u', MenuCommand::LoadConfig, "Load Config"),
    ('h', MenuCommand::HighScores, "High Scores"),
    ('q', MenuCommand::Quit, "Quit"),
];

impl MenuCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        MENU.iter().find(|(k, ..)| *k == key).map(|(_, cmd, _)| *cmd)
    }
}

pub struct App<C: Console, S: Storage, T: TickScheduler> {
    pub console: C,
    pub storage: S,
    pub clock: T,
    pub session: Session,
    pub scores: HighScores,
    /// Shown under the next menu frame
    notice: Option<String>,
}

impl<C: Console, S: Storage, T: TickScheduler> App<C, S, T> {
    /// Build the app and load the first level
    pub fn new(console: C, storage: S, clock: T) -> Self {
        let scores = HighScores::load(&storage);
        let mut app = Self {
            console,
            storage,
            clock,
            session: Session::new(Config::default()),
            scores,
            notice: None,
        };
        app.load_first_level();
        app
    }

    /// Run until the player quits or input ends
    pub fn run(&mut self) {
        info!("entering main menu");
        let mut screen = Screen::MainMenu;
        while screen != Screen::Exit {
            screen = match screen {
                Screen::MainMenu => self.main_menu(),
                Screen::Playing => {
                    self.play();
                    Screen::MainMenu
                }
                Screen::ConfigEditor => {
                    self.config_editor();
                    Screen::MainMenu
                }
                Screen::LevelEditor => {
                    self.level_editor();
                    Screen::MainMenu
                }
                Screen::Exit => Screen::Exit,
            };
        }
        info!("goodbye");
    }

    /// Show the menu, read one choice and dispatch it
    pub fn main_menu(&mut self) -> Screen {
        let frame = self.menu_frame();
        self.console.clear_and_write(&frame);
        let Some(line) = self.console.read_line() else {
            return Screen::Exit;
        };
        match MenuCommand::parse(&line) {
            Some(MenuCommand::StartGame) => Screen::Playing,
            Some(MenuCommand::NewLevel) => Screen::LevelEditor,
            Some(MenuCommand::NewConfig) => Screen::ConfigEditor,
            Some(MenuCommand::LoadLevel) => {
                self.load_level_prompt();
                Screen::MainMenu
            }
            Some(MenuCommand::LoadConfig) => {
                self.load_config_prompt();
                Screen::MainMenu
            }
            Some(MenuCommand::HighScores) => {
                self.show_high_scores();
                Screen::MainMenu
            }
            Some(MenuCommand::Quit) => Screen::Exit,
            None => {
                self.notify("Invalid choice!");
                Screen::MainMenu
            }
        }
    }

    fn menu_frame(&mut self) -> String {
        let mut frame = String::from("ASCII Breakout\n\n");
        for (key, _, label) in MENU {
            frame.push_str(&format!("{key} - {label}\n"));
        }
        frame.push_str(&format!(
            "\nConfig: {} | Level: {}\n",
            self.session.config.filename, self.session.loaded.filename
        ));
        if let Some(notice) = self.notice.take() {
            frame.push('\n');
            frame.push_str(&notice);
            frame.push('\n');
        }
        frame
    }

    /// Load `Level_1` as the current layout; failure is reported, not fatal
    pub fn load_first_level(&mut self) -> bool {
        let name = level_name(FIRST_LEVEL);
        match persistence::load_level(&self.storage, &name) {
            Ok(level) => {
                self.session.apply_level(level);
                true
            }
            Err(err) => {
                self.notify(&err.user_message());
                false
            }
        }
    }

    /// Redraw the board
    pub fn draw(&mut self) {
        let frame = renderer::render(&self.session);
        self.console.clear_and_write(&frame);
    }

    /// Report a one-line message now and under the next menu
    pub fn notify(&mut self, msg: &str) {
        self.console.write_line(msg);
        self.notice = Some(msg.to_string());
    }

    /// Block until the player presses Enter (or input ends)
    pub fn acknowledge(&mut self) {
        self.console.write_line("Press Enter to continue...");
        let _ = self.console.read_line();
    }

    /// Ask for a record name; `None` on cancel (`q`) or end of input
    pub fn prompt_name(&mut self, question: &str) -> Option<String> {
        self.console.write_line(question);
        let line = self.console.read_line()?;
        let name = line.trim();
        if name.is_empty() || name == "q" {
            return None;
        }
        Some(name.to_string())
    }

    /// Ask for a single value
    pub fn prompt_value<V: FromStr>(&mut self, question: &str) -> Result<V> {
        self.console.write_line(question);
        let line = self
            .console
            .read_line()
            .ok_or_else(|| GameError::invalid("No input!"))?;
        line.trim().parse().map_err(|_| {
            warn!("rejected input {:?} for {question:?}", line.trim());
            GameError::invalid("Invalid input!")
        })
    }
}
