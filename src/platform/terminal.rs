//! crossterm-backed terminal console
//!
//! Raw mode is only enabled while a game is running so that prompts keep
//! normal line editing.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use log::warn;

use super::display::DisplaySink;
use super::input::InputSource;

pub struct TerminalConsole {
    out: Stdout,
    realtime: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            realtime: false,
        }
    }

    fn newline(&self) -> &'static str {
        if self.realtime { "\r\n" } else { "\n" }
    }

    fn try_clear_and_write(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        let newline = self.newline();
        for line in frame.lines() {
            write!(self.out, "{line}{newline}")?;
        }
        self.out.flush()
    }

    fn try_set_realtime(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            terminal::enable_raw_mode()?;
            execute!(self.out, Hide)?;
        } else {
            execute!(self.out, Show)?;
            terminal::disable_raw_mode()?;
        }
        self.realtime = enabled;
        Ok(())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a key code to the game's single-character commands
fn key_char(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Left => Some('a'),
        KeyCode::Right => Some('d'),
        KeyCode::Esc => Some('p'),
        _ => None,
    }
}

impl InputSource for TerminalConsole {
    fn poll_key(&mut self) -> Option<char> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => {
                    warn!("input poll failed: {err}");
                    return None;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(c) = key_char(key.code) {
                        return Some(c);
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("input read failed: {err}");
                    return None;
                }
            }
        }
    }

    fn read_line(&mut self) -> Option<String> {
        if self.realtime {
            self.set_realtime(false);
        }
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!("stdin read failed: {err}");
                None
            }
        }
    }

    fn set_realtime(&mut self, enabled: bool) {
        if enabled == self.realtime {
            return;
        }
        if let Err(err) = self.try_set_realtime(enabled) {
            warn!("failed to switch terminal mode: {err}");
        }
    }
}

impl DisplaySink for TerminalConsole {
    fn clear_and_write(&mut self, frame: &str) {
        if let Err(err) = self.try_clear_and_write(frame) {
            warn!("failed to draw frame: {err}");
        }
    }

    fn write_line(&mut self, line: &str) {
        let newline = self.newline();
        if let Err(err) = write!(self.out, "{line}{newline}").and_then(|_| self.out.flush()) {
            warn!("failed to write line: {err}");
        }
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        if self.realtime {
            let _ = self.try_set_realtime(false);
        }
    }
}
