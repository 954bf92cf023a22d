//! Scripted console for driving the app in tests

use std::collections::VecDeque;

use super::display::DisplaySink;
use super::input::InputSource;

/// Replays canned keys and lines; records everything written
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    /// One entry per poll; `None` means "no key this poll"
    keys: VecDeque<Option<char>>,
    lines: VecDeque<String>,
    pub frames: Vec<String>,
    pub messages: Vec<String>,
    idle_polls: usize,
}

/// Polls allowed after the key script runs out before the test is failed
const MAX_IDLE_POLLS: usize = 10_000;

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(mut self, lines: &[&str]) -> Self {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
        self
    }

    pub fn keys(mut self, keys: &str) -> Self {
        self.keys.extend(keys.chars().map(Some));
        self
    }

    /// Let `n` polls pass with nothing pressed
    pub fn idle(mut self, n: usize) -> Self {
        self.keys.extend(std::iter::repeat_n(None, n));
        self
    }

    pub fn last_frame(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or("")
    }

    pub fn saw_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl InputSource for ScriptedConsole {
    fn poll_key(&mut self) -> Option<char> {
        match self.keys.pop_front() {
            Some(key) => key,
            None => {
                self.idle_polls += 1;
                assert!(self.idle_polls < MAX_IDLE_POLLS, "key script exhausted");
                None
            }
        }
    }

    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

impl DisplaySink for ScriptedConsole {
    fn clear_and_write(&mut self, frame: &str) {
        self.frames.push(frame.to_string());
    }

    fn write_line(&mut self, line: &str) {
        self.messages.push(line.to_string());
    }
}
