//! Line-oriented text encoding for config and level records
//!
//! Config: `filename`, `ball_speed`, `random_seed`, `initial_level`, one
//! per line. Level: `filename`, `width`, `height`, `initial_level`, then
//! one `x y code durability` line per brick. Blank lines are ignored and
//! the durability column is optional on input.

use std::fmt::Write;
use std::str::FromStr;

use crate::error::{GameError, Result};
use crate::settings::Config;
use crate::sim::{Brick, BrickKind, Level};

pub fn encode_config(config: &Config) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        config.filename, config.ball_speed, config.random_seed, config.initial_level
    )
}

pub fn decode_config(name: &str, text: &str) -> Result<Config> {
    let mut fields = Fields::new(name, text);
    let config = Config {
        filename: fields.word("filename")?,
        ball_speed: fields.value("ball speed")?,
        random_seed: fields.value("random seed")?,
        initial_level: fields.value("initial level")?,
    };
    fields.finish()?;
    config
        .validate()
        .map_err(|err| fields.invalid(err.to_string()))?;
    Ok(config)
}

/// Encode a level. Empty bricks are logically absent and are skipped.
pub fn encode_level(level: &Level) -> String {
    let mut out = format!(
        "{}\n{}\n{}\n{}\n",
        level.filename, level.width, level.height, level.initial_level
    );
    for brick in &level.bricks {
        if let Some(code) = brick.kind.code() {
            let _ = writeln!(out, "{} {} {} {}", brick.x, brick.y, code, brick.durability);
        }
    }
    out
}

pub fn decode_level(name: &str, text: &str) -> Result<Level> {
    let mut fields = Fields::new(name, text);
    let mut level = Level {
        filename: fields.word("filename")?,
        width: fields.value("width")?,
        height: fields.value("height")?,
        initial_level: fields.value("initial level")?,
        bricks: Vec::new(),
    };
    while let Some((line, raw)) = fields.next_line() {
        level.bricks.push(parse_brick(raw).map_err(|reason| fields.error_at(line, reason))?);
    }
    level
        .validate()
        .map_err(|err| fields.invalid(err.to_string()))?;
    Ok(level)
}

fn parse_brick(raw: &str) -> std::result::Result<Brick, String> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if !(3..=4).contains(&tokens.len()) {
        return Err(format!("expected `x y type [durability]`, got `{raw}`"));
    }
    let x = parse_token::<i32>(tokens[0], "brick x")?;
    let y = parse_token::<i32>(tokens[1], "brick y")?;
    let mut code = tokens[2].chars();
    let kind = match (code.next(), code.next()) {
        (Some(c), None) => BrickKind::from_code(c),
        _ => None,
    }
    .ok_or_else(|| format!("unknown brick type `{}`", tokens[2]))?;

    let mut brick = Brick::new(x, y, kind);
    if let Some(durability) = tokens.get(3) {
        brick.durability = parse_token(durability, "durability")?;
    }
    Ok(brick)
}

fn parse_token<T: FromStr>(token: &str, what: &str) -> std::result::Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("invalid {what} `{token}`"))
}

/// Cursor over the non-blank lines of a record
struct Fields<'a> {
    name: &'a str,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    /// 1-based number of the last line handed out
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(name: &'a str, text: &'a str) -> Self {
        Self {
            name,
            lines: text.lines().enumerate(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (index, raw) in self.lines.by_ref() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.line = index + 1;
                return Some((self.line, trimmed));
            }
        }
        None
    }

    fn require(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.next_line()
            .ok_or_else(|| self.error_at(self.line + 1, format!("missing {what}")))
    }

    fn word(&mut self, what: &str) -> Result<String> {
        let (line, raw) = self.require(what)?;
        if raw.contains(char::is_whitespace) {
            return Err(self.error_at(line, format!("{what} must be a single word")));
        }
        Ok(raw.to_string())
    }

    fn value<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let (line, raw) = self.require(what)?;
        parse_token(raw, what).map_err(|reason| self.error_at(line, reason))
    }

    /// Fail if anything follows the last expected field
    fn finish(&mut self) -> Result<()> {
        match self.next_line() {
            Some((line, raw)) => Err(self.error_at(line, format!("unexpected `{raw}`"))),
            None => Ok(()),
        }
    }

    fn error_at(&self, line: usize, reason: String) -> GameError {
        GameError::Parse {
            name: self.name.to_string(),
            line,
            reason,
        }
    }

    /// Record-level validation failure (reported against the last line)
    fn invalid(&self, reason: String) -> GameError {
        self.error_at(self.line, reason)
    }
}
