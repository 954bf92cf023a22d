//! Level editor
//!
//! Editor coordinates are logical: `x` counts brick slots, mapped to
//! board column `2 * x + 1`. The bottom rows are kept free for the ball
//! and paddle. While editing, the session board is re-derived from the
//! draft after every change.

use std::collections::BTreeMap;

use log::{info, warn};

use super::App;
use crate::consts::{EDITOR_MAX_SIZE, EDITOR_MIN_SIZE, EDITOR_RESERVED_ROWS};
use crate::error::{GameError, Result};
use crate::persistence;
use crate::platform::{Console, Storage, TickScheduler};
use crate::sim::{Board, Brick, BrickKind, Level, Session};

/// One line of editor input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Place { x: i32, y: i32, kind: BrickKind },
    Delete { x: i32, y: i32 },
    Finish,
    Quit,
}

impl EditorCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let coord = |token: &str| -> Result<i32> {
            token
                .parse()
                .map_err(|_| GameError::invalid("Invalid coordinate!"))
        };
        match tokens[..] {
            ["P", x, y, code] => {
                let mut chars = code.chars();
                let kind = match (chars.next(), chars.next()) {
                    (Some(c), None) => BrickKind::from_code(c),
                    _ => None,
                }
                .ok_or_else(|| GameError::invalid("Unknown brick type! Use @, # or *."))?;
                Ok(EditorCommand::Place {
                    x: coord(x)?,
                    y: coord(y)?,
                    kind,
                })
            }
            ["D", x, y] => Ok(EditorCommand::Delete {
                x: coord(x)?,
                y: coord(y)?,
            }),
            ["f"] => Ok(EditorCommand::Finish),
            ["q"] => Ok(EditorCommand::Quit),
            _ => Err(GameError::invalid("Invalid command!")),
        }
    }
}

/// In-progress level, bricks keyed by (row, column).
/// Each brick carries its placement sequence number; the saved level
/// lists bricks in placement order, which is also their collision order.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDraft {
    pub filename: String,
    pub width: i32,
    pub height: i32,
    pub initial_level: u32,
    bricks: BTreeMap<(i32, i32), (u64, Brick)>,
    next_seq: u64,
}

impl LevelDraft {
    pub fn new(filename: &str, width: i32, height: i32, initial_level: u32) -> Result<Self> {
        let size = EDITOR_MIN_SIZE..=EDITOR_MAX_SIZE;
        if !size.contains(&width) || !size.contains(&height) {
            return Err(GameError::invalid(format!(
                "Width and height must be between {EDITOR_MIN_SIZE} and {EDITOR_MAX_SIZE}!"
            )));
        }
        if initial_level < 1 {
            return Err(GameError::invalid("Initial level must be at least 1!"));
        }
        if filename.is_empty() || filename.contains(char::is_whitespace) {
            return Err(GameError::invalid("Level name must be a single word!"));
        }
        Ok(Self {
            filename: filename.to_string(),
            width,
            height,
            initial_level,
            bricks: BTreeMap::new(),
            next_seq: 0,
        })
    }

    pub fn board(&self) -> Board {
        Board::for_level(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Board cell for editor coordinates, if placeable
    fn cell(&self, x: i32, y: i32) -> Result<(i32, i32)> {
        let column = x.checked_mul(2).and_then(|c| c.checked_add(1));
        let board = self.board();
        match column {
            Some(column)
                if (0..board.width).contains(&column)
                    && (0..board.height - EDITOR_RESERVED_ROWS).contains(&y) =>
            {
                Ok((y, column))
            }
            _ => Err(GameError::invalid("Invalid coordinate!")),
        }
    }

    pub fn place(&mut self, x: i32, y: i32, kind: BrickKind) -> Result<()> {
        let key = self.cell(x, y)?;
        if self.bricks.contains_key(&key) {
            return Err(GameError::invalid("Brick exists!"));
        }
        self.bricks
            .insert(key, (self.next_seq, Brick::new(key.1, key.0, kind)));
        self.next_seq += 1;
        Ok(())
    }

    pub fn delete(&mut self, x: i32, y: i32) -> Result<()> {
        let key = self.cell(x, y)?;
        self.bricks
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| GameError::invalid("Brick not found!"))
    }

    /// Snapshot as a level record (bricks in placement order)
    pub fn to_level(&self) -> Level {
        let mut placed: Vec<(u64, Brick)> = self.bricks.values().copied().collect();
        placed.sort_unstable_by_key(|(seq, _)| *seq);
        Level {
            filename: self.filename.clone(),
            width: self.width,
            height: self.height,
            initial_level: self.initial_level,
            bricks: placed.into_iter().map(|(_, brick)| brick).collect(),
        }
    }
}

/// Result of applying an editor command
#[derive(Debug, Clone, PartialEq)]
pub enum EditorStep {
    /// Draft changed; message to show under the board
    Edited(&'static str),
    /// Draft is ready to be saved
    Finish(Level),
    /// Edits discarded
    Quit,
}

/// Editing sub-protocol bound to a session
#[derive(Debug)]
pub struct LevelEditor {
    pub draft: LevelDraft,
    /// Level the session showed before editing began
    snapshot: Level,
}

impl LevelEditor {
    pub fn begin(session: &mut Session, draft: LevelDraft) -> Self {
        let snapshot = session.loaded.clone();
        session.editing = true;
        session.apply_level(draft.to_level());
        Self { draft, snapshot }
    }

    pub fn apply(&mut self, session: &mut Session, command: EditorCommand) -> Result<EditorStep> {
        let step = match command {
            EditorCommand::Place { x, y, kind } => {
                self.draft.place(x, y, kind)?;
                EditorStep::Edited("Brick placed!")
            }
            EditorCommand::Delete { x, y } => {
                self.draft.delete(x, y)?;
                EditorStep::Edited("Brick deleted!")
            }
            EditorCommand::Finish => return Ok(EditorStep::Finish(self.draft.to_level())),
            EditorCommand::Quit => return Ok(EditorStep::Quit),
        };
        session.apply_level(self.draft.to_level());
        Ok(step)
    }

    /// Leave the editor, restoring the pre-edit level
    pub fn end(self, session: &mut Session) {
        session.apply_level(self.snapshot);
        session.editing = false;
    }
}

impl<C: Console, S: Storage, T: TickScheduler> App<C, S, T> {
    /// Prompt for a new level, then run the editor until finish or quit
    pub fn level_editor(&mut self) {
        let draft = match self.prompt_draft() {
            Ok(Some(draft)) => draft,
            Ok(None) => return,
            Err(err) => {
                self.notify(&err.user_message());
                return;
            }
        };

        let mut editor = LevelEditor::begin(&mut self.session, draft);
        self.draw();
        while let Some(line) = self.console.read_line() {
            let step = EditorCommand::parse(&line).and_then(|cmd| editor.apply(&mut self.session, cmd));
            match step {
                Ok(EditorStep::Edited(msg)) => {
                    self.draw();
                    self.console.write_line(msg);
                }
                Ok(EditorStep::Finish(level)) => {
                    match persistence::save_level(&mut self.storage, &level) {
                        Ok(()) => {
                            info!("created level {} ({} bricks)", level.filename, level.bricks.len());
                            self.notify("Level created successfully!");
                            break;
                        }
                        Err(err) => {
                            self.draw();
                            self.console.write_line(&err.user_message());
                        }
                    }
                }
                Ok(EditorStep::Quit) => break,
                Err(err) => {
                    warn!("editor: {err}");
                    self.draw();
                    self.console.write_line(&err.user_message());
                }
            }
        }
        editor.end(&mut self.session);
    }

    fn prompt_draft(&mut self) -> Result<Option<LevelDraft>> {
        let Some(name) = self.prompt_name("Enter level name (q to cancel): ") else {
            return Ok(None);
        };
        let range = format!("({EDITOR_MIN_SIZE}-{EDITOR_MAX_SIZE})");
        let width = self.prompt_value::<i32>(&format!("Enter width {range}: "))?;
        let height = self.prompt_value::<i32>(&format!("Enter height {range}: "))?;
        let initial_level = self.prompt_value::<u32>("Enter initial level: ")?;
        LevelDraft::new(&name, width, height, initial_level).map(Some)
    }
}
