//! Projection of a session onto a character grid
//!
//! Pure reads only; safe to call in any phase, including mid-edit.

use super::glyphs;
use crate::sim::{GamePhase, Session};

/// What the help line should describe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Playing,
    Paused,
    Editing,
}

impl ViewMode {
    pub fn of(session: &Session) -> Self {
        if session.editing {
            ViewMode::Editing
        } else if session.phase == GamePhase::Paused {
            ViewMode::Paused
        } else {
            ViewMode::Playing
        }
    }

    fn help(self) -> &'static str {
        match self {
            ViewMode::Playing => "Controls: a-left, d-right, space-launch, p-pause, r-restart",
            ViewMode::Paused => {
                "PAUSED - Press 'p' to continue, 's' to save, 'r' to restart, 'q' to quit"
            }
            ViewMode::Editing => {
                "P x y type -- place a type brick at (x,y)\n\
                 D x y -- delete the brick at (x,y)\n\
                 f -- finish placing\n\
                 q -- quit placing"
            }
        }
    }
}

/// Draw the status line, bordered board and help text
pub fn render(session: &Session) -> String {
    let mode = ViewMode::of(session);
    let board = session.board;
    let width = board.width.max(0) as usize;
    let height = board.height.max(0) as usize;

    let mut cells: Vec<&'static str> = vec![glyphs::BLANK; width * height];
    let index = |x: i32, y: i32| -> Option<usize> {
        (x >= 0 && y >= 0 && x < board.width && y < board.height)
            .then(|| y as usize * width + x as usize)
    };

    if mode != ViewMode::Editing {
        let row = board.paddle_row();
        for x in session.paddle.x..session.paddle.x + session.paddle.width {
            if let Some(i) = index(x, row) {
                cells[i] = glyphs::PADDLE;
            }
        }
    }

    // Reverse so the first brick stored at a cell is the one drawn
    for brick in session.bricks.iter().rev() {
        if let (Some(glyph), Some(i)) = (glyphs::brick(brick.kind), index(brick.x, brick.y)) {
            cells[i] = glyph;
        }
    }

    if mode != ViewMode::Editing {
        let pos = session.ball.pos;
        if let Some(i) = index(pos.x.floor() as i32, pos.y.floor() as i32) {
            cells[i] = glyphs::BALL;
        }
    }

    let border = "-".repeat(width * 2 + 2);
    let mut out = String::with_capacity((width * 2 + 3) * (height + 4));
    if mode != ViewMode::Editing {
        out.push_str(&format!(
            "Score: {} | Lives: {} | Level: {}\n",
            session.score, session.lives, session.level
        ));
    }
    out.push_str(&border);
    out.push('\n');
    for row in cells.chunks(width.max(1)).take(height) {
        out.push('|');
        for cell in row {
            out.push_str(cell);
        }
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push('\n');
    out.push_str(mode.help());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;
    use crate::sim::{Brick, BrickKind, Level};
    use glam::DVec2;

    fn session() -> Session {
        let mut session = Session::new(Config::default());
        session.apply_level(Level {
            bricks: vec![
                Brick::new(1, 1, BrickKind::Normal),
                Brick::new(3, 1, BrickKind::Durable),
                Brick::new(5, 1, BrickKind::Indestructible),
                Brick::new(7, 1, BrickKind::Empty),
            ],
            ..Level::default()
        });
        session.start_game();
        session
    }

    fn board_rows(frame: &str) -> Vec<&str> {
        frame.lines().filter(|l| l.starts_with('|')).collect()
    }

    #[test]
    fn test_frame_layout() {
        let session = session();
        let frame = render(&session);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "Score: 0 | Lives: 3 | Level: 1");
        assert_eq!(lines[1], "-".repeat(40));

        let rows = board_rows(&frame);
        assert_eq!(rows.len(), 18);
        assert!(rows.iter().all(|r| r.len() == 40));
        assert_eq!(&rows[1][3..11], "@@  ##  ");
        assert_eq!(&rows[1][11..17], "**    ");
        assert!(rows[17].contains(&"-".repeat(14)));
        assert!(rows[16].contains("()"));
        assert!(frame.ends_with("p-pause, r-restart\n"));
    }

    #[test]
    fn test_free_ball_position() {
        let mut session = session();
        session.ball.attached = false;
        session.ball.pos = DVec2::new(2.7, 5.2);
        let frame = render(&session);
        let rows = board_rows(&frame);
        assert_eq!(&rows[5][5..7], "()");
    }

    #[test]
    fn test_editing_hides_play_elements() {
        let mut session = session();
        session.editing = true;
        let frame = render(&session);
        assert!(!frame.contains("Score:"));
        assert!(!frame.contains("()"));
        assert!(frame.contains("D x y -- delete the brick at (x,y)"));
        assert!(!board_rows(&frame)[17].contains("--"));
    }

    #[test]
    fn test_paused_help() {
        let mut session = session();
        session.phase = GamePhase::Paused;
        assert!(render(&session).contains("PAUSED"));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let session = session();
        let before = format!("{session:?}");
        let _ = render(&session);
        assert_eq!(format!("{session:?}"), before);
    }
}
