//! Two-character glyphs for board cells

use crate::sim::BrickKind;

pub const BALL: &str = "()";
pub const PADDLE: &str = "--";
pub const BLANK: &str = "  ";

/// Glyph pair for a brick; `None` for empty bricks
pub fn brick(kind: BrickKind) -> Option<&'static str> {
    match kind {
        BrickKind::Empty => None,
        BrickKind::Normal => Some("@@"),
        BrickKind::Durable => Some("##"),
        BrickKind::Indestructible => Some("**"),
    }
}
