//! Collision detection and response on the character grid
//!
//! Resolution is a pure function of the ball, paddle, bricks and board.
//! Checks run in a fixed order: side walls, top wall, paddle, bottom
//! boundary, bricks. At most one brick is struck per tick.

use super::state::{Ball, Board, Brick, Paddle};
use crate::consts::PADDLE_DEFLECTION;

/// What the ball ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    None,
    WallBounce,
    PaddleBounce,
    /// Ball passed the bottom of the board
    BallLost,
    /// Brick struck but still standing
    BrickHit,
    BrickBroken,
}

/// Struck brick and its state after the hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickContact {
    /// Index into the brick slice
    pub index: usize,
    pub brick: Brick,
    pub score: u64,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub ball: Ball,
    pub event: CollisionEvent,
    pub contact: Option<BrickContact>,
}

impl CollisionResult {
    fn new(ball: Ball, event: CollisionEvent) -> Self {
        Self {
            ball,
            event,
            contact: None,
        }
    }
}

/// Resolve the ball's interactions after it has moved this tick
///
/// Overshoot past a wall is clamped back to the wall, however far the
/// ball travelled.
pub fn resolve(ball: &Ball, paddle: &Paddle, bricks: &[Brick], board: &Board) -> CollisionResult {
    let mut next = *ball;
    let mut event = CollisionEvent::None;

    let right = f64::from(board.width - 1);
    if next.pos.x <= 0.0 || next.pos.x >= right {
        next.vel.x = -next.vel.x;
        next.pos.x = if next.pos.x <= 0.0 { 0.0 } else { right };
        event = CollisionEvent::WallBounce;
    }

    if next.pos.y <= 0.0 {
        next.vel.y = -next.vel.y;
        next.pos.y = 0.0;
        event = CollisionEvent::WallBounce;
    }

    let contact_row = f64::from(board.contact_row());
    if next.vel.y > 0.0 && next.pos.y >= contact_row && paddle.spans(next.pos.x) {
        paddle_bounce(&mut next, paddle, contact_row);
        return CollisionResult::new(next, CollisionEvent::PaddleBounce);
    }

    if next.pos.y >= f64::from(board.height) {
        return CollisionResult::new(next, CollisionEvent::BallLost);
    }

    if let Some((index, brick)) = bricks
        .iter()
        .enumerate()
        .find(|(_, b)| !b.is_empty() && b.footprint_contains(next.pos))
    {
        let mut struck = *brick;
        let strike = struck.strike();

        // Edge-weighted: flip the axis the ball is further out along
        let offset = next.pos - brick.center();
        if offset.x.abs() > offset.y.abs() {
            next.vel.x = -next.vel.x;
        } else {
            next.vel.y = -next.vel.y;
        }

        return CollisionResult {
            ball: next,
            event: if strike.broken {
                CollisionEvent::BrickBroken
            } else {
                CollisionEvent::BrickHit
            },
            contact: Some(BrickContact {
                index,
                brick: struck,
                score: strike.score,
            }),
        };
    }

    CollisionResult::new(next, event)
}

/// Redirect the ball by where it struck the paddle, keeping its speed
fn paddle_bounce(ball: &mut Ball, paddle: &Paddle, contact_row: f64) {
    let hit_pos = ((ball.pos.x - f64::from(paddle.x)) / f64::from(paddle.width)).clamp(0.0, 1.0);
    let dx = (hit_pos - 0.5) * ball.speed * PADDLE_DEFLECTION;
    ball.vel.x = dx;
    ball.vel.y = ball.upward_dy(dx);
    ball.pos.y = contact_row;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PADDLE_WIDTH;
    use crate::sim::state::BrickKind;
    use glam::DVec2;
    use proptest::prelude::*;

    fn free_ball(pos: DVec2, vel: DVec2) -> Ball {
        Ball {
            pos,
            vel,
            speed: vel.length(),
            attached: false,
        }
    }

    fn setup() -> (Board, Paddle) {
        let board = Board::default();
        let paddle = Paddle::centered(board.width, PADDLE_WIDTH);
        (board, paddle)
    }

    #[test]
    fn test_side_walls_reflect_and_clamp() {
        let (board, paddle) = setup();

        let ball = free_ball(DVec2::new(-0.4, 5.0), DVec2::new(-0.3, 0.4));
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::WallBounce);
        assert_eq!(result.ball.pos.x, 0.0);
        assert!(result.ball.vel.x > 0.0);

        let ball = free_ball(DVec2::new(25.0, 5.0), DVec2::new(0.3, 0.4));
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.ball.pos.x, 18.0);
        assert!(result.ball.vel.x < 0.0);
    }

    #[test]
    fn test_top_wall() {
        let (board, paddle) = setup();
        let ball = free_ball(DVec2::new(4.0, -0.2), DVec2::new(0.0, -0.5));
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::WallBounce);
        assert_eq!(result.ball.pos.y, 0.0);
        assert_eq!(result.ball.vel.y, 0.5);
    }

    #[test]
    fn test_paddle_center_sends_ball_straight_up() {
        let (board, paddle) = setup();
        let ball = free_ball(
            DVec2::new(paddle.center(), 16.2),
            DVec2::new(0.3, 0.4),
        );
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::PaddleBounce);
        assert!(result.ball.vel.x.abs() < 1e-12);
        assert!((result.ball.vel.y + 0.5).abs() < 1e-12);
        assert_eq!(result.ball.pos.y, 16.0);
    }

    #[test]
    fn test_paddle_edge_gives_shallow_angle() {
        let (board, paddle) = setup();
        let ball = free_ball(
            DVec2::new(f64::from(paddle.x + paddle.width), 16.0),
            DVec2::new(0.0, 0.5),
        );
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::PaddleBounce);
        assert!((result.ball.vel.x - 0.375).abs() < 1e-12);
        assert!(result.ball.vel.y < 0.0);
        assert!((result.ball.vel.length() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_paddle_ignored_when_rising() {
        let (board, paddle) = setup();
        let ball = free_ball(DVec2::new(paddle.center(), 16.5), DVec2::new(0.0, -0.5));
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::None);
        assert_eq!(result.ball, ball);
    }

    #[test]
    fn test_missing_paddle_loses_ball() {
        let (board, paddle) = setup();
        let ball = free_ball(DVec2::new(1.0, 18.0), DVec2::new(0.0, 0.5));
        let result = resolve(&ball, &paddle, &[], &board);
        assert_eq!(result.event, CollisionEvent::BallLost);
    }

    #[test]
    fn test_brick_bounce_axis() {
        let (board, paddle) = setup();
        let bricks = [Brick::new(5, 5, BrickKind::Normal)];

        // Entering from below near the middle: vertical flip
        let ball = free_ball(DVec2::new(5.5, 6.2), DVec2::new(0.3, -0.4));
        let result = resolve(&ball, &paddle, &bricks, &board);
        assert_eq!(result.event, CollisionEvent::BrickBroken);
        assert_eq!(result.ball.vel, DVec2::new(0.3, 0.4));
        let contact = result.contact.expect("brick struck");
        assert_eq!(contact.index, 0);
        assert_eq!(contact.score, 10);
        assert!(contact.brick.is_empty());

        // Entering from the side: horizontal flip
        let ball = free_ball(DVec2::new(6.25, 5.6), DVec2::new(-0.3, 0.4));
        let result = resolve(&ball, &paddle, &bricks, &board);
        assert_eq!(result.ball.vel, DVec2::new(0.3, 0.4));
    }

    #[test]
    fn test_only_first_brick_is_struck() {
        let (board, paddle) = setup();
        let bricks = [
            Brick::new(5, 5, BrickKind::Empty),
            Brick::new(5, 5, BrickKind::Indestructible),
            Brick::new(5, 5, BrickKind::Normal),
        ];
        let ball = free_ball(DVec2::new(5.5, 5.9), DVec2::new(0.0, -0.5));
        let result = resolve(&ball, &paddle, &bricks, &board);
        assert_eq!(result.event, CollisionEvent::BrickHit);
        let contact = result.contact.expect("brick struck");
        assert_eq!(contact.index, 1);
        assert_eq!(contact.score, 0);
        assert_eq!(contact.brick.kind, BrickKind::Indestructible);
    }

    proptest! {
        #[test]
        fn prop_speed_is_conserved(
            x in -1.0f64..20.0,
            y in -1.0f64..17.9,
            angle in 0.0f64..std::f64::consts::TAU,
            speed in 0.1f64..1.0,
            paddle_x in 0i32..=12,
        ) {
            let board = Board::default();
            let paddle = Paddle { x: paddle_x, width: PADDLE_WIDTH };
            let bricks = [
                Brick::new(3, 3, BrickKind::Normal),
                Brick::new(7, 4, BrickKind::Durable),
                Brick::new(11, 2, BrickKind::Indestructible),
            ];
            let ball = Ball {
                pos: DVec2::new(x, y),
                vel: DVec2::new(angle.cos(), angle.sin()) * speed,
                speed,
                attached: false,
            };
            let result = resolve(&ball, &paddle, &bricks, &board);
            let v = result.ball.vel;
            prop_assert!((v.length_squared() - speed * speed).abs() < 1e-9);
        }
    }
}
