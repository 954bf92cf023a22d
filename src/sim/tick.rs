//! Fixed timestep simulation tick
//!
//! Input is applied first, then the ball moves and collisions resolve,
//! then level completion is checked. Rendering reads the state afterwards.

use log::debug;

use super::collision::{CollisionEvent, resolve};
use super::level::Level;
use super::state::{GamePhase, Outcome, Session};
use crate::consts::LEVEL_CAP;
use crate::error::Result;
use crate::level_name;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Net paddle movement in columns (negative = left)
    pub paddle_delta: i32,
    /// Launch an attached ball
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Reset the level's bricks
    pub restart: bool,
}

impl TickInput {
    /// Fold a gameplay key into this tick's input.
    /// Returns false for keys that mean nothing during play.
    pub fn press(&mut self, key: char) -> bool {
        match key {
            'a' => self.paddle_delta -= 1,
            'd' => self.paddle_delta += 1,
            ' ' => self.launch = true,
            'p' => self.pause = true,
            'r' => self.restart = true,
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the session by one fixed tick
pub fn tick(state: &mut Session, input: &TickInput) -> CollisionEvent {
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return CollisionEvent::None;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                return CollisionEvent::None;
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return CollisionEvent::None;
    }

    if input.restart {
        state.restart_level();
    }
    if input.paddle_delta != 0 {
        state.move_paddle(input.paddle_delta);
    }
    if input.launch && state.launch() {
        debug!("ball launched with velocity {:?}", state.ball.vel);
    }

    let mut event = CollisionEvent::None;
    if state.ball.attached {
        state.ball.follow(&state.paddle, &state.board);
    } else {
        state.ball.integrate();
        let result = resolve(&state.ball, &state.paddle, &state.bricks, &state.board);
        state.ball = result.ball;
        if let Some(contact) = result.contact {
            state.bricks[contact.index] = contact.brick;
            state.score += contact.score;
            debug!(
                "brick at ({}, {}) {:?}, score {}",
                contact.brick.x, contact.brick.y, result.event, state.score
            );
        }
        if result.event == CollisionEvent::BallLost {
            lose_ball(state);
        }
        event = result.event;
    }

    if state.phase == GamePhase::Running && state.is_level_complete() {
        debug!("level {} complete", state.level);
        state.phase = GamePhase::LevelTransition;
    }

    event
}

/// Take a life; re-attach the ball or end the run
fn lose_ball(state: &mut Session) {
    state.lives -= 1;
    debug!("ball lost, {} lives left", state.lives);
    if state.lives <= 0 {
        state.phase = GamePhase::Terminated(Outcome::Defeat);
    } else {
        state.ball.attach(&state.paddle, &state.board);
    }
}

/// Move past a completed level.
///
/// Past the level cap the run ends in victory; otherwise the next level
/// record is fetched with `load` and play resumes with score and lives
/// intact. A failed load ends the run and is returned to the caller.
pub fn advance_level<F>(state: &mut Session, load: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<Level>,
{
    state.level = state.level.saturating_add(1);
    if state.level > LEVEL_CAP {
        state.phase = GamePhase::Terminated(Outcome::Victory);
        return Ok(());
    }

    match load(&level_name(state.level)) {
        Ok(level) => {
            debug!("entering level {}", state.level);
            state.enter_level(level);
            Ok(())
        }
        Err(err) => {
            state.phase = GamePhase::Terminated(Outcome::LoadFailed);
            Err(err)
        }
    }
}
