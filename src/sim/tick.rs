//! Per-frame simulation
//!
//! There is no fixed timestep: each display refresh runs exactly one step and
//! the ball moves by its full velocity, so game speed follows the refresh rate.

use super::collision::{check_bricks, check_paddle, check_walls};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::GameConfig;

/// What a frame did with the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Start menu is up; nothing moved
    Menu,
    /// One simulation step ran
    Stepped,
    /// Game is over (failed or passed); nothing moved
    Ended(GamePhase),
}

/// Advance the ball by one step.
///
/// Collision checks run in a fixed order, each seeing the velocity the
/// previous one left behind, and only then is the position integrated.
pub fn step(state: &mut GameState, config: &GameConfig) {
    check_paddle(state, config);
    check_bricks(state, config);
    check_walls(state, config);

    state.ball.pos += state.ball.vel;
}

/// Run one frame of the state machine
pub fn frame(state: &mut GameState, config: &GameConfig) -> FrameOutcome {
    if state.start_pending {
        state.start_pending = false;
        state.emit(GameEvent::GameStart);
    }

    match state.phase {
        GamePhase::Failed | GamePhase::Passed => FrameOutcome::Ended(state.phase),
        GamePhase::InMenu => FrameOutcome::Menu,
        GamePhase::Playing => {
            step(state, config);
            FrameOutcome::Stepped
        }
    }
}
