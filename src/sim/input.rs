//! Keyboard input
//!
//! Only the two arrow keys mean anything during play. Any key at all leaves
//! the menu or restarts after the game ends.

use super::state::{GamePhase, GameState};
use crate::config::GameConfig;

/// A key press, reduced to what the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            _ => Key::Other,
        }
    }
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Left the menu; the start cue plays on the next frame
    Started,
    /// Replaced a finished game with a fresh one
    Restarted,
    /// Paddle moved (or was already against the wall)
    Moved,
    Ignored,
}

/// Apply a key press to the state
pub fn handle_key(state: &mut GameState, config: &GameConfig, key: Key) -> KeyOutcome {
    match state.phase {
        GamePhase::InMenu => {
            state.phase = GamePhase::Playing;
            state.start_pending = true;
            log::info!("Game started");
            KeyOutcome::Started
        }
        GamePhase::Failed | GamePhase::Passed => {
            // max_score already reflects anything persisted this game
            *state = GameState::new(config, state.max_score, false);
            log::info!("Game restarted");
            KeyOutcome::Restarted
        }
        GamePhase::Playing => match key {
            Key::Left => {
                state.paddle.move_left(config);
                KeyOutcome::Moved
            }
            Key::Right => {
                state.paddle.move_right(config);
                KeyOutcome::Moved
            }
            Key::Other => KeyOutcome::Ignored,
        },
    }
}
