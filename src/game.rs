//! Game session
//!
//! Owns the config, the live state and the score store, and runs one frame
//! of the state machine per display refresh.

use crate::config::GameConfig;
use crate::highscores::ScoreStore;
use crate::persistence::Storage;
use crate::renderer::scene::{self, Scene};
use crate::sim::{self, FrameOutcome, GameEvent, GameState, Key, KeyOutcome};

/// A running session
pub struct Game<S: Storage> {
    config: GameConfig,
    state: GameState,
    scores: ScoreStore<S>,
}

impl<S: Storage> Game<S> {
    /// New session sitting at the start menu
    pub fn new(config: GameConfig, storage: S) -> Self {
        let scores = ScoreStore::load(storage);
        let state = GameState::new(&config, scores.best(), true);
        log::info!(
            "Game ready: {} bricks, screen {}x{}",
            config.brick_count(),
            config.screen.width,
            config.screen.height
        );
        Self {
            config,
            state,
            scores,
        }
    }

    /// Advance one frame and describe what to draw
    pub fn frame(&mut self) -> Scene {
        if let FrameOutcome::Ended(phase) = sim::frame(&mut self.state, &self.config) {
            let score = self.state.current_score;
            if score > self.state.max_score {
                // Persist first; max_score then blocks further writes this game
                self.scores.record(score);
                self.state.max_score = score;
                log::info!("{phase:?} with new best score {score}");
            }
        }
        scene::compose(&self.state, &self.config)
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        sim::handle_key(&mut self.state, &self.config, key)
    }

    /// Sound cues emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;
    use crate::consts::DEFAULT_SEED;
    use crate::persistence::MemoryStorage;
    use crate::sim::GamePhase;
    use glam::Vec2;

    fn new_game(storage: MemoryStorage) -> Game<MemoryStorage> {
        let config = GameConfig::build(Viewport::new(1280.0, 720.0), DEFAULT_SEED);
        Game::new(config, storage)
    }

    #[test]
    fn test_starts_in_menu_with_stored_best() {
        let mut game = new_game(MemoryStorage::with_item("max-score", "7"));
        assert_eq!(game.state().phase, GamePhase::InMenu);
        assert_eq!(game.state().max_score, 7);

        // Menu frames do not move anything
        let ball = game.state().ball.pos;
        let scene = game.frame();
        assert_eq!(game.state().ball.pos, ball);
        assert!(scene.texts().any(|t| t == "Press any key to start"));
    }

    #[test]
    fn test_start_cue_on_first_frame() {
        let mut game = new_game(MemoryStorage::new());
        assert_eq!(game.handle_key(Key::Other), KeyOutcome::Started);
        assert!(game.drain_events().is_empty());

        game.frame();
        let events = game.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::GameStart));

        game.frame();
        assert!(!game.drain_events().contains(&GameEvent::GameStart));
    }

    #[test]
    fn test_new_high_score_written_once() {
        let mut game = new_game(MemoryStorage::with_item("max-score", "5"));
        game.handle_key(Key::Other);
        game.state_mut().phase = GamePhase::Failed;
        game.state_mut().current_score = 6;

        game.frame();
        game.frame();
        game.frame();

        assert_eq!(game.state().max_score, 6);
        assert_eq!(game.scores().best(), 6);
        assert_eq!(game.scores().storage().writes(), 1);
        assert_eq!(
            game.scores().storage().get_item("max-score").as_deref(),
            Some("6")
        );
    }

    #[test]
    fn test_lower_score_not_written() {
        let mut game = new_game(MemoryStorage::with_item("max-score", "5"));
        game.handle_key(Key::Other);
        game.state_mut().phase = GamePhase::Passed;
        game.state_mut().current_score = 4;

        let scene = game.frame();
        assert_eq!(game.scores().storage().writes(), 0);
        assert_eq!(game.state().max_score, 5);
        assert!(scene.texts().any(|t| t == "YOU WON!"));
    }

    #[test]
    fn test_failed_state_stops_stepping() {
        let mut game = new_game(MemoryStorage::new());
        game.handle_key(Key::Other);
        game.state_mut().ball.pos = Vec2::new(100.0, 590.0);
        game.state_mut().ball.vel = Vec2::new(0.0, 12.0);

        game.frame();
        assert_eq!(game.state().phase, GamePhase::Failed);
        assert!(game.drain_events().contains(&GameEvent::Loss));

        let frozen = game.state().ball.pos;
        let scene = game.frame();
        assert_eq!(game.state().ball.pos, frozen);
        assert!(scene.texts().any(|t| t == "GAME OVER!"));
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut game = new_game(MemoryStorage::new());
        game.handle_key(Key::Other);
        game.state_mut().phase = GamePhase::Failed;
        game.state_mut().current_score = 3;
        game.frame();

        assert_eq!(game.handle_key(Key::Left), KeyOutcome::Restarted);
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(game.state().current_score, 0);
        assert_eq!(game.state().max_score, 3);
    }
}
