//! Brick Breaker - a classic ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (geometry, collisions, game state, input)
//! - `game`: Frame loop owner tying simulation, persistence and rendering together
//! - `renderer`: Scene composition and the WebGPU pipeline
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `config`: Session configuration derived from the viewport

pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, StartupError, Viewport};
pub use game::Game;
pub use highscores::ScoreStore;

/// Game configuration constants
pub mod consts {
    /// Space between the viewport and the canvas (both axes)
    pub const CANVAS_MARGIN: f32 = 20.0;
    /// Gap between the paddle and the bottom of the playfield
    pub const CANVAS_PADDING: f32 = 10.0;

    /// Smallest viewport the game will start in
    pub const MIN_SCREEN_WIDTH: f32 = 800.0;
    pub const MIN_SCREEN_HEIGHT: f32 = 400.0;

    /// Score header drawn above the playfield
    pub const HEADER_HEIGHT: f32 = 100.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 6;
    pub const BRICKS_PER_ROW: u32 = 20;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GUTTER: f32 = 5.0;
    pub const BRICK_ORIGIN: f32 = 2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal displacement per arrow key press
    pub const PADDLE_STEP: f32 = 50.0;
    /// Paddle top sits this far above the padding line
    pub const PADDLE_BOTTOM_OFFSET: f32 = 20.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 16.0;
    /// Pixels per frame
    pub const BALL_SPEED: f32 = 12.0;
    /// Ball spawns this far above the paddle
    pub const BALL_SPAWN_LIFT: f32 = 20.0;

    /// Seed used when no clock is available (native runs, tests)
    pub const DEFAULT_SEED: u64 = 0x0b51_c4a7;
}
