//! Game state and entity initialization
//!
//! Everything the frame loop mutates lives in `GameState`. A restart throws
//! the whole value away and builds a new one from the config.

use glam::Vec2;

use super::geometry::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, waiting for any key
    InMenu,
    /// Active gameplay
    Playing,
    /// Ball fell past the paddle (terminal)
    Failed,
    /// Every brick cleared (terminal)
    Passed,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Failed | GamePhase::Passed)
    }
}

/// One-shot cues emitted by the simulation, drained by the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickBreak,
    GameStart,
    WallBounce,
    PaddleBounce,
    Loss,
    Win,
}

/// The ball. `pos` is the top-left of its bounding box.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Centered horizontally, just above the paddle, heading upward
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.screen.width / 2.0, paddle_top(config) - BALL_SPAWN_LIFT),
            vel: -config.ball.launch_velocity,
        }
    }

    pub fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::new(self.pos, config.ball.size())
    }

    pub fn center(&self, config: &GameConfig) -> Vec2 {
        self.pos + config.ball.size() / 2.0
    }
}

/// The player's paddle. `pos` is its top-left corner.
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    /// Set on a bounce; the next paddle check clears it and does nothing else
    pub collided: bool,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.screen.width / 2.0 - config.paddle.width / 2.0,
                paddle_top(config),
            ),
            collided: false,
        }
    }

    pub fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::new(
            self.pos,
            Vec2::new(config.paddle.width, config.paddle.height),
        )
    }

    /// Largest x that keeps the paddle fully on screen
    pub fn max_x(config: &GameConfig) -> f32 {
        (config.screen.width - config.paddle.width).max(0.0)
    }

    pub fn move_left(&mut self, config: &GameConfig) {
        self.pos.x = (self.pos.x - config.paddle.step).max(0.0);
    }

    pub fn move_right(&mut self, config: &GameConfig) {
        self.pos.x = (self.pos.x + config.paddle.step).min(Self::max_x(config));
    }
}

fn paddle_top(config: &GameConfig) -> f32 {
    config.screen.height - PADDLE_BOTTOM_OFFSET - CANVAS_PADDING
}

/// A single brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub pos: Vec2,
    /// Unique across the grid, row-major
    pub index: u32,
    /// Visible and collidable. Goes false once and stays false.
    pub show: bool,
}

impl Brick {
    pub fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::new(
            self.pos,
            Vec2::new(config.bricks.width, config.bricks.height),
        )
    }
}

/// Bricks in row-major order
#[derive(Debug, Clone)]
pub struct BrickGrid {
    pub rows: Vec<Vec<Brick>>,
}

impl BrickGrid {
    pub fn new(config: &GameConfig) -> Self {
        let bricks = &config.bricks;
        let mut index = 0;

        let rows = (0..bricks.rows)
            .map(|i| {
                (0..bricks.bricks_per_row)
                    .map(|j| {
                        let (i, j) = (i as f32, j as f32);
                        let brick = Brick {
                            pos: Vec2::new(
                                bricks.origin + j * bricks.width + j * bricks.gutter,
                                bricks.origin + i * bricks.height + i * bricks.gutter,
                            ),
                            index,
                            show: true,
                        };
                        index += 1;
                        brick
                    })
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// All bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.rows.iter().flatten()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Brick> {
        self.iter().filter(|b| b.show)
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining(&self) -> usize {
        self.visible().count()
    }

    pub fn hidden(&self) -> usize {
        self.len() - self.remaining()
    }

    pub fn all_cleared(&self) -> bool {
        self.iter().all(|b| !b.show)
    }

    /// Hide the brick with `index`. Returns false if it was already hidden or unknown.
    pub fn hide(&mut self, index: u32) -> bool {
        match self.rows.iter_mut().flatten().find(|b| b.index == index) {
            Some(brick) if brick.show => {
                brick.show = false;
                true
            }
            _ => false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Bricks destroyed this game
    pub current_score: u32,
    /// Best score on record (persisted)
    pub max_score: u32,
    /// Set when leaving the menu; the next frame emits `GameStart`
    pub start_pending: bool,
    /// Cues produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh game, either at the start menu or straight into play
    pub fn new(config: &GameConfig, max_score: u32, in_menu: bool) -> Self {
        Self {
            phase: if in_menu {
                GamePhase::InMenu
            } else {
                GamePhase::Playing
            },
            ball: Ball::new(config),
            paddle: Paddle::new(config),
            bricks: BrickGrid::new(config),
            current_score: 0,
            max_score,
            start_pending: false,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending cues
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn in_menu(&self) -> bool {
        self.phase == GamePhase::InMenu
    }

    pub fn failed(&self) -> bool {
        self.phase == GamePhase::Failed
    }

    pub fn passed(&self) -> bool {
        self.phase == GamePhase::Passed
    }
}
