//! Session configuration derived from the viewport
//!
//! The config is computed once at startup and never mutated while playing.
//! A restart reuses it, including the launch angle rolled for the session.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::renderer::vertex::colors;

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas size: the viewport minus the page margin
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.width - CANVAS_MARGIN, self.height - CANVAS_MARGIN)
    }

    pub fn meets_minimum(&self) -> bool {
        self.width >= MIN_SCREEN_WIDTH && self.height >= MIN_SCREEN_HEIGHT
    }
}

/// The only failure that can stop the game from starting
#[derive(Debug, Clone, PartialEq)]
pub enum StartupError {
    ViewportTooSmall { width: f32, height: f32 },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::ViewportTooSmall { .. } => write!(
                f,
                "Please resize the window to at least {}x{}",
                MIN_SCREEN_WIDTH, MIN_SCREEN_HEIGHT
            ),
        }
    }
}

impl std::error::Error for StartupError {}

/// Playfield dimensions (below the header)
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
}

#[derive(Debug, Clone)]
pub struct BrickConfig {
    pub rows: u32,
    pub bricks_per_row: u32,
    pub width: f32,
    pub height: f32,
    /// Space between neighbouring cells on both axes
    pub gutter: f32,
    /// Offset of the first cell from the playfield origin
    pub origin: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Displacement per arrow key press
    pub step: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub struct BallConfig {
    pub width: f32,
    pub height: f32,
    /// Launch vector; the ball starts with its negation so it heads upward
    pub launch_velocity: Vec2,
    pub color: [f32; 4],
}

impl BallConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Immutable per-session configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub bricks: BrickConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
}

impl GameConfig {
    /// Derive the session config, refusing viewports below the minimum size
    pub fn from_viewport(viewport: Viewport, seed: u64) -> Result<Self, StartupError> {
        if !viewport.meets_minimum() {
            log::warn!(
                "Viewport {}x{} is below the {}x{} minimum",
                viewport.width,
                viewport.height,
                MIN_SCREEN_WIDTH,
                MIN_SCREEN_HEIGHT
            );
            return Err(StartupError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self::build(viewport, seed))
    }

    /// Derive the config without checking the minimum size
    pub fn build(viewport: Viewport, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let launch_velocity = launch_velocity(&mut rng, BALL_SPEED);

        let (canvas_w, canvas_h) = viewport.canvas_size();
        let per_row = BRICKS_PER_ROW as f32;

        Self {
            screen: ScreenConfig {
                width: canvas_w,
                height: canvas_h - HEADER_HEIGHT,
                header_height: HEADER_HEIGHT,
            },
            bricks: BrickConfig {
                rows: BRICK_ROWS,
                bricks_per_row: BRICKS_PER_ROW,
                // Sized from the raw viewport width, leaving slack for the gutters
                width: (viewport.width - per_row * 6.0) / per_row,
                height: BRICK_HEIGHT,
                gutter: BRICK_GUTTER,
                origin: BRICK_ORIGIN,
                color: colors::BRICK,
            },
            paddle: PaddleConfig {
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
                step: PADDLE_STEP,
                color: colors::PADDLE,
            },
            ball: BallConfig {
                width: BALL_SIZE,
                height: BALL_SIZE,
                launch_velocity,
                color: colors::BALL,
            },
        }
    }

    /// Total number of bricks in a fresh grid
    pub fn brick_count(&self) -> u32 {
        self.bricks.rows * self.bricks.bricks_per_row
    }

    /// Canvas size (playfield plus header)
    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.screen.width,
            self.screen.height + self.screen.header_height,
        )
    }
}

/// Fixed-magnitude vector at a uniform angle in [45°, 135°) from horizontal
fn launch_velocity(rng: &mut impl Rng, speed: f32) -> Vec2 {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    let angle = rng.random_range(0.0..FRAC_PI_2) + FRAC_PI_4;
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}
