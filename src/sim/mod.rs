//! Simulation module
//!
//! All gameplay logic lives here and is free of platform dependencies:
//! - Geometry is exact (no epsilons)
//! - The only randomness is the launch angle, fixed in the config
//! - Side effects leave as `GameEvent`s for the caller to act on

pub mod collision;
pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{check_bricks, check_paddle, check_walls};
pub use geometry::{Orientation, Rect, Segment, on_segment, orientation, segments_intersect};
pub use input::{Key, KeyOutcome, handle_key};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{FrameOutcome, frame, step};
