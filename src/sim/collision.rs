//! Collision detection and response
//!
//! The ball is treated as a point moving along its travel segment, from the
//! center it had last frame (`center - vel`) to the center it has now. Each
//! check finds which edge of an overlapping rectangle that segment crosses and
//! flips the matching velocity axis. Speed is never rescaled.

use glam::Vec2;

use super::geometry::{Rect, Segment};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::GameConfig;

/// Which velocity component a bounce inverts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Flip one component of `vel`
#[inline]
pub fn reflect(vel: &mut Vec2, axis: Axis) {
    match axis {
        Axis::Horizontal => vel.x = -vel.x,
        Axis::Vertical => vel.y = -vel.y,
    }
}

/// The ball's motion over the last step
pub fn travel_segment(state: &GameState, config: &GameConfig) -> Segment {
    let center = state.ball.center(config);
    Segment::new(center, center - state.ball.vel)
}

/// First edge (in the given order) crossed by `travel`
fn first_crossed_edge(travel: &Segment, edges: &[(Segment, Axis)]) -> Option<Axis> {
    edges
        .iter()
        .find(|(edge, _)| travel.intersects(edge))
        .map(|&(_, axis)| axis)
}

/// Bounce the ball off the paddle.
///
/// A bounce sets `paddle.collided`, and the next call only clears the flag.
/// That keeps a ball that is still inside the paddle box from reflecting again
/// on the following frame.
pub fn check_paddle(state: &mut GameState, config: &GameConfig) {
    if state.paddle.collided {
        state.paddle.collided = false;
        return;
    }

    let paddle = state.paddle.bounds(config);
    if !state.ball.bounds(config).overlaps(&paddle) {
        return;
    }

    let travel = travel_segment(state, config);
    let edges = [
        (paddle.top_edge(), Axis::Vertical),
        (paddle.left_edge(), Axis::Horizontal),
        (paddle.right_edge(), Axis::Horizontal),
    ];

    if let Some(axis) = first_crossed_edge(&travel, &edges) {
        reflect(&mut state.ball.vel, axis);
        state.paddle.collided = true;
        state.emit(GameEvent::PaddleBounce);
        log::debug!("Paddle bounce ({axis:?})");
    }
}

/// Bounce the ball off bricks and destroy at most one of them.
///
/// Every visible brick the ball overlaps gets its own edge test and its own
/// velocity flip, but only the last one hit in grid order is removed.
pub fn check_bricks(state: &mut GameState, config: &GameConfig) {
    let ball = state.ball.bounds(config);

    let mut hit_index = None;
    for brick in state.bricks.visible() {
        let bounds: Rect = brick.bounds(config);
        if !ball.overlaps(&bounds) {
            continue;
        }

        // Rebuilt per brick: an earlier hit this step may have flipped the velocity
        let center = ball.center();
        let travel = Segment::new(center, center - state.ball.vel);
        let edges = [
            (bounds.bottom_edge(), Axis::Vertical),
            (bounds.top_edge(), Axis::Vertical),
            (bounds.left_edge(), Axis::Horizontal),
            (bounds.right_edge(), Axis::Horizontal),
        ];
        if let Some(axis) = first_crossed_edge(&travel, &edges) {
            reflect(&mut state.ball.vel, axis);
            hit_index = Some(brick.index);
        }
    }

    let Some(index) = hit_index else {
        return;
    };

    if state.bricks.hide(index) {
        state.current_score += 1;
    }
    state.emit(GameEvent::BrickBreak);
    log::debug!(
        "Brick {index} destroyed, score {}, {} left",
        state.current_score,
        state.bricks.remaining()
    );

    if state.bricks.all_cleared() {
        state.phase = GamePhase::Passed;
        state.emit(GameEvent::Win);
        log::info!("All bricks cleared with score {}", state.current_score);
    }
}

/// Bounce off the side and top walls; fail when the ball leaves the bottom.
///
/// The three conditions are independent and may all fire in one frame.
pub fn check_walls(state: &mut GameState, config: &GameConfig) {
    let max_x = config.screen.width - config.ball.width;
    let max_y = config.screen.height - config.ball.height;
    let pos = state.ball.pos;

    if pos.x < 0.0 || pos.x > max_x {
        reflect(&mut state.ball.vel, Axis::Horizontal);
        state.emit(GameEvent::WallBounce);
    }

    if pos.y < 0.0 {
        reflect(&mut state.ball.vel, Axis::Vertical);
        state.emit(GameEvent::WallBounce);
    }

    if pos.y > max_y {
        state.phase = GamePhase::Failed;
        state.emit(GameEvent::Loss);
        log::info!("Ball lost with score {}", state.current_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;
    use crate::consts::DEFAULT_SEED;
    use proptest::prelude::*;

    fn setup() -> (GameConfig, GameState) {
        let config = GameConfig::build(Viewport::new(1280.0, 720.0), DEFAULT_SEED);
        let state = GameState::new(&config, 0, false);
        (config, state)
    }

    /// Put the ball's center at `center`, moving with `vel`
    fn place_ball(state: &mut GameState, config: &GameConfig, center: Vec2, vel: Vec2) {
        state.ball.pos = center - config.ball.size() / 2.0;
        state.ball.vel = vel;
    }

    #[test]
    fn test_left_wall_flips_horizontal_only() {
        let (config, mut state) = setup();
        state.ball.pos = Vec2::new(-0.5, 50.0);
        state.ball.vel = Vec2::new(-5.0, 7.0);

        check_walls(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(5.0, 7.0));
        assert_eq!(state.events, vec![GameEvent::WallBounce]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let (config, mut state) = setup();
        state.ball.pos = Vec2::new(config.screen.width, -1.0);
        state.ball.vel = Vec2::new(3.0, -4.0);

        check_walls(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(-3.0, 4.0));
        assert_eq!(state.events, vec![GameEvent::WallBounce, GameEvent::WallBounce]);
    }

    #[test]
    fn test_bottom_fails() {
        let (config, mut state) = setup();
        state.ball.pos = Vec2::new(100.0, config.screen.height - config.ball.height + 0.1);
        let vel = state.ball.vel;

        check_walls(&mut state, &config);

        assert_eq!(state.phase, GamePhase::Failed);
        assert_eq!(state.ball.vel, vel);
        assert_eq!(state.events, vec![GameEvent::Loss]);
    }

    #[test]
    fn test_paddle_top_bounce() {
        let (config, mut state) = setup();
        let paddle = state.paddle.bounds(&config);
        // Center crossed the top edge this frame
        let center = Vec2::new(paddle.center().x, paddle.top() + 2.0);
        place_ball(&mut state, &config, center, Vec2::new(3.0, 6.0));

        check_paddle(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(3.0, -6.0));
        assert!(state.paddle.collided);
        assert_eq!(state.events, vec![GameEvent::PaddleBounce]);
    }

    #[test]
    fn test_paddle_side_bounce() {
        let (config, mut state) = setup();
        let paddle = state.paddle.bounds(&config);
        // Coming in sideways below the top edge
        let center = Vec2::new(paddle.left() + 2.0, paddle.top() + 10.0);
        place_ball(&mut state, &config, center, Vec2::new(6.0, 1.0));

        check_paddle(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(-6.0, 1.0));
        assert!(state.paddle.collided);
    }

    #[test]
    fn test_paddle_debounce_skips_frame() {
        let (config, mut state) = setup();
        let paddle = state.paddle.bounds(&config);
        let center = Vec2::new(paddle.center().x, paddle.top() + 2.0);
        place_ball(&mut state, &config, center, Vec2::new(3.0, 6.0));
        state.paddle.collided = true;

        check_paddle(&mut state, &config);

        assert!(!state.paddle.collided, "flag cleared");
        assert_eq!(state.ball.vel, Vec2::new(3.0, 6.0), "no reflection");
        assert!(state.events.is_empty());

        // The frame after that responds again
        check_paddle(&mut state, &config);
        assert_eq!(state.ball.vel, Vec2::new(3.0, -6.0));
    }

    #[test]
    fn test_paddle_miss_without_overlap() {
        let (config, mut state) = setup();
        place_ball(&mut state, &config, Vec2::new(20.0, 100.0), Vec2::new(3.0, 6.0));

        check_paddle(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(3.0, 6.0));
        assert!(!state.paddle.collided);
    }

    #[test]
    fn test_brick_bottom_hit() {
        let (config, mut state) = setup();
        // Bottom row, column 4: nothing below it
        let brick = state.bricks.rows[5][4].clone();
        let bounds = brick.bounds(&config);
        let center = Vec2::new(bounds.center().x, bounds.bottom() - 2.0);
        place_ball(&mut state, &config, center, Vec2::new(2.0, -6.0));

        check_bricks(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(2.0, 6.0));
        assert_eq!(state.current_score, 1);
        assert!(!state.bricks.rows[5][4].show);
        assert_eq!(state.bricks.hidden(), 1);
        assert_eq!(state.events, vec![GameEvent::BrickBreak]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hidden_brick_ignored() {
        let (config, mut state) = setup();
        let bounds = state.bricks.rows[5][4].bounds(&config);
        state.bricks.hide(state.bricks.rows[5][4].index);
        let center = Vec2::new(bounds.center().x, bounds.bottom() - 2.0);
        place_ball(&mut state, &config, center, Vec2::new(2.0, -6.0));

        check_bricks(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(2.0, -6.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_two_bricks_only_last_destroyed() {
        let (config, mut state) = setup();
        let upper = state.bricks.rows[4][4].clone();
        let lower = state.bricks.rows[5][4].clone();
        let upper_bounds = upper.bounds(&config);
        let lower_bounds = lower.bounds(&config);
        assert!(upper.index < lower.index);

        // Center rests on the upper brick's bottom edge, moving down. The upper
        // brick flips vy upward, and the rebuilt segment then runs down across
        // the lower brick's top edge, which flips vy back.
        let center = Vec2::new(upper_bounds.center().x, upper_bounds.bottom());
        let vel = Vec2::new(0.0, 12.0);
        place_ball(&mut state, &config, center, vel);
        assert!(state.ball.bounds(&config).overlaps(&upper_bounds));
        assert!(state.ball.bounds(&config).overlaps(&lower_bounds));

        check_bricks(&mut state, &config);

        // Two vertical flips cancel out
        assert_eq!(state.ball.vel, vel);
        // Only the later brick in grid order is destroyed
        assert!(state.bricks.rows[4][4].show);
        assert!(!state.bricks.rows[5][4].show);
        assert_eq!(state.bricks.hidden(), 1);
        assert_eq!(state.current_score, 1);
        assert_eq!(state.events, vec![GameEvent::BrickBreak]);
    }

    #[test]
    fn test_flip_away_from_neighbour_skips_it() {
        let (config, mut state) = setup();
        let left = state.bricks.rows[5][4].bounds(&config);
        let right = state.bricks.rows[5][5].bounds(&config);

        // Leftward travel across the gutter: the left brick's right edge flips
        // vx, and the rebuilt segment points away from the right brick
        let gap = right.left() - left.right();
        let center = Vec2::new(left.right() - 2.0, left.top() + 13.0);
        place_ball(&mut state, &config, center, Vec2::new(-(gap + 5.0), 0.0));

        check_bricks(&mut state, &config);

        assert_eq!(state.ball.vel, Vec2::new(gap + 5.0, 0.0));
        assert!(!state.bricks.rows[5][4].show);
        assert!(state.bricks.rows[5][5].show);
        assert_eq!(state.current_score, 1);
    }

    #[test]
    fn test_last_brick_wins_game() {
        let (config, mut state) = setup();
        let target = state.bricks.rows[5][0].index;
        for row in &mut state.bricks.rows {
            for brick in row.iter_mut() {
                if brick.index != target {
                    brick.show = false;
                }
            }
        }
        state.current_score = (state.bricks.len() - 1) as u32;

        let bounds = state.bricks.rows[5][0].bounds(&config);
        let center = Vec2::new(bounds.center().x, bounds.bottom() - 2.0);
        place_ball(&mut state, &config, center, Vec2::new(1.0, -6.0));

        check_bricks(&mut state, &config);

        assert_eq!(state.phase, GamePhase::Passed);
        assert_eq!(state.current_score, config.brick_count());
        assert_eq!(state.events, vec![GameEvent::BrickBreak, GameEvent::Win]);
    }

    proptest! {
        #[test]
        fn reflections_preserve_speed(
            x in -20.0f32..1300.0,
            y in -20.0f32..640.0,
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
            collided in any::<bool>(),
        ) {
            let (config, mut state) = setup();
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(vx, vy);
            state.paddle.collided = collided;
            let speed = state.ball.vel.length();

            check_paddle(&mut state, &config);
            check_bricks(&mut state, &config);
            check_walls(&mut state, &config);

            prop_assert_eq!(state.ball.vel.x.abs(), vx.abs());
            prop_assert_eq!(state.ball.vel.y.abs(), vy.abs());
            prop_assert!((state.ball.vel.length() - speed).abs() <= 1e-5);
            prop_assert_eq!(state.current_score as usize, state.bricks.hidden());
        }
    }
}
