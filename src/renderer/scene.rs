//! Immediate-mode scene description
//!
//! A frame is composed as a list of draw commands in canvas pixels, then
//! tessellated into triangles for the GPU. Keeping the two steps apart lets
//! the frame contents be inspected without a device.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::config::{GameConfig, StartupError, Viewport};
use crate::sim::{GamePhase, GameState};

/// Segments used to tessellate the ball
const CIRCLE_SEGMENTS: u32 = 32;
/// Drop shadow offset for bricks and paddle
const SHADOW_OFFSET: f32 = 2.0;
/// Header border width
const HEADER_BORDER: f32 = 8.0;
/// Distance of the score text from the right edge
const SCORE_INSET: f32 = 20.0;

/// Horizontal anchor of a text command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        line_width: f32,
        color: [f32; 4],
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// `pos` is the anchor point on the baseline
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: Align,
        color: [f32; 4],
    },
}

/// Draw commands for one frame, in painter's order
#[derive(Debug, Clone)]
pub struct Scene {
    width: f32,
    height: f32,
    /// Translation applied to everything pushed from now on
    offset: Vec2,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Shift the origin for subsequent commands
    pub fn translate(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.commands.push(DrawCommand::FillRect {
            pos: pos + self.offset,
            size,
            color,
        });
    }

    pub fn stroke_rect(&mut self, pos: Vec2, size: Vec2, line_width: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::StrokeRect {
            pos: pos + self.offset,
            size,
            line_width,
            color,
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.commands.push(DrawCommand::FillCircle {
            center: center + self.offset,
            radius,
            color,
        });
    }

    pub fn text(&mut self, text: &str, pos: Vec2, size: f32, align: Align, color: [f32; 4]) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos: pos + self.offset,
            size,
            align,
            color,
        });
    }

    /// Text strings in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Convert every command to triangles in canvas pixels
    pub fn tessellate(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::FillRect { pos, size, color } => {
                    vertices.extend(shapes::rect(*pos, *size, *color));
                }
                DrawCommand::StrokeRect {
                    pos,
                    size,
                    line_width,
                    color,
                } => {
                    vertices.extend(shapes::stroke_rect(*pos, *size, *line_width, *color));
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    vertices.extend(shapes::circle(*center, *radius, *color, CIRCLE_SEGMENTS));
                }
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    align,
                    color,
                } => {
                    let width = shapes::text_width(text, *size);
                    let x = match align {
                        Align::Left => pos.x,
                        Align::Center => pos.x - width / 2.0,
                        Align::Right => pos.x - width,
                    };
                    vertices.extend(shapes::text(text, Vec2::new(x, pos.y), *size, *color));
                }
            }
        }
        vertices
    }
}

/// Build the frame for the current state
pub fn compose(state: &GameState, config: &GameConfig) -> Scene {
    let (width, height) = config.canvas_size();
    let mut scene = Scene::new(width, height);

    // Playfield coordinates from here on; the header sits at negative y
    scene.translate(Vec2::new(0.0, config.screen.header_height));

    draw_header(&mut scene, state, config);
    scene.fill_rect(
        Vec2::ZERO,
        Vec2::new(config.screen.width, config.screen.height),
        colors::BACKGROUND,
    );

    scene.fill_circle(
        state.ball.center(config),
        config.ball.width / 2.0,
        config.ball.color,
    );

    let brick_size = Vec2::new(config.bricks.width, config.bricks.height);
    for brick in state.bricks.visible() {
        draw_with_shadow(&mut scene, brick.pos, brick_size, config.bricks.color);
    }

    draw_with_shadow(
        &mut scene,
        state.paddle.pos,
        Vec2::new(config.paddle.width, config.paddle.height),
        config.paddle.color,
    );

    match state.phase {
        GamePhase::Failed => draw_game_over(&mut scene, &["GAME OVER!"]),
        GamePhase::Passed => draw_game_over(&mut scene, &["YOU WON!"]),
        GamePhase::InMenu => draw_menu(
            &mut scene,
            &["Press any key to start", "Use arrow keys to move"],
        ),
        GamePhase::Playing => {}
    }

    scene
}

/// The one-off frame shown when the game cannot start
pub fn startup_notice(viewport: Viewport, error: &StartupError) -> Scene {
    let (width, height) = viewport.canvas_size();
    let mut scene = Scene::new(width, height);
    scene.fill_rect(Vec2::ZERO, Vec2::new(width, height), colors::OVERLAY_LIGHT);

    let message = error.to_string();
    // Shrink to fit; the canvas is narrow by definition here
    let size = 60.0_f32.min(width / shapes::text_width(&message, 1.0).max(f32::EPSILON));
    scene.text(
        &message,
        Vec2::new(width / 2.0, height / 2.0),
        size,
        Align::Center,
        colors::TEXT,
    );
    scene
}

fn draw_header(scene: &mut Scene, state: &GameState, config: &GameConfig) {
    let header = config.screen.header_height;
    let pos = Vec2::new(0.0, -header);
    let size = Vec2::new(scene.width(), header);

    scene.fill_rect(pos, size, colors::HEADER);
    scene.stroke_rect(pos, size, HEADER_BORDER, colors::ACCENT);

    let right = scene.width() - SCORE_INSET;
    scene.text(
        &format!("Score: {:03}", state.current_score),
        Vec2::new(right, -50.0),
        50.0,
        Align::Right,
        colors::TEXT,
    );
    scene.text(
        &format!("Max Score: {:03}", state.max_score),
        Vec2::new(right, -10.0),
        30.0,
        Align::Right,
        colors::TEXT,
    );
}

fn draw_with_shadow(scene: &mut Scene, pos: Vec2, size: Vec2, color: [f32; 4]) {
    scene.fill_rect(pos + Vec2::splat(SHADOW_OFFSET), size, colors::SHADOW);
    scene.fill_rect(pos, size, color);
}

/// Overlay for the terminal phases
fn draw_game_over(scene: &mut Scene, lines: &[&str]) {
    let (width, height) = (scene.width(), scene.height());
    scene.fill_rect(Vec2::ZERO, Vec2::new(width, height), colors::OVERLAY_LIGHT);

    let center = Vec2::new(width / 2.0, height / 2.0);
    let first = center.y - 30.0 * (lines.len() / 2) as f32;
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(center.x, first + i as f32 * 30.0);
        scene.text(line, pos, 60.0, Align::Center, colors::TEXT);
    }

    scene.text(
        "Press any key to restart",
        Vec2::new(center.x, center.y + 50.0),
        30.0,
        Align::Center,
        colors::TEXT,
    );
}

fn draw_menu(scene: &mut Scene, lines: &[&str]) {
    let (width, height) = (scene.width(), scene.height());
    scene.fill_rect(Vec2::ZERO, Vec2::new(width, height), colors::OVERLAY_DARK);

    let center = Vec2::new(width / 2.0, height / 2.0);
    let first = center.y - 30.0 * (lines.len() / 2) as f32;
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(center.x, first + i as f32 * 40.0);
        scene.text(line, pos, 50.0, Align::Center, colors::TEXT);
    }
}
