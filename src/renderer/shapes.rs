//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixels.

use std::convert::Infallible;
use std::f32::consts::PI;

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use glam::Vec2;

use super::vertex::Vertex;

/// Glyph source for all text; only the lit pixels are drawn
const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, pos, size, color);
    vertices
}

fn push_rect(vertices: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    // Two triangles
    vertices.push(Vertex::new(x0, y0, color));
    vertices.push(Vertex::new(x1, y0, color));
    vertices.push(Vertex::new(x0, y1, color));

    vertices.push(Vertex::new(x0, y1, color));
    vertices.push(Vertex::new(x1, y0, color));
    vertices.push(Vertex::new(x1, y1, color));
}

/// Generate vertices for a rectangle outline.
///
/// The stroke straddles the rectangle's edges, half inside and half outside.
pub fn stroke_rect(pos: Vec2, size: Vec2, line_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = line_width / 2.0;
    let outer_pos = pos - Vec2::splat(half);
    let outer_size = size + Vec2::splat(line_width);

    let mut vertices = Vec::with_capacity(24);
    // Top and bottom bands span the full outer width
    push_rect(&mut vertices, outer_pos, Vec2::new(outer_size.x, line_width), color);
    push_rect(
        &mut vertices,
        Vec2::new(outer_pos.x, pos.y + size.y - half),
        Vec2::new(outer_size.x, line_width),
        color,
    );
    // Sides fill the gap between them
    let side_height = (size.y - line_width).max(0.0);
    push_rect(
        &mut vertices,
        Vec2::new(outer_pos.x, pos.y + half),
        Vec2::new(line_width, side_height),
        color,
    );
    push_rect(
        &mut vertices,
        Vec2::new(pos.x + size.x - half, pos.y + half),
        Vec2::new(line_width, side_height),
        color,
    );
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Canvas pixels per font pixel for a `size` px font (the glyph cell height)
pub fn font_pixel(size: f32) -> f32 {
    size / FONT_10X20.character_size.height as f32
}

/// Advance width of `value` at `size` px
pub fn text_width(value: &str, size: f32) -> f32 {
    let metrics = TEXT_STYLE.measure_string(value, Point::zero(), Baseline::Alphabetic);
    metrics.bounding_box.size.width as f32 * font_pixel(size)
}

/// Generate vertices for a line of text.
///
/// `origin` is the left end of the baseline, matching canvas `fillText`.
pub fn text(value: &str, origin: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut target = GlyphQuads {
        origin,
        px: font_pixel(size),
        color,
        vertices: Vec::new(),
    };
    let Ok(_) = Text::with_baseline(value, Point::zero(), TEXT_STYLE, Baseline::Alphabetic)
        .draw(&mut target);
    target.vertices
}

/// Draw target that turns each lit font pixel into a scaled quad
struct GlyphQuads {
    origin: Vec2,
    px: f32,
    color: [f32; 4],
    vertices: Vec<Vertex>,
}

impl Dimensions for GlyphQuads {
    // Glyphs sit above the baseline, so the area extends into negative y
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::new(-(1 << 15), -(1 << 15)), Size::new(1 << 16, 1 << 16))
    }
}

impl DrawTarget for GlyphQuads {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if color.is_on() {
                let pos = self.origin + Vec2::new(point.x as f32, point.y as f32) * self.px;
                push_rect(&mut self.vertices, pos, Vec2::splat(self.px), self.color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), RED);
        assert_eq!(v.len(), 6);

        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_stroke_straddles_edges() {
        let v = stroke_rect(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0), 8.0, RED);
        assert_eq!(v.len(), 24);

        let min_x = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_y = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_x, -4.0);
        assert_eq!(max_y, 54.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        let v = circle(center, 8.0, RED, 16);
        assert_eq!(v.len(), 48);
        for vertex in &v {
            let p = Vec2::from(vertex.position);
            assert!(p.distance(center) <= 8.0 + 1e-4);
        }
    }

    #[test]
    fn test_text_sits_on_baseline() {
        // 20px is the font's native cell, so one font pixel is one canvas pixel
        let v = text("H", Vec2::new(0.0, 100.0), 20.0, RED);
        assert!(!v.is_empty());
        assert_eq!(v.len() % 6, 0);

        let min_y = v.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = v.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!(min_y >= 80.0, "cap top {min_y}");
        assert!(max_y > 90.0 && max_y <= 101.0, "cap bottom {max_y}");

        let min_x = v.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = v.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(min_x >= 0.0);
        assert!(max_x <= text_width("H", 20.0));
    }

    #[test]
    fn test_text_scales_with_size() {
        let small = text("Score: 007", Vec2::ZERO, 20.0, RED);
        let large = text("Score: 007", Vec2::ZERO, 50.0, RED);
        // Same lit pixels, bigger quads
        assert_eq!(small.len(), large.len());

        assert_eq!(text_width("", 50.0), 0.0);
        assert_eq!(text_width("Score: 007", 20.0), 100.0);
        assert_eq!(text_width("Score: 007", 50.0), 250.0);
    }

    #[test]
    fn test_blank_text_draws_nothing() {
        assert!(text("   ", Vec2::new(10.0, 10.0), 30.0, RED).is_empty());
    }
}
