//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
    }

    /// Crimson used for the paddle, ball and all text
    pub const ACCENT: [f32; 4] = rgba(0xcc, 0x12, 0x42, 1.0);
    pub const BRICK: [f32; 4] = rgba(0xf0, 0x74, 0x5c, 1.0);
    pub const PADDLE: [f32; 4] = ACCENT;
    pub const BALL: [f32; 4] = ACCENT;
    pub const TEXT: [f32; 4] = ACCENT;
    pub const HEADER: [f32; 4] = rgba(0x15, 0x1c, 0x18, 1.0);
    pub const SHADOW: [f32; 4] = rgba(0x15, 0x1c, 0x18, 0.6);
    /// Dim layer behind game over / win text
    pub const OVERLAY_LIGHT: [f32; 4] = rgba(0x15, 0x1c, 0x18, 0.4);
    /// Dim layer behind the start menu
    pub const OVERLAY_DARK: [f32; 4] = rgba(0x15, 0x1c, 0x18, 0.8);
    pub const BACKGROUND: [f32; 4] = rgba(0xf4, 0xea, 0xd5, 1.0);
}
