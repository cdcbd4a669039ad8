//! WebGPU rendering module
//!
//! Frames are described as a `Scene`, tessellated into flat-coloured
//! triangles and drawn with a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Align, DrawCommand, Scene, compose, startup_notice};
