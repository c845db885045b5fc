//! Flat-colour vertex format and palette

use bytemuck::{Pod, Zeroable};

/// Canvas-space position (converted to NDC before upload) and RGBA color
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

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Layout matching `shader.wgsl`: location 0 position, location 1 color
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 0.0, 1.0, 1.0]; // Blue
    pub const DEBRIS: [f32; 4] = [0.83, 0.83, 0.83, 1.0]; // Light gray
    pub const OIL_SLICK: [f32; 4] = [0.0, 0.39, 0.0, 1.0]; // Dark green
    pub const BACKGROUND: [f32; 4] = [0.0, 0.25, 0.45, 1.0]; // Open water
}
