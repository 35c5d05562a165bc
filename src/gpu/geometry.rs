use bytemuck::{Pod, Zeroable};

use crate::gpu::canvas::CanvasSize;

/// One vertex of the fixed pipeline: a bare `float32x3` position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
];

/// Contents of the group 0 uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    /// Column-major, as WGSL's `mat4x4<f32>` expects.
    pub transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub const IDENTITY: Uniforms = Uniforms {
        transform: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Scales the narrower axis so clip-space shapes keep their proportions
    /// on a non-square canvas.
    pub fn aspect_corrected(size: CanvasSize) -> Self {
        let mut uniforms = Self::IDENTITY;
        if size.width == 0 || size.height == 0 {
            return uniforms;
        }
        let aspect = size.width as f32 / size.height as f32;
        if aspect > 1.0 {
            uniforms.transform[0][0] = 1.0 / aspect;
        } else {
            uniforms.transform[1][1] = aspect;
        }
        uniforms
    }
}
