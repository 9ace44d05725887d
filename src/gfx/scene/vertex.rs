//! # Vertex Data Structures
//!
//! GPU-compatible vertex formats for the triangle and line pipelines.

use crate::gfx::geometry::Geometry;

/// A 3D vertex with position and normal data, used by lit triangle meshes.
///
/// `#[repr(C)]` keeps the layout stable for buffer uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Builds interleaved vertices, falling back to +Y for missing normals.
    pub fn from_geometry(geometry: &Geometry) -> Vec<Self> {
        geometry
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: geometry.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// A line vertex with position and color.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    /// Builds line vertices, using white where the geometry has no colors so
    /// the material color passes through unchanged.
    pub fn from_geometry(geometry: &Geometry) -> Vec<Self> {
        geometry
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| LineVertex {
                position: *position,
                color: geometry
                    .colors
                    .as_ref()
                    .and_then(|colors| colors.get(i).copied())
                    .unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect()
    }

    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Color (Float32x3)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}
