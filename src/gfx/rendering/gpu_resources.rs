//! Per-geometry, per-material and per-object GPU state of the wgpu renderer.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    gfx::{geometry::Geometry, resources::Material, scene::{LineVertex, Vertex3D}},
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

use super::pipeline_manager::VertexLayout;

/// Per-object uniform. MUST match `Object` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for transforming normals
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>) -> Self {
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal: normal.into(),
        }
    }
}

/// Per-material uniform. MUST match `Material` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    /// x: vertex colors, y: double sided, z: lit
    pub flags: [u32; 4],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        let [r, g, b] = material.color.to_array();
        Self {
            color: [r, g, b, 1.0],
            flags: [
                material.vertex_colors as u32,
                material.is_double_sided() as u32,
                material.is_lit() as u32,
                0,
            ],
        }
    }
}

/// A uniform buffer with the bind group that exposes it
pub struct GpuUniform<T> {
    buffer: UniformBuffer<T>,
    bind_group: wgpu::BindGroup,
}

impl<T: bytemuck::Pod> GpuUniform<T> {
    pub fn new(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        content: &T,
        label: &str,
    ) -> Self {
        let buffer = UniformBuffer::new_with_data(device, content);
        let bind_group = BindGroupBuilder::new(layout)
            .resource(buffer.binding_resource())
            .create(device, label);
        Self { buffer, bind_group }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, content: T) {
        self.buffer.update_content(queue, content);
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}

/// Uploaded vertex and index data of one [`Geometry`]
pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    /// Index count when indexed, vertex count otherwise
    pub element_count: u32,
    pub layout: VertexLayout,
    /// [`Geometry::revision`] at upload time
    pub revision: u64,
}

fn needs_reupload(uploaded: (VertexLayout, u64), revision: u64, layout: VertexLayout) -> bool {
    uploaded != (layout, revision)
}

impl GpuGeometry {
    pub fn upload(device: &wgpu::Device, geometry: &Geometry, layout: VertexLayout) -> Self {
        let contents: Vec<u8> = match layout {
            VertexLayout::Mesh => {
                bytemuck::cast_slice(&Vertex3D::from_geometry(geometry)).to_vec()
            }
            VertexLayout::Line => {
                bytemuck::cast_slice(&LineVertex::from_geometry(geometry)).to_vec()
            }
        };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: &contents,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = (!geometry.indices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let element_count = if geometry.indices.is_empty() {
            geometry.vertex_count()
        } else {
            geometry.indices.len()
        } as u32;

        Self {
            vertex_buffer,
            index_buffer,
            element_count,
            layout,
            revision: geometry.revision(),
        }
    }

    /// Whether this upload no longer matches `geometry` drawn with `layout`.
    pub fn is_stale(&self, geometry: &Geometry, layout: VertexLayout) -> bool {
        needs_reupload((self.layout, self.revision), geometry.revision(), layout)
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.element_count, 0, 0..1);
            }
            None => pass.draw(0..self.element_count, 0..1),
        }
    }

    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
        if let Some(index_buffer) = &self.index_buffer {
            index_buffer.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::Color;
    use cgmath::Vector3;

    #[test]
    fn test_material_flags() {
        let plane = MaterialUniform::from(&Material::double_sided(Color::RED));
        assert_eq!(plane.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(plane.flags, [0, 1, 1, 0]);

        let axes = MaterialUniform::from(&Material::line_basic(Color::WHITE).with_vertex_colors());
        assert_eq!(axes.flags, [1, 0, 0, 0]);
    }

    #[test]
    fn test_normal_matrix_of_translation_is_unchanged_rotation() {
        let uniform = ObjectUniform::new(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)));
        let normal = Matrix4::from(uniform.normal);
        let n = normal * cgmath::Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert!((n.y - 1.0).abs() < 1e-6);
        assert!(n.x.abs() < 1e-6 && n.z.abs() < 1e-6);
    }

    #[test]
    fn test_touched_geometry_needs_reupload() {
        let mut geometry = crate::gfx::geometry::generate_box(1.0, 1.0, 1.0);
        let uploaded = (VertexLayout::Mesh, geometry.revision());
        assert!(!needs_reupload(uploaded, geometry.revision(), VertexLayout::Mesh));
        assert!(needs_reupload(uploaded, geometry.revision(), VertexLayout::Line));

        geometry.touch();
        assert!(needs_reupload(uploaded, geometry.revision(), VertexLayout::Mesh));
    }
}
