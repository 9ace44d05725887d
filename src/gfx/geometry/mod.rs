//! # Procedural Geometry
//!
//! CPU-side vertex data for every primitive the factories can build. A
//! [`Geometry`] is uploaded lazily by the render backend the first time it is
//! drawn and released through
//! [`RenderBackend::dispose_geometry`](crate::gfx::rendering::RenderBackend::dispose_geometry)
//! when its object leaves the scene.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with per-face normals
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: flat rectangle in the XY plane facing +Z
//! - **Cylinder**: Y-aligned cylinder or cone frustum with caps
//! - **Line**: open polyline through a list of points
//! - **Axes**: three colored segments along +X, +Y and +Z

pub mod primitives;

use std::sync::atomic::{AtomicU64, Ordering};

pub use primitives::*;

use crate::gfx::picking::Aabb;

/// Identifier of a geometry's backend resources.
///
/// Cloning a [`Geometry`] keeps its id, so clones share one GPU upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(u64);

impl GeometryId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Indexed triangles, counter-clockwise winding.
    TriangleList,
    /// Consecutive vertices joined into one polyline.
    LineStrip,
    /// Independent segments, two vertices each.
    LineList,
}

impl Topology {
    pub fn is_line(self) -> bool {
        !matches!(self, Topology::TriangleList)
    }
}

/// Vertex data for one drawable
///
/// After editing the vertex data of a geometry that has already been drawn,
/// call [`touch`](Self::touch) so the backend uploads it again.
#[derive(Debug, Clone)]
pub struct Geometry {
    id: GeometryId,
    revision: u64,
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors, one per position (empty for lines)
    pub normals: Vec<[f32; 3]>,
    /// Optional per-vertex colors, used when the material enables them
    pub colors: Option<Vec<[f32; 3]>>,
    /// Triangle indices (empty for lines, which are drawn unindexed)
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    pub fn new(topology: Topology) -> Self {
        Self {
            id: GeometryId::next(),
            revision: 0,
            positions: Vec::new(),
            normals: Vec::new(),
            colors: None,
            indices: Vec::new(),
            topology,
        }
    }

    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Bumped by every [`touch`](Self::touch).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks the vertex data as changed.
    pub fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            _ => 0,
        }
    }

    /// Local-space bounds of all vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_vertices(&self.positions)
    }

    /// Iterates over the local-space endpoints of every line segment.
    pub fn segments(&self) -> impl Iterator<Item = [[f32; 3]; 2]> + '_ {
        let (step, positions): (usize, &[[f32; 3]]) = match self.topology {
            Topology::LineStrip => (1, &self.positions),
            Topology::LineList => (2, &self.positions),
            Topology::TriangleList => (1, &[]),
        };
        positions
            .windows(2)
            .step_by(step)
            .map(|pair| [pair[0], pair[1]])
    }

    /// Iterates over the local-space corners of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        let indices: &[u32] = match self.topology {
            Topology::TriangleList => &self.indices,
            _ => &[],
        };
        indices.chunks_exact(3).filter_map(move |tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_shared_by_clones() {
        let a = Geometry::new(Topology::TriangleList);
        let b = Geometry::new(Topology::TriangleList);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn test_touch_bumps_revision_only() {
        let mut geometry = generate_box(1.0, 1.0, 1.0);
        let id = geometry.id();
        assert_eq!(geometry.revision(), 0);

        geometry.positions[0][0] += 1.0;
        geometry.touch();
        assert_eq!(geometry.revision(), 1);
        assert_eq!(geometry.id(), id);
    }

    #[test]
    fn test_lines_have_no_triangles() {
        let line = generate_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        assert_eq!(line.triangle_count(), 0);
        assert_eq!(line.triangles().count(), 0);
        assert!(line.topology.is_line());
        assert_eq!(line.segments().count(), 2);
    }

    #[test]
    fn test_segments_follow_topology() {
        let axes = generate_axes(2.0);
        let segments: Vec<_> = axes.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]]);

        assert_eq!(generate_box(1.0, 1.0, 1.0).segments().count(), 0);
    }
}
