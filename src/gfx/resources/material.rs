//! Material definitions
//!
//! A material describes how a drawable is shaded. Its GPU uniform is created
//! by the backend on first use and released through
//! [`RenderBackend::dispose_material`](crate::gfx::rendering::RenderBackend::dispose_material).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::gfx::Color;

/// Identifier of a material's backend resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u64);

impl MaterialId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    /// Lit by every light in the scene.
    Standard { double_sided: bool },
    /// Unlit, drawn as a flat color.
    LineBasic,
}

#[derive(Debug, Clone)]
pub struct Material {
    id: MaterialId,
    pub color: Color,
    pub kind: MaterialKind,
    /// Multiplies the material color by the geometry's per-vertex colors.
    pub vertex_colors: bool,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self::new(color, MaterialKind::Standard { double_sided: false })
    }

    pub fn double_sided(color: Color) -> Self {
        Self::new(color, MaterialKind::Standard { double_sided: true })
    }

    pub fn line_basic(color: Color) -> Self {
        Self::new(color, MaterialKind::LineBasic)
    }

    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }

    fn new(color: Color, kind: MaterialKind) -> Self {
        Self {
            id: MaterialId::next(),
            color,
            kind,
            vertex_colors: false,
        }
    }

    pub fn id(&self) -> MaterialId {
        self.id
    }

    pub fn is_lit(&self) -> bool {
        matches!(self.kind, MaterialKind::Standard { .. })
    }

    pub fn is_double_sided(&self) -> bool {
        matches!(self.kind, MaterialKind::Standard { double_sided: true })
    }
}
