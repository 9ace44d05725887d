use std::sync::atomic::{AtomicU64, Ordering};

use cgmath::{Euler, Matrix4, Quaternion, Rad, Vector3, Zero};

use crate::gfx::{geometry::Geometry, resources::Material};

use super::light::Light;

/// Stable identity of an object for as long as the process runs.
///
/// Ids are never reused, so a removed object's id can't accidentally match a
/// newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position, rotation (XYZ Euler angles in radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        let rotation = Quaternion::from(Euler::new(
            Rad(self.rotation.x),
            Rad(self.rotation.y),
            Rad(self.rotation.z),
        ));
        Matrix4::from_translation(self.position)
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Geometry paired with the material that shades it
#[derive(Debug, Clone)]
pub struct Drawable {
    pub geometry: Geometry,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub enum ObjectKind {
    Mesh(Drawable),
    Line(Drawable),
    Light(Light),
}

/// A single node of the scene graph
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: ObjectKind,
}

impl SceneObject {
    pub fn mesh(geometry: Geometry, material: Material) -> Self {
        Self::new("Mesh", ObjectKind::Mesh(Drawable { geometry, material }))
    }

    pub fn line(geometry: Geometry, material: Material) -> Self {
        Self::new("Line", ObjectKind::Line(Drawable { geometry, material }))
    }

    pub fn light(light: Light) -> Self {
        Self::new(light.name(), ObjectKind::Light(light))
    }

    fn new(name: &str, kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.to_string(),
            transform: Transform::default(),
            visible: true,
            kind,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.set_position(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.transform.position = Vector3::new(x, y, z);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.position
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    /// Geometry and material for meshes and lines, `None` for lights.
    pub fn drawable(&self) -> Option<&Drawable> {
        match &self.kind {
            ObjectKind::Mesh(drawable) | ObjectKind::Line(drawable) => Some(drawable),
            ObjectKind::Light(_) => None,
        }
    }

    pub fn drawable_mut(&mut self) -> Option<&mut Drawable> {
        match &mut self.kind {
            ObjectKind::Mesh(drawable) | ObjectKind::Line(drawable) => Some(drawable),
            ObjectKind::Light(_) => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, ObjectKind::Mesh(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_box, scene::LightKind, Color};
    use cgmath::{Transform as _, Point3};

    #[test]
    fn test_transform_applies_scale_then_translation() {
        let mut object =
            SceneObject::mesh(generate_box(1.0, 1.0, 1.0), Material::standard(Color::WHITE))
                .with_position(1.0, 2.0, 3.0);
        object.transform.scale = Vector3::new(2.0, 2.0, 2.0);

        let p = object.world_matrix().transform_point(Point3::new(0.5, 0.5, 0.5));
        assert!((p.x - 2.0).abs() < 1e-6);
        assert!((p.y - 3.0).abs() < 1e-6);
        assert!((p.z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_lights_have_no_drawable() {
        let light = SceneObject::light(Light::new(LightKind::Ambient, Color::WHITE, 1.0));
        assert!(light.drawable().is_none());
        assert_eq!(light.name, "AmbientLight");
        assert!(!light.is_mesh());
    }
}
