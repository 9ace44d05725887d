use crate::gfx::{
    geometry::{generate_box, generate_cylinder, generate_line, generate_plane, generate_sphere},
    resources::Material,
    scene::SceneObject,
    Color,
};

/// Color used when a caller has no preference
pub const DEFAULT_COLOR: Color = Color::WHITE;

pub fn create_box(width: f32, height: f32, depth: f32, color: Color) -> SceneObject {
    SceneObject::mesh(generate_box(width, height, depth), Material::standard(color))
}

/// UV sphere. Segment counts below the minimum (3 around, 2 from pole to
/// pole) are raised to it.
pub fn create_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    color: Color,
) -> SceneObject {
    SceneObject::mesh(
        generate_sphere(radius, width_segments, height_segments),
        Material::standard(color),
    )
}

/// Flat rectangle in the XY plane, visible from both sides.
pub fn create_plane(width: f32, height: f32, color: Color) -> SceneObject {
    SceneObject::mesh(
        generate_plane(width, height, 1, 1),
        Material::double_sided(color),
    )
}

/// Y-aligned cylinder; a zero radius at either end makes a cone.
pub fn create_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    color: Color,
) -> SceneObject {
    SceneObject::mesh(
        generate_cylinder(radius_top, radius_bottom, height, radial_segments),
        Material::standard(color),
    )
}

/// Open polyline through `points`.
pub fn create_line(points: &[[f32; 3]], color: Color) -> SceneObject {
    SceneObject::line(generate_line(points), Material::line_basic(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::Topology, resources::MaterialKind};

    #[test]
    fn test_meshes_use_standard_material() {
        for object in [
            create_box(1.0, 2.0, 3.0, DEFAULT_COLOR),
            create_sphere(1.0, 8, 6, DEFAULT_COLOR),
            create_cylinder(1.0, 1.0, 2.0, 8, DEFAULT_COLOR),
        ] {
            assert!(object.is_mesh());
            let material = &object.drawable().unwrap().material;
            assert_eq!(material.kind, MaterialKind::Standard { double_sided: false });
            assert_eq!(material.color, Color::WHITE);
        }
    }

    #[test]
    fn test_plane_is_double_sided() {
        let plane = create_plane(4.0, 2.0, Color::GREEN);
        let drawable = plane.drawable().unwrap();
        assert!(drawable.material.is_double_sided());
        assert_eq!(drawable.material.color, Color::GREEN);
        assert_eq!(drawable.geometry.triangle_count(), 2);
    }

    #[test]
    fn test_line_keeps_points_in_order() {
        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
        let line = create_line(&points, Color::RED);
        assert!(!line.is_mesh());
        let drawable = line.drawable().unwrap();
        assert_eq!(drawable.geometry.positions, points);
        assert_eq!(drawable.geometry.topology, Topology::LineStrip);
        assert!(!drawable.material.is_lit());
    }

    #[test]
    fn test_every_call_gets_fresh_resources() {
        let a = create_box(1.0, 1.0, 1.0, DEFAULT_COLOR);
        let b = create_box(1.0, 1.0, 1.0, DEFAULT_COLOR);
        assert_ne!(a.id(), b.id());
        assert_ne!(
            a.drawable().unwrap().geometry.id(),
            b.drawable().unwrap().geometry.id()
        );
        assert_ne!(
            a.drawable().unwrap().material.id(),
            b.drawable().unwrap().material.id()
        );
    }
}
