//! # Primitive Shape Generation
//!
//! All triangle shapes are centered at the origin, Y-up, with outward normals.

use std::f32::consts::PI;

use super::{Geometry, Topology};

/// Generate a box of the given dimensions centered at the origin
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_box(width: f32, height: f32, depth: f32) -> Geometry {
    let mut data = Geometry::new(Topology::TriangleList);
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-hw, -hh,  hd], [ hw, -hh,  hd], [ hw,  hh,  hd], [-hw,  hh,  hd],
        // Back face
        [-hw, -hh, -hd], [-hw,  hh, -hd], [ hw,  hh, -hd], [ hw, -hh, -hd],
        // Left face
        [-hw, -hh, -hd], [-hw, -hh,  hd], [-hw,  hh,  hd], [-hw,  hh, -hd],
        // Right face
        [ hw, -hh,  hd], [ hw, -hh, -hd], [ hw,  hh, -hd], [ hw,  hh,  hd],
        // Top face
        [-hw,  hh,  hd], [ hw,  hh,  hd], [ hw,  hh, -hd], [-hw,  hh, -hd],
        // Bottom face
        [-hw, -hh, -hd], [ hw, -hh, -hd], [ hw, -hh,  hd], [-hw, -hh,  hd],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.positions = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments (at least 3)
/// * `height_segments` - Number of latitude segments (at least 2)
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let mut data = Geometry::new(Topology::TriangleList);

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.positions.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a plane in the XY plane with its normal along +Z
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Subdivisions along X
/// * `height_segments` - Subdivisions along Y
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> Geometry {
    let mut data = Geometry::new(Topology::TriangleList);

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let pos_y = (y as f32 / h_segs as f32 - 0.5) * height;

        for x in 0..=w_segs {
            let pos_x = (x as f32 / w_segs as f32 - 0.5) * width;

            data.positions.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    // Counter-clockwise when viewed from +Z
    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}

/// Generate a Y-aligned cylinder, or a cone frustum when the radii differ
///
/// # Arguments
/// * `radius_top` - Radius of the top cap
/// * `radius_bottom` - Radius of the bottom cap
/// * `height` - Extent along Y, centered on the origin
/// * `radial_segments` - Number of segments around the axis (at least 3)
///
/// Caps with a zero radius are skipped.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Geometry {
    let mut data = Geometry::new(Topology::TriangleList);

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    // Normals tilt outward when the bottom is wider than the top
    let slope = if height != 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = normalize([cos_a, slope, sin_a]);

        data.positions
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);

        data.positions
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_current + 3;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices
            .extend_from_slice(&[top_current, top_next, bottom_next]);
    }

    if radius_bottom > 0.0 {
        push_cap(&mut data, radius_bottom, -half_height, segs, false);
    }
    if radius_top > 0.0 {
        push_cap(&mut data, radius_top, half_height, segs, true);
    }

    data
}

fn push_cap(data: &mut Geometry, radius: f32, y: f32, segs: u32, top: bool) {
    let normal = if top { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };

    let center = data.positions.len() as u32;
    data.positions.push([0.0, y, 0.0]);
    data.normals.push(normal);

    let ring_start = data.positions.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.positions.push([radius * cos_a, y, radius * sin_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let current = ring_start + i;
        let next = current + 1;
        if top {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate an open polyline through `points`
pub fn generate_line(points: &[[f32; 3]]) -> Geometry {
    let mut data = Geometry::new(Topology::LineStrip);
    data.positions = points.to_vec();
    data
}

/// Generate three colored axis segments of length `size`
///
/// X is red, Y is green and Z is blue.
pub fn generate_axes(size: f32) -> Geometry {
    let mut data = Geometry::new(Topology::LineList);

    data.positions = vec![
        [0.0, 0.0, 0.0],
        [size, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, size, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, 0.0, size],
    ];
    data.colors = Some(vec![
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ]);

    data
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_generation() {
        let cube = generate_box(2.0, 4.0, 6.0);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);

        let bounds = cube.bounding_box();
        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.y, 2.0);
        assert_eq!(bounds.max.z, 3.0);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.positions.len(), sphere.normals.len());

        for p in &sphere.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_segment_minimums() {
        let sphere = generate_sphere(1.0, 0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(1.0, 1.0, 2.0, 8);
        // side ring pairs + two caps of (center + ring)
        assert_eq!(cylinder.vertex_count(), 9 * 2 + 2 * (1 + 9));
        assert_eq!(cylinder.triangle_count(), 8 * 2 + 8 * 2);

        let bounds = cylinder.bounding_box();
        assert_eq!(bounds.min.y, -1.0);
        assert_eq!(bounds.max.y, 1.0);
    }

    #[test]
    fn test_cone_skips_empty_cap() {
        let cone = generate_cylinder(0.0, 1.0, 2.0, 8);
        assert_eq!(cone.vertex_count(), 9 * 2 + (1 + 9));
    }

    #[test]
    fn test_axes_are_colored_segments() {
        let axes = generate_axes(5.0);
        assert_eq!(axes.topology, Topology::LineList);
        assert_eq!(axes.vertex_count(), 6);
        assert_eq!(axes.colors.as_ref().map(Vec::len), Some(6));
        assert_eq!(axes.positions[1], [5.0, 0.0, 0.0]);
    }
}
