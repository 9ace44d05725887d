//! # Object Picking System
//!
//! Converts pointer positions into world-space rays and finds the nearest
//! mesh or line they hit.
//!
//! ## How it works
//!
//! 1. **Pointer to NDC**: Pixel coordinates relative to the surface become
//!    normalized device coordinates in `-1..=1`, Y up
//! 2. **NDC to Ray**: The near and far points are unprojected through the
//!    inverse view-projection of the active camera
//! 3. **Broad phase**: The ray is tested against each drawable's world-space
//!    AABB, grown by the line threshold for lines
//! 4. **Narrow phase**: Meshes are tested triangle by triangle, lines segment
//!    by segment against the threshold distance
//!
//! Works for both perspective and orthographic cameras, since only the
//! combined view-projection matrix is involved.

use cgmath::{
    ElementWise, InnerSpace, Matrix4, Point3, SquareMatrix, Transform as _, Vector2, Vector3,
    Vector4, Zero,
};

use crate::gfx::{
    camera::Camera,
    scene::{ObjectId, Scene},
    surface::SurfaceSize,
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices. An empty set gives a point box at
    /// the origin.
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Slab test. Returns the distance to the entry point, or to the exit
    /// point when the ray starts inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    pub fn contains(&self, point: Vector3<f32>) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        let margin = Vector3::new(margin, margin, margin);
        Self::new(self.min - margin, self.max + margin)
    }

    /// Bounds of the eight transformed corners
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.min.y, self.min.z],
            [self.min.x, self.max.y, self.min.z],
            [self.min.x, self.min.y, self.max.z],
            [self.max.x, self.max.y, self.min.z],
            [self.max.x, self.min.y, self.max.z],
            [self.min.x, self.max.y, self.max.z],
            [self.max.x, self.max.y, self.max.z],
        ];

        let transformed = corners.map(|corner| {
            let p = matrix.transform_point(Point3::from(corner));
            [p.x, p.y, p.z]
        });

        Self::from_vertices(&transformed)
    }
}

/// A triangle in world space
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vector3<f32>,
    pub v1: Vector3<f32>,
    pub v2: Vector3<f32>,
}

impl Triangle {
    pub fn new(v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Möller-Trumbore intersection, double sided. Returns the distance along
    /// the ray.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Parallel to the triangle plane
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t >= 0.0).then_some(t)
    }
}

/// A line segment in world space
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
}

impl Segment {
    pub fn new(start: Vector3<f32>, end: Vector3<f32>) -> Self {
        Self { start, end }
    }

    /// Closest approach between the ray and the segment. Returns the distance
    /// along the ray to its closest point and the gap between the two.
    pub fn closest_approach(&self, ray: &Ray) -> (f32, f32) {
        const EPSILON: f32 = 1e-7;

        let d = self.end - self.start;
        let r = ray.origin - self.start;
        let e = d.dot(d);
        let c = ray.direction.dot(r);

        let (s, t) = if e <= EPSILON {
            ((-c).max(0.0), 0.0)
        } else {
            let b = ray.direction.dot(d);
            let f = d.dot(r);
            // Parallel test scaled by the squared segment length
            let denom = e - b * b;
            let s = if denom > 1e-6 * e {
                ((b * f - c * e) / denom).max(0.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c).max(0.0), 0.0)
            } else if t > 1.0 {
                ((b - c).max(0.0), 1.0)
            } else {
                (s, t)
            }
        };

        let on_ray = ray.point_at(s);
        let on_segment = self.start + d * t;
        (s, (on_ray - on_segment).magnitude())
    }

    /// Distance along the ray when it passes within `threshold` of the segment.
    pub fn intersect_ray(&self, ray: &Ray, threshold: f32) -> Option<f32> {
        let (along, gap) = self.closest_approach(ray);
        (gap <= threshold).then_some(along)
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy)]
pub struct PickResult {
    pub object: ObjectId,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Converts pixel coordinates relative to the surface's top-left corner into
/// normalized device coordinates.
pub fn pointer_to_ndc(x: f32, y: f32, size: SurfaceSize) -> Vector2<f32> {
    Vector2::new(
        (x / size.width as f32) * 2.0 - 1.0,
        -(y / size.height as f32) * 2.0 + 1.0,
    )
}

/// Casts a ray from `camera` through a point in normalized device coordinates
pub fn ray_from_camera(ndc: Vector2<f32>, camera: &dyn Camera) -> Ray {
    let view_proj = camera.projection_matrix() * camera.view_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

    let unproject = |z: f32| {
        let world = inv_view_proj * Vector4::new(ndc.x, ndc.y, z, 1.0);
        world.truncate() / world.w
    };

    let near = unproject(-1.0);
    let far = unproject(1.0);
    Ray::new(near, far - near)
}

/// Finds the nearest visible mesh or line hit by `ray`.
///
/// Lines count as hit when the ray passes within `line_threshold` of one of
/// their segments. Lights are not pickable.
pub fn pick(ray: &Ray, scene: &Scene, line_threshold: f32) -> Option<PickResult> {
    let mut closest: Option<PickResult> = None;

    for object in scene.objects().iter().filter(|o| o.visible) {
        let Some(drawable) = object.drawable() else {
            continue;
        };
        let geometry = &drawable.geometry;
        let is_line = geometry.topology.is_line();

        let world = object.world_matrix();
        let mut bounds = geometry.bounding_box().transform(&world);
        if is_line {
            bounds = bounds.expand(line_threshold);
        }
        let Some(mut entry) = bounds.intersect_ray(ray) else {
            continue;
        };
        if bounds.contains(ray.origin) {
            entry = 0.0;
        }
        if closest.is_some_and(|hit| entry > hit.distance) {
            continue;
        }

        let to_world = |p: [f32; 3]| {
            let p = world.transform_point(Point3::from(p));
            Vector3::new(p.x, p.y, p.z)
        };

        let nearest = if is_line {
            geometry
                .segments()
                .filter_map(|[a, b]| {
                    Segment::new(to_world(a), to_world(b)).intersect_ray(ray, line_threshold)
                })
                .min_by(f32::total_cmp)
        } else {
            geometry
                .triangles()
                .filter_map(|[a, b, c]| {
                    Triangle::new(to_world(a), to_world(b), to_world(c)).intersect_ray(ray)
                })
                .min_by(f32::total_cmp)
        };

        if let Some(distance) = nearest {
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(PickResult {
                    object: object.id(),
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
    }

    closest
}

/// Pointer listener state attached to the engine.
///
/// Remembers the last pointer position and the nearest object under it.
#[derive(Debug)]
pub struct PointerPicker {
    ndc: Vector2<f32>,
    selected: Option<ObjectId>,
    line_threshold: f32,
}

impl PointerPicker {
    pub fn new(line_threshold: f32) -> Self {
        Self {
            ndc: Vector2::new(0.0, 0.0),
            selected: None,
            line_threshold,
        }
    }

    /// Updates the pointer position and re-runs the pick.
    pub fn pointer_move(
        &mut self,
        x: f32,
        y: f32,
        size: SurfaceSize,
        camera: &dyn Camera,
        scene: &Scene,
    ) -> Option<ObjectId> {
        self.ndc = pointer_to_ndc(x, y, size);
        let ray = ray_from_camera(self.ndc, camera);
        self.selected = pick(&ray, scene, self.line_threshold).map(|hit| hit.object);
        self.selected
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Forgets the selection if it refers to `id`.
    pub fn forget(&mut self, id: ObjectId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn ndc(&self) -> Vector2<f32> {
        self.ndc
    }
}

impl Default for PointerPicker {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::PerspectiveCamera,
        geometry::{generate_axes, generate_box, generate_line},
        resources::Material,
        scene::SceneObject,
        Color,
    };

    fn camera_looking_down_z() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.set_position(0.0, 0.0, 10.0);
        camera.look_at(0.0, 0.0, 0.0);
        camera
    }

    fn cube_at(x: f32, y: f32, z: f32) -> SceneObject {
        SceneObject::mesh(generate_box(1.0, 1.0, 1.0), Material::standard(Color::WHITE))
            .with_position(x, y, z)
    }

    #[test]
    fn test_aabb_creation() {
        let aabb = Aabb::from_vertices(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]]);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_ray_triangle_intersection() {
        let triangle = Triangle::new(
            Vector3::new(-1.0, -1.0, 0.0),
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );

        let hit = Ray::new(Vector3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        let t = triangle.intersect_ray(&hit).unwrap();
        assert!((t - 3.0).abs() < 1e-6);

        let behind = Ray::new(Vector3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(triangle.intersect_ray(&behind).is_none());

        let outside = Ray::new(Vector3::new(2.0, 2.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(triangle.intersect_ray(&outside).is_none());
    }

    #[test]
    fn test_pointer_to_ndc_corners() {
        let size = SurfaceSize::new(800, 600);
        assert_eq!(pointer_to_ndc(0.0, 0.0, size), Vector2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, size), Vector2::new(1.0, -1.0));
        assert_eq!(pointer_to_ndc(400.0, 300.0, size), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = camera_looking_down_z();
        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);

        assert!(ray.direction.x.abs() < 1e-4);
        assert!(ray.direction.y.abs() < 1e-4);
        assert!((ray.direction.z + 1.0).abs() < 1e-4);
        assert!((ray.origin.z - 9.9).abs() < 1e-3);
    }

    #[test]
    fn test_pick_returns_nearest() {
        let mut scene = Scene::new();
        let far = scene.add(cube_at(0.0, 0.0, -3.0));
        let near = scene.add(cube_at(0.0, 0.0, 2.0));

        let camera = camera_looking_down_z();
        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);
        let hit = pick(&ray, &scene, 1.0).unwrap();

        assert_eq!(hit.object, near);
        assert_ne!(hit.object, far);
        assert!((hit.point.z - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_pick_ignores_hidden_and_misses() {
        let mut scene = Scene::new();
        let mut hidden = cube_at(0.0, 0.0, 0.0);
        hidden.visible = false;
        scene.add(hidden);

        let camera = camera_looking_down_z();
        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);
        assert!(pick(&ray, &scene, 1.0).is_none());

        scene.add(cube_at(0.0, 0.0, 0.0));
        let corner = ray_from_camera(Vector2::new(0.95, 0.95), &camera);
        assert!(pick(&corner, &scene, 1.0).is_none());
    }

    #[test]
    fn test_pointer_picker_tracks_selection() {
        let mut scene = Scene::new();
        let id = scene.add(cube_at(0.0, 0.0, 0.0));
        let camera = camera_looking_down_z();
        let size = SurfaceSize::new(400, 400);

        let mut picker = PointerPicker::default();
        assert_eq!(picker.pointer_move(200.0, 200.0, size, &camera, &scene), Some(id));
        assert_eq!(picker.selected(), Some(id));

        assert_eq!(picker.pointer_move(0.0, 0.0, size, &camera, &scene), None);
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_segment_closest_approach() {
        let segment = Segment::new(Vector3::new(-3.0, 0.5, 0.0), Vector3::new(3.0, 0.5, 0.0));
        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let (along, gap) = segment.closest_approach(&ray);
        assert!((along - 10.0).abs() < 1e-5);
        assert!((gap - 0.5).abs() < 1e-5);

        assert_eq!(segment.intersect_ray(&ray, 1.0), Some(along));
        assert_eq!(segment.intersect_ray(&ray, 0.25), None);

        // Past the segment's end the gap is measured to the endpoint
        let beside = Ray::new(Vector3::new(5.0, 0.5, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let (_, gap) = segment.closest_approach(&beside);
        assert!((gap - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_pick_hits_lines_within_threshold() {
        let mut scene = Scene::new();
        let line = scene.add(SceneObject::line(
            generate_line(&[[-3.0, 0.0, 0.0], [3.0, 0.0, 0.0]]),
            Material::line_basic(Color::WHITE),
        ));
        let camera = camera_looking_down_z();

        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);
        let hit = pick(&ray, &scene, 1.0).unwrap();
        assert_eq!(hit.object, line);
        assert!((hit.distance - 9.9).abs() < 1e-3);

        let above = ray_from_camera(Vector2::new(0.0, 0.5), &camera);
        assert!(pick(&above, &scene, 1.0).is_none());
    }

    #[test]
    fn test_line_in_front_blocks_mesh() {
        let mut scene = Scene::new();
        let cube = scene.add(cube_at(0.0, 0.0, -3.0));
        let axes = scene.add(SceneObject::line(
            generate_axes(1000.0),
            Material::line_basic(Color::WHITE).with_vertex_colors(),
        ));
        let camera = camera_looking_down_z();
        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);

        assert_eq!(pick(&ray, &scene, 1.0).unwrap().object, axes);

        scene.remove(axes);
        assert_eq!(pick(&ray, &scene, 1.0).unwrap().object, cube);
    }

    #[test]
    fn test_mesh_in_front_of_line_wins() {
        let mut scene = Scene::new();
        scene.add(SceneObject::line(
            generate_line(&[[-3.0, 0.0, -5.0], [3.0, 0.0, -5.0]]),
            Material::line_basic(Color::WHITE),
        ));
        let cube = scene.add(cube_at(0.0, 0.0, 0.0));
        let camera = camera_looking_down_z();
        let ray = ray_from_camera(Vector2::new(0.0, 0.0), &camera);

        assert_eq!(pick(&ray, &scene, 1.0).unwrap().object, cube);
    }
}
