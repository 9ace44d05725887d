//! # Scene Engine
//!
//! [`SceneEngine`] owns everything needed to show a scene: the render
//! backend, the scene graph, a perspective camera, an optional orthographic
//! camera, orbit controls, a debug axes helper, a resize observer and pointer
//! picking. Optional parts live in `Option` slots that are filled by
//! [`SceneEngine::init`] and emptied by [`SceneEngine::stop`] and
//! [`SceneEngine::unmount`].
//!
//! ## Frame loop
//!
//! The engine does not own a thread or timer. The windowing event loop calls
//! [`SceneEngine::tick`] once per redraw and only schedules another redraw
//! while it returns `true`:
//!
//! ```
//! use cairn::{config::EngineConfig, gfx::{engine::SceneEngine, rendering::HeadlessBackend, surface::SurfaceSize}};
//!
//! let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
//! engine.init(&SurfaceSize::new(800, 600)).unwrap().start();
//! assert!(engine.tick());
//! engine.stop();
//! assert!(!engine.tick());
//! ```

use winit::event::{DeviceEvent, WindowEvent};

use crate::{
    config::EngineConfig,
    error::EngineError,
    gfx::{
        camera::{
            Camera, CameraKind, OrbitControls, OrbitInput, OrthographicCamera, PerspectiveCamera,
        },
        frame_loop::FrameLoop,
        geometry::generate_axes,
        picking::PointerPicker,
        rendering::{FrameContext, RenderBackend, RenderError},
        resources::Material,
        scene::{ObjectId, Scene, SceneObject},
        surface::{RenderSurface, ResizeObserver, SurfaceSize},
        Color,
    },
};

pub struct SceneEngine<B: RenderBackend> {
    backend: B,
    config: EngineConfig,
    scene: Scene,
    size: SurfaceSize,
    initialized: bool,

    perspective_camera: PerspectiveCamera,
    orthographic_camera: Option<OrthographicCamera>,
    active: CameraKind,
    controls: Option<OrbitControls>,
    input: OrbitInput,

    debug_mode: bool,
    axes_helper: Option<ObjectId>,
    resize_observer: Option<ResizeObserver>,
    picker: Option<PointerPicker>,
    frame_loop: FrameLoop,

    /// Objects added through [`SceneEngine::add_object`], in insertion order
    tracked: Vec<ObjectId>,
}

/// Borrows the camera `kind` refers to, falling back to the perspective camera
/// when the orthographic one has not been built.
fn select_camera<'a>(
    kind: CameraKind,
    perspective: &'a PerspectiveCamera,
    orthographic: Option<&'a OrthographicCamera>,
) -> &'a dyn Camera {
    match (kind, orthographic) {
        (CameraKind::Orthographic, Some(camera)) => camera,
        _ => perspective,
    }
}

fn select_camera_mut<'a>(
    kind: CameraKind,
    perspective: &'a mut PerspectiveCamera,
    orthographic: Option<&'a mut OrthographicCamera>,
) -> &'a mut dyn Camera {
    match (kind, orthographic) {
        (CameraKind::Orthographic, Some(camera)) => camera,
        _ => perspective,
    }
}

impl<B: RenderBackend> SceneEngine<B> {
    pub fn new(backend: B, config: EngineConfig) -> Self {
        let camera = &config.camera;
        let perspective_camera = PerspectiveCamera::new(camera.fov, 1.0, camera.near, camera.far);

        Self {
            backend,
            scene: Scene::new(),
            size: SurfaceSize::default(),
            initialized: false,
            perspective_camera,
            orthographic_camera: None,
            active: CameraKind::Perspective,
            controls: None,
            input: OrbitInput::new(),
            debug_mode: false,
            axes_helper: None,
            resize_observer: None,
            picker: None,
            frame_loop: FrameLoop::new(),
            tracked: Vec::new(),
            config,
        }
    }

    /// Mounts the engine on `surface`: sets the background, sizes the
    /// cameras and backend, and attaches the controls, resize observer,
    /// orthographic camera and pointer listeners.
    ///
    /// Fails with [`EngineError::AlreadyInitialized`] if called twice without
    /// an [`unmount`](Self::unmount) in between.
    pub fn init(&mut self, surface: &impl RenderSurface) -> Result<&mut Self, EngineError> {
        if self.initialized {
            log::warn!("Scene engine init called twice, ignoring");
            return Err(EngineError::AlreadyInitialized);
        }

        let size = surface.size();
        self.scene.background = self.config.background;
        self.backend.set_background(self.config.background);
        self.apply_size(size);

        self.controls = Some(OrbitControls::from_config(&self.config.controls, self.active));
        self.resize_observer = Some(ResizeObserver::new(size));

        if self.config.orthographic {
            let camera = &self.config.camera;
            let mut orthographic =
                OrthographicCamera::new(camera.frustum_size, size.aspect(), camera.near, camera.far);
            let [x, y, z] = camera.orthographic_position;
            orthographic.set_position(x, y, z);
            orthographic.look_at(0.0, 0.0, 0.0);
            self.orthographic_camera = Some(orthographic);
        }

        if self.config.picking {
            self.picker = Some(PointerPicker::new(self.config.line_pick_threshold));
        }

        self.initialized = true;
        log::info!(
            "Scene engine initialized at {}x{}",
            size.width,
            size.height
        );
        Ok(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Draws the scene once through the active camera.
    pub fn render(&mut self) -> Result<(), EngineError> {
        self.render_with(|backend, frame| backend.render(frame))
    }

    /// Like [`render`](Self::render), but lets the caller drive the backend,
    /// e.g. to record a UI overlay into the same frame.
    pub fn render_with<F>(&mut self, draw: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut B, &FrameContext<'_>) -> Result<(), RenderError>,
    {
        let frame = FrameContext {
            scene: &self.scene,
            camera: self.active_camera().uniform(),
            size: self.size,
        };
        draw(&mut self.backend, &frame)?;
        Ok(())
    }

    /// Adds `object` to the scene and tracks it as user content.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = self.scene.add(object);
        if !self.tracked.contains(&id) {
            self.tracked.push(id);
        }
        log::debug!("Added object {}", id);
        id
    }

    /// Removes an object and releases its geometry and material.
    ///
    /// Removing an id that is not in the scene does nothing.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.scene.remove(id)?;
        self.tracked.retain(|tracked| *tracked != id);
        if let Some(picker) = self.picker.as_mut() {
            picker.forget(id);
        }
        if self.axes_helper == Some(id) {
            self.axes_helper = None;
            self.debug_mode = false;
        }
        self.dispose(&object);
        log::debug!("Removed object {} ({})", id, object.name);
        Some(object)
    }

    fn dispose(&mut self, object: &SceneObject) {
        if let Some(drawable) = object.drawable() {
            self.backend.dispose_geometry(drawable.geometry.id());
            self.backend.dispose_material(drawable.material.id());
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.scene.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.scene.get_mut(id)
    }

    pub fn tracked_objects(&self) -> &[ObjectId] {
        &self.tracked
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_background(&mut self, color: Color) {
        self.scene.background = color;
        self.backend.set_background(color);
    }

    /// Moves every existing camera to `(x, y, z)`.
    pub fn set_camera_position(&mut self, x: f32, y: f32, z: f32) {
        self.perspective_camera.set_position(x, y, z);
        if let Some(camera) = self.orthographic_camera.as_mut() {
            camera.set_position(x, y, z);
        }
    }

    /// Points every existing camera at `(x, y, z)`.
    ///
    /// While orbit controls are attached they re-aim the active camera at
    /// their own target on the next frame.
    pub fn look_at(&mut self, x: f32, y: f32, z: f32) {
        self.perspective_camera.look_at(x, y, z);
        if let Some(camera) = self.orthographic_camera.as_mut() {
            camera.look_at(x, y, z);
        }
    }

    /// Starts the frame loop.
    pub fn start(&mut self) -> &mut Self {
        self.frame_loop.start();
        log::info!("Frame loop started");
        self
    }

    /// One frame of the loop: renders, then advances the orbit controls.
    ///
    /// Returns whether another frame should be scheduled. Draws nothing once
    /// [`stop`](Self::stop) has been called.
    pub fn tick(&mut self) -> bool {
        self.tick_with(|backend, frame| backend.render(frame))
    }

    pub fn tick_with<F>(&mut self, draw: F) -> bool
    where
        F: FnOnce(&mut B, &FrameContext<'_>) -> Result<(), RenderError>,
    {
        if self.frame_loop.begin_frame().is_none() {
            return false;
        }

        if let Err(error) = self.render_with(draw) {
            log::error!("Frame {} failed: {}", self.frame_loop.frame_count(), error);
        }
        self.update_controls();

        self.frame_loop.is_running()
    }

    /// Applies pending orbit input to the active camera.
    fn update_controls(&mut self) -> bool {
        let Some(controls) = self.controls.as_mut() else {
            return false;
        };
        let camera = select_camera_mut(
            self.active,
            &mut self.perspective_camera,
            self.orthographic_camera.as_mut(),
        );
        controls.update(camera)
    }

    /// Disposes the orbit controls, detaches the resize observer and stops
    /// the frame loop. The next [`tick`](Self::tick) draws nothing.
    pub fn stop(&mut self) {
        if self.controls.take().is_some() {
            log::debug!("Orbit controls disposed");
        }
        self.resize_observer = None;
        self.frame_loop.stop();
        log::info!("Frame loop stopped");
    }

    /// Stops the engine, detaches pointer listeners and removes every object,
    /// releasing their resources. The engine can be initialized again
    /// afterwards.
    pub fn unmount(&mut self) {
        self.stop();
        self.picker = None;

        let objects = self.scene.drain();
        for object in &objects {
            self.dispose(object);
        }
        self.tracked.clear();
        self.axes_helper = None;
        self.debug_mode = false;
        self.initialized = false;
        log::info!("Scene engine unmounted, {} objects released", objects.len());
    }

    /// Switches the active camera and rebinds the orbit controls to it,
    /// keeping their target.
    ///
    /// Asking for the orthographic camera before it exists leaves the active
    /// camera unchanged. Returns the camera active afterwards.
    pub fn change_camera(&mut self, kind: CameraKind) -> CameraKind {
        if kind == CameraKind::Orthographic && self.orthographic_camera.is_none() {
            log::warn!("No orthographic camera, keeping the {} camera", self.active);
        } else {
            self.active = kind;
        }

        if let Some(controls) = self.controls.as_mut() {
            let target = controls.target;
            controls.bind(self.active);
            controls.target = target;
        }
        self.update_controls();

        log::info!("Active camera: {}", self.active);
        self.active
    }

    /// Toggles debug mode, showing or removing the axes helper. Returns the
    /// new mode.
    pub fn change_debug_mode(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;

        if self.debug_mode {
            if self.axes_helper.is_none() {
                let axes = SceneObject::line(
                    generate_axes(self.config.axes_size),
                    Material::line_basic(Color::WHITE).with_vertex_colors(),
                )
                .with_name("AxesHelper");
                self.axes_helper = Some(self.scene.add(axes));
            }
        } else if let Some(id) = self.axes_helper.take() {
            if let Some(axes) = self.scene.remove(id) {
                self.dispose(&axes);
            }
        }

        log::info!("Debug mode {}", if self.debug_mode { "on" } else { "off" });
        self.debug_mode
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Delivers a surface size change. Ignored when the size did not change,
    /// is empty, or the resize observer has been detached. Returns whether
    /// the new size was applied.
    pub fn resize(&mut self, size: SurfaceSize) -> bool {
        let Some(observer) = self.resize_observer.as_mut() else {
            return false;
        };
        let Some(size) = observer.notify(size) else {
            return false;
        };
        self.apply_size(size);
        true
    }

    /// Sizes the cameras and backend to `size` without going through the
    /// resize observer, e.g. while the loop is stopped and a paused frame is
    /// still shown. Empty and unchanged sizes are ignored.
    pub fn apply_surface_size(&mut self, size: SurfaceSize) -> bool {
        if size.is_empty() || size == self.size {
            return false;
        }
        self.apply_size(size);
        true
    }

    fn apply_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.perspective_camera.resize(size);
        if let Some(camera) = self.orthographic_camera.as_mut() {
            camera.resize(size);
        }
        if !size.is_empty() {
            self.backend.resize(size);
        }
        log::debug!("Resized to {}x{}", size.width, size.height);
    }

    /// Records the pointer position in surface pixels and picks the nearest
    /// mesh under it.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        let picker = self.picker.as_mut()?;
        if self.size.is_empty() {
            return None;
        }
        let camera = select_camera(
            self.active,
            &self.perspective_camera,
            self.orthographic_camera.as_ref(),
        );
        picker.pointer_move(x, y, self.size, camera, &self.scene)
    }

    /// Reports the object under the pointer if it was added through
    /// [`add_object`](Self::add_object).
    pub fn pointer_click(&self) -> Option<ObjectId> {
        let selected = self.picker.as_ref()?.selected()?;
        if !self.tracked.contains(&selected) {
            return None;
        }
        let name = self.scene.get(selected).map_or("", |object| object.name.as_str());
        log::info!("Pointer clicked on object {} ({})", selected, name);
        Some(selected)
    }

    pub fn selected_object(&self) -> Option<ObjectId> {
        self.picker.as_ref().and_then(PointerPicker::selected)
    }

    /// Feeds mouse button and modifier state to the orbit input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.input.process_window_event(event)
    }

    /// Feeds pointer motion and wheel input to the orbit controls.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) -> bool {
        let Some(controls) = self.controls.as_mut() else {
            return false;
        };
        let camera = select_camera(
            self.active,
            &self.perspective_camera,
            self.orthographic_camera.as_ref(),
        );
        self.input
            .process_device_event(event, controls, camera, self.size)
    }

    pub fn disable_rotation(&mut self) {
        if let Some(controls) = self.controls.as_mut() {
            controls.enable_rotate = false;
        }
    }

    pub fn enable_rotation(&mut self) {
        if let Some(controls) = self.controls.as_mut() {
            controls.enable_rotate = true;
        }
    }

    pub fn rotation_enabled(&self) -> bool {
        self.controls.as_ref().is_some_and(|c| c.enable_rotate)
    }

    pub fn active_camera(&self) -> &dyn Camera {
        select_camera(
            self.active,
            &self.perspective_camera,
            self.orthographic_camera.as_ref(),
        )
    }

    pub fn active_camera_kind(&self) -> CameraKind {
        self.active
    }

    pub fn perspective_camera(&self) -> &PerspectiveCamera {
        &self.perspective_camera
    }

    pub fn orthographic_camera(&self) -> Option<&OrthographicCamera> {
        self.orthographic_camera.as_ref()
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        factory::{create_ambient_light, create_box, create_line, AmbientLightParams},
        rendering::HeadlessBackend,
    };
    use approx::assert_relative_eq;

    fn engine() -> SceneEngine<HeadlessBackend> {
        let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
        engine.init(&SurfaceSize::new(800, 400)).unwrap();
        engine
    }

    #[test]
    fn test_init_applies_defaults() {
        let engine = engine();
        assert_eq!(engine.scene().background.to_hex(), 0xcccccc);
        assert_eq!(engine.backend().background.map(Color::to_hex), Some(0xcccccc));
        assert_eq!(engine.backend().size, SurfaceSize::new(800, 400));
        assert_eq!(engine.perspective_camera().aspect, 2.0);
        assert!(engine.controls().is_some());
        assert!(engine.orthographic_camera().is_some());
        assert_eq!(engine.active_camera_kind(), CameraKind::Perspective);

        let controls = engine.controls().unwrap();
        assert!(controls.enable_damping);
        assert_eq!(controls.damping_factor, 0.05);
        assert!(!controls.screen_space_panning);
        assert_eq!((controls.min_distance, controls.max_distance), (5.0, 100.0));
        assert_relative_eq!(controls.max_polar_angle, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_second_init_fails_without_changes() {
        let mut engine = engine();
        let err = engine.init(&SurfaceSize::new(100, 100)).err();
        assert!(matches!(err, Some(EngineError::AlreadyInitialized)));
        assert_eq!(engine.size(), SurfaceSize::new(800, 400));
    }

    #[test]
    fn test_orthographic_camera_starts_looking_at_origin() {
        let engine = engine();
        let camera = engine.orthographic_camera().unwrap();
        assert_eq!(camera.position(), cgmath::Vector3::new(20.0, 20.0, 20.0));
        assert_eq!(camera.target(), cgmath::Vector3::new(0.0, 0.0, 0.0));
        assert_eq!((camera.left, camera.right), (-10.0, 10.0));
        assert_eq!((camera.bottom, camera.top), (-5.0, 5.0));
    }

    #[test]
    fn test_optional_parts_can_be_disabled() {
        let config = EngineConfig {
            orthographic: false,
            picking: false,
            ..EngineConfig::default()
        };
        let mut engine = SceneEngine::new(HeadlessBackend::new(), config);
        engine.init(&SurfaceSize::new(100, 100)).unwrap();
        engine.add_object(create_box(1.0, 1.0, 1.0, Color::WHITE));

        assert_eq!(engine.change_camera(CameraKind::Orthographic), CameraKind::Perspective);
        assert_eq!(engine.pointer_move(50.0, 50.0), None);
        assert_eq!(engine.pointer_click(), None);
    }

    #[test]
    fn test_remove_disposes_exactly_once() {
        let mut engine = engine();
        let cube = create_box(1.0, 1.0, 1.0, Color::WHITE);
        let geometry = cube.drawable().unwrap().geometry.id();
        let material = cube.drawable().unwrap().material.id();
        let id = engine.add_object(cube);
        assert_eq!(engine.tracked_objects(), &[id]);

        let removed = engine.remove_object(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(engine.tracked_objects().is_empty());
        assert_eq!(engine.backend().disposed_geometries, vec![geometry]);
        assert_eq!(engine.backend().disposed_materials, vec![material]);

        assert!(engine.remove_object(id).is_none());
        assert_eq!(engine.backend().disposed_geometries.len(), 1);
        assert_eq!(engine.backend().disposed_materials.len(), 1);
    }

    #[test]
    fn test_removing_lines_and_lights() {
        let mut engine = engine();
        let line = engine.add_object(create_line(
            &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            Color::RED,
        ));
        let light = engine.add_object(create_ambient_light(AmbientLightParams::default()));

        engine.remove_object(line);
        assert_eq!(engine.backend().disposed_geometries.len(), 1);

        engine.remove_object(light);
        assert_eq!(engine.backend().disposed_geometries.len(), 1);
        assert!(engine.scene().is_empty());
    }

    #[test]
    fn test_camera_position_and_look_at_apply_to_both_cameras() {
        let mut engine = engine();
        engine.set_camera_position(1.0, 2.0, 3.0);
        engine.look_at(0.0, 1.0, 0.0);

        let expected = cgmath::Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(engine.perspective_camera().position(), expected);
        assert_eq!(engine.orthographic_camera().unwrap().position(), expected);
        assert_eq!(
            engine.orthographic_camera().unwrap().target(),
            cgmath::Vector3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_change_camera_round_trip() {
        let mut engine = engine();
        engine.controls_mut().unwrap().target = cgmath::Vector3::new(1.0, 0.0, 0.0);

        assert_eq!(engine.change_camera(CameraKind::Orthographic), CameraKind::Orthographic);
        assert_eq!(engine.active_camera().kind(), CameraKind::Orthographic);
        let controls = engine.controls().unwrap();
        assert_eq!(controls.bound_camera(), CameraKind::Orthographic);
        assert_eq!(controls.target, cgmath::Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(
            engine.orthographic_camera().unwrap().target(),
            cgmath::Vector3::new(1.0, 0.0, 0.0)
        );

        assert_eq!(engine.change_camera(CameraKind::Perspective), CameraKind::Perspective);
        assert_eq!(engine.controls().unwrap().bound_camera(), CameraKind::Perspective);
    }

    #[test]
    fn test_debug_toggle_pairs_leave_no_helper() {
        let mut engine = engine();
        let cube = engine.add_object(create_box(1.0, 1.0, 1.0, Color::WHITE));

        assert!(engine.change_debug_mode());
        assert_eq!(engine.scene().len(), 2);
        assert_eq!(engine.tracked_objects(), &[cube]);
        let axes = engine
            .scene()
            .objects()
            .iter()
            .find(|object| object.name == "AxesHelper")
            .unwrap();
        assert_eq!(axes.drawable().unwrap().geometry.positions[1], [1000.0, 0.0, 0.0]);

        assert!(!engine.change_debug_mode());
        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.backend().disposed_geometries.len(), 1);

        for _ in 0..4 {
            engine.change_debug_mode();
        }
        assert!(!engine.debug_mode());
        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.backend().disposed_geometries.len(), 3);
    }

    #[test]
    fn test_resize_updates_projections() {
        let mut engine = engine();
        assert!(engine.resize(SurfaceSize::new(300, 600)));
        assert_eq!(engine.perspective_camera().aspect, 0.5);
        let ortho = engine.orthographic_camera().unwrap();
        assert_eq!((ortho.left, ortho.right), (-2.5, 2.5));
        assert_eq!(engine.backend().size, SurfaceSize::new(300, 600));

        assert!(!engine.resize(SurfaceSize::new(300, 600)));
        assert!(!engine.resize(SurfaceSize::new(0, 600)));
        assert_eq!(engine.perspective_camera().aspect, 0.5);
    }

    #[test]
    fn test_stop_detaches_controls_and_observer() {
        let mut engine = engine();
        engine.start();
        assert!(engine.tick());
        assert_eq!(engine.backend().frames, 1);

        engine.stop();
        assert!(engine.controls().is_none());
        assert!(!engine.tick());
        assert_eq!(engine.backend().frames, 1);
        assert!(!engine.resize(SurfaceSize::new(10, 10)));
    }

    #[test]
    fn test_stopped_engine_can_still_be_sized_directly() {
        let mut engine = engine();
        engine.add_object(create_box(2.0, 2.0, 2.0, Color::WHITE));
        engine.set_camera_position(0.0, 0.0, 10.0);
        engine.look_at(0.0, 0.0, 0.0);
        engine.stop();

        assert!(!engine.resize(SurfaceSize::new(400, 400)));
        assert!(engine.apply_surface_size(SurfaceSize::new(400, 400)));
        assert_eq!(engine.size(), SurfaceSize::new(400, 400));
        assert_eq!(engine.perspective_camera().aspect, 1.0);
        assert_eq!(engine.backend().size, SurfaceSize::new(400, 400));
        assert!(engine.pointer_move(200.0, 200.0).is_some());

        assert!(!engine.apply_surface_size(SurfaceSize::new(400, 400)));
        assert!(!engine.apply_surface_size(SurfaceSize::new(0, 400)));
    }

    #[test]
    fn test_render_errors_do_not_stop_the_loop() {
        let mut engine = engine();
        engine.start();
        engine.backend_mut().fail_next.push(RenderError::Timeout);
        assert!(engine.tick());
        assert!(engine.tick());
        assert_eq!(engine.backend().frames, 1);

        engine.backend_mut().fail_next.push(RenderError::OutOfMemory);
        assert!(matches!(
            engine.render(),
            Err(EngineError::Render(RenderError::OutOfMemory))
        ));
    }

    #[test]
    fn test_pointer_picking_and_click() {
        let mut engine = engine();
        engine.set_camera_position(0.0, 0.0, 10.0);
        engine.start();
        engine.tick();

        let cube = engine.add_object(create_box(2.0, 2.0, 2.0, Color::WHITE));
        assert_eq!(engine.pointer_move(400.0, 200.0), Some(cube));
        assert_eq!(engine.pointer_click(), Some(cube));

        assert_eq!(engine.pointer_move(5.0, 5.0), None);
        assert_eq!(engine.pointer_click(), None);
    }

    #[test]
    fn test_tracked_line_is_clickable() {
        let mut engine = engine();
        engine.set_camera_position(0.0, 0.0, 10.0);
        engine.start();
        engine.tick();

        let line = engine.add_object(create_line(&[[-3.0, 0.0, 0.0], [3.0, 0.0, 0.0]], Color::BLACK));
        assert_eq!(engine.pointer_move(400.0, 200.0), Some(line));
        assert_eq!(engine.pointer_click(), Some(line));
    }

    #[test]
    fn test_axes_helper_blocks_meshes_behind_it() {
        let mut engine = engine();
        engine.set_camera_position(0.0, 0.0, 10.0);
        engine.start();
        engine.tick();

        let cube = engine.add_object(create_box(1.0, 1.0, 1.0, Color::WHITE).with_position(0.0, 0.0, -3.0));
        engine.change_debug_mode();
        let selected = engine.pointer_move(400.0, 200.0);
        assert!(selected.is_some());
        assert_ne!(selected, Some(cube));
        assert_eq!(engine.pointer_click(), None);

        engine.change_debug_mode();
        assert_eq!(engine.pointer_move(400.0, 200.0), Some(cube));
    }

    #[test]
    fn test_click_ignores_untracked_objects() {
        let mut engine = engine();
        engine.set_camera_position(0.0, 0.0, 10.0);
        engine.start();
        engine.tick();

        let cube = engine.add_object(create_box(2.0, 2.0, 2.0, Color::WHITE));
        engine.pointer_move(400.0, 200.0);
        engine.remove_object(cube);
        assert_eq!(engine.selected_object(), None);
        assert_eq!(engine.pointer_click(), None);
    }

    #[test]
    fn test_rotation_toggle() {
        let mut engine = engine();
        engine.disable_rotation();
        assert!(!engine.rotation_enabled());
        engine.enable_rotation();
        assert!(engine.rotation_enabled());
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut engine = engine();
        engine.add_object(create_box(1.0, 1.0, 1.0, Color::WHITE));
        engine.add_object(create_box(1.0, 1.0, 1.0, Color::WHITE));
        engine.change_debug_mode();

        engine.unmount();
        assert!(engine.scene().is_empty());
        assert!(engine.tracked_objects().is_empty());
        assert_eq!(engine.backend().disposed_geometries.len(), 3);
        assert!(!engine.debug_mode());
        assert!(engine.init(&SurfaceSize::new(10, 10)).is_ok());
    }
}
