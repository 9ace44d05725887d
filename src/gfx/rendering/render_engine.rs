//! WGPU-based renderer for the Cairn scene engine
//!
//! Draws lit triangle meshes and unlit lines with depth testing, and lets the
//! caller record a UI overlay into the same frame.

use std::collections::HashMap;

use wgpu::TextureFormat;

use crate::{
    gfx::{
        geometry::{GeometryId, Topology},
        resources::{GlobalBindings, GlobalUBO, GlobalUBOContent, MaterialId, TextureResource},
        scene::{ObjectId, SceneObject},
        surface::SurfaceSize,
        Color,
    },
    wgpu_utils::{binding_types, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
};

use super::{
    backend::{FrameContext, RenderBackend, RenderError},
    gpu_resources::{GpuGeometry, GpuUniform, MaterialUniform, ObjectUniform},
    pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout},
};

const MESH_PIPELINE: &str = "Mesh";
const MESH_DOUBLE_SIDED_PIPELINE: &str = "MeshDoubleSided";
const LINE_LIST_PIPELINE: &str = "LineList";
const LINE_STRIP_PIPELINE: &str = "LineStrip";

struct GpuInstance {
    uniform: GpuUniform<ObjectUniform>,
    last_frame: u64,
}

struct DrawCall {
    pipeline: &'static str,
    object: ObjectId,
    geometry: GeometryId,
    material: MaterialId,
}

/// Core renderer managing GPU resources and draw calls
///
/// Geometry and material uploads are cached by id and kept until disposed.
/// Per-object uniforms are dropped automatically once their object stops
/// being drawn.
pub struct WgpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,
    background: Color,

    geometries: HashMap<GeometryId, GpuGeometry>,
    materials: HashMap<MaterialId, GpuUniform<MaterialUniform>>,
    instances: HashMap<ObjectId, GpuInstance>,
    frame_index: u64,
}

impl WgpuRenderer {
    /// Creates a renderer drawing into `window`.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: SurfaceSize,
        vsync: bool,
    ) -> Result<WgpuRenderer, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::Other(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::Other(format!("no suitable adapter: {e}")))?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::Other(format!("failed to request device: {e}")))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| RenderError::Other("surface supports no formats".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let object_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(&device, "Object Bind Group Layout");
        let material_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Material Bind Group Layout");

        let mut pipeline_manager = PipelineManager::new();
        pipeline_manager.load_shader(&device, "mesh", include_str!("mesh.wgsl"));
        pipeline_manager.load_shader(&device, "line", include_str!("line.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            object_layout.layout.clone(),
            material_layout.layout.clone(),
        ];
        let base = PipelineConfig::default()
            .with_color_format(format)
            .with_bind_group_layouts(layouts);

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            base.clone().with_label("MESH").with_shader("mesh"),
        );
        pipeline_manager.register_pipeline(
            MESH_DOUBLE_SIDED_PIPELINE,
            base.clone()
                .with_label("MESH DOUBLE SIDED")
                .with_shader("mesh")
                .with_cull_mode(None),
        );
        for (name, topology) in [
            (LINE_LIST_PIPELINE, wgpu::PrimitiveTopology::LineList),
            (LINE_STRIP_PIPELINE, wgpu::PrimitiveTopology::LineStrip),
        ] {
            pipeline_manager.register_pipeline(
                name,
                base.clone()
                    .with_label(name)
                    .with_shader("line")
                    .with_vertex_layout(VertexLayout::Line)
                    .with_primitive_topology(topology)
                    .with_cull_mode(None),
            );
        }

        if let Err(errors) = pipeline_manager.create_all_pipelines(&device) {
            return Err(RenderError::Other(errors.join("; ")));
        }

        Ok(WgpuRenderer {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_layout,
            material_layout,
            background: Color::WHITE,
            geometries: HashMap::new(),
            materials: HashMap::new(),
            instances: HashMap::new(),
            frame_index: 0,
        })
    }

    /// Renders a frame, then lets `overlay` record extra passes (the UI) on top.
    pub fn render_frame_with_overlay<F>(
        &mut self,
        frame: &FrameContext<'_>,
        overlay: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {error}, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Err(RenderError::SurfaceLost);
            }
            Err(error) => return Err(error.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.global_ubo.update_content(
            &self.queue,
            GlobalUBOContent::new(frame.camera, frame.scene.lights()),
        );
        let draws = self.prepare(frame);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for draw in &draws {
                let (Some(pipeline), Some(geometry), Some(material), Some(instance)) = (
                    self.pipeline_manager.get_pipeline(draw.pipeline),
                    self.geometries.get(&draw.geometry),
                    self.materials.get(&draw.material),
                    self.instances.get(&draw.object),
                ) else {
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, instance.uniform.bind_group(), &[]);
                render_pass.set_bind_group(2, material.bind_group(), &[]);
                geometry.draw(&mut render_pass);
            }
        }

        overlay(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads whatever the visible drawables are missing and returns the
    /// draw list in scene order.
    fn prepare(&mut self, frame: &FrameContext<'_>) -> Vec<DrawCall> {
        self.frame_index += 1;
        let mut draws = Vec::new();

        for object in frame.scene.objects().iter().filter(|o| o.visible) {
            let Some(drawable) = object.drawable() else {
                continue;
            };
            let geometry = &drawable.geometry;
            let material = &drawable.material;

            let (pipeline, layout) = match geometry.topology {
                Topology::TriangleList if material.is_double_sided() => {
                    (MESH_DOUBLE_SIDED_PIPELINE, VertexLayout::Mesh)
                }
                Topology::TriangleList => (MESH_PIPELINE, VertexLayout::Mesh),
                Topology::LineList => (LINE_LIST_PIPELINE, VertexLayout::Line),
                Topology::LineStrip => (LINE_STRIP_PIPELINE, VertexLayout::Line),
            };

            if geometry.vertex_count() == 0 {
                continue;
            }
            let needs_upload = self
                .geometries
                .get(&geometry.id())
                .map_or(true, |gpu| gpu.is_stale(geometry, layout));
            if needs_upload {
                log::debug!(
                    "Uploading geometry {} ({} vertices)",
                    geometry.id().raw(),
                    geometry.vertex_count()
                );
                let gpu = GpuGeometry::upload(&self.device, geometry, layout);
                if let Some(old) = self.geometries.insert(geometry.id(), gpu) {
                    old.destroy();
                }
            }

            let material_uniform = MaterialUniform::from(material);
            match self.materials.get_mut(&material.id()) {
                Some(gpu) => gpu.update(&self.queue, material_uniform),
                None => {
                    let gpu = GpuUniform::new(
                        &self.device,
                        &self.material_layout,
                        &material_uniform,
                        "Material Bind Group",
                    );
                    self.materials.insert(material.id(), gpu);
                }
            }

            self.update_instance(object);

            draws.push(DrawCall {
                pipeline,
                object: object.id(),
                geometry: geometry.id(),
                material: material.id(),
            });
        }

        let frame_index = self.frame_index;
        self.instances.retain(|_, instance| {
            let alive = instance.last_frame == frame_index;
            if !alive {
                instance.uniform.destroy();
            }
            alive
        });

        draws
    }

    fn update_instance(&mut self, object: &SceneObject) {
        let uniform = ObjectUniform::new(object.world_matrix());
        match self.instances.get_mut(&object.id()) {
            Some(instance) => {
                instance.uniform.update(&self.queue, uniform);
                instance.last_frame = self.frame_index;
            }
            None => {
                let instance = GpuInstance {
                    uniform: GpuUniform::new(
                        &self.device,
                        &self.object_layout,
                        &uniform,
                        "Object Bind Group",
                    ),
                    last_frame: self.frame_index,
                };
                self.instances.insert(object.id(), instance);
            }
        }
    }

    /// Switches between vsync and uncapped presentation.
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = if enable {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Number of geometries and materials currently uploaded
    pub fn resource_counts(&self) -> (usize, usize) {
        (self.geometries.len(), self.materials.len())
    }
}

impl RenderBackend for WgpuRenderer {
    fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    fn render(&mut self, frame: &FrameContext<'_>) -> Result<(), RenderError> {
        self.render_frame_with_overlay(frame, |_, _, _, _| {})
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        if let Some(gpu) = self.geometries.remove(&id) {
            gpu.destroy();
        }
    }

    fn dispose_material(&mut self, id: MaterialId) {
        if let Some(gpu) = self.materials.remove(&id) {
            gpu.destroy();
        }
    }
}
