//! Windowed application: owns the winit event loop, the engine, the UI and
//! the view of the current route.

use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    gfx::{
        rendering::{FrameContext, WgpuRenderer},
        SceneEngine, SurfaceSize,
    },
    routes::Route,
    ui::{engine_panel, PanelAction, UiManager},
    views::View,
};

pub struct CairnApp {
    event_loop: EventLoop<()>,
    state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine<WgpuRenderer>>,
    ui: Option<UiManager>,
    route: Route,
    view: Box<dyn View<WgpuRenderer>>,
    pending: Option<PanelAction>,
}

impl CairnApp {
    pub fn new(config: AppConfig, route: Route) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        Ok(Self {
            event_loop,
            state: AppState {
                config,
                window: None,
                engine: None,
                ui: None,
                route,
                view: route.load(),
                pending: None,
            },
        })
    }

    /// Runs until the window is closed.
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.state)
            .context("event loop terminated with an error")
    }
}

impl AppState {
    /// Initializes the engine on the window, lets the view fill the scene and
    /// starts the frame loop.
    fn mount(&mut self) {
        let (Some(window), Some(engine)) = (self.window.as_ref(), self.engine.as_mut()) else {
            return;
        };
        match engine.init(&**window) {
            Ok(engine) => {
                self.view.setup(engine);
                engine.start();
            }
            Err(error) => log::error!("Failed to mount {}: {error}", self.route),
        }
        window.set_title(&format!(
            "{} | {}",
            self.config.window.title,
            self.view.title()
        ));
    }

    fn navigate(&mut self, route: Route) {
        if let Some(engine) = self.engine.as_mut() {
            engine.unmount();
        }
        log::info!("Navigating to {route}");
        self.route = route;
        self.view = route.load();
        self.mount();
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Navigate(route) => self.navigate(route),
            PanelAction::Restart => self.navigate(self.route),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyC => {
                engine.change_camera(engine.active_camera_kind().toggled());
            }
            KeyCode::KeyD => {
                engine.change_debug_mode();
            }
            KeyCode::KeyR => {
                if engine.rotation_enabled() {
                    engine.disable_rotation();
                } else {
                    engine.enable_rotation();
                }
            }
            KeyCode::Space => {
                if engine.is_running() {
                    engine.stop();
                } else {
                    self.pending = Some(PanelAction::Restart);
                }
            }
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine), Some(ui)) =
            (self.window.as_ref(), self.engine.as_mut(), self.ui.as_mut())
        else {
            return;
        };

        if engine.is_running() {
            let dt = engine.frame_loop().delta();
            self.view.update(engine, dt);
        }

        let route = self.route;
        let view = &mut self.view;
        let mut action = None;
        ui.update_logic(window, |frame| {
            action = engine_panel(frame, engine, route);
            view.ui(frame, engine);
        });

        let draw = |backend: &mut WgpuRenderer, frame: &FrameContext<'_>| {
            backend.render_frame_with_overlay(frame, |device, queue, encoder, target| {
                ui.render_display_only(device, queue, encoder, target)
            })
        };
        if engine.is_running() {
            engine.tick_with(draw);
        } else if let Err(error) = engine.render_with(draw) {
            log::error!("Failed to draw paused frame: {error}");
        }

        if action.is_some() {
            self.pending = action;
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                log::error!("Failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let size = SurfaceSize::from(window.inner_size());
        let renderer = match pollster::block_on(WgpuRenderer::new(window.clone(), size, true)) {
            Ok(renderer) => renderer,
            Err(error) => {
                log::error!("Failed to create renderer: {error}");
                event_loop.exit();
                return;
            }
        };

        let mut ui = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui.update_display_size(size.width, size.height);

        self.engine = Some(SceneEngine::new(renderer, self.config.engine.clone()));
        self.ui = Some(ui);
        self.window = Some(window);
        self.mount();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui) = self.ui.as_mut() {
            if ui.handle_input(&window, &event) {
                window.request_redraw();
                return;
            }
        }

        if let Some(engine) = self.engine.as_mut() {
            engine.handle_window_event(&event);
        }

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical) => {
                let size = SurfaceSize::from(*physical);
                if let Some(ui) = self.ui.as_mut() {
                    ui.update_display_size(size.width, size.height);
                }
                if let Some(engine) = self.engine.as_mut() {
                    if !engine.resize(size) && !engine.is_running() {
                        engine.apply_surface_size(size);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.pointer_move(position.x as f32, position.y as f32);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(engine) = self.engine.as_mut() {
                    if let Some(id) = engine.pointer_click() {
                        self.view.on_select(engine, id);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, *key),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }

        if let Some(action) = self.pending.take() {
            self.apply(action);
        }

        let paused = self.engine.as_ref().is_some_and(|engine| !engine.is_running());
        if paused && !matches!(event, WindowEvent::RedrawRequested) {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.ui.as_ref().is_some_and(UiManager::wants_mouse) {
            return;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.handle_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let running = self.engine.as_ref().is_some_and(SceneEngine::is_running);
        if running {
            event_loop.set_control_flow(ControlFlow::Poll);
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
