//! ImGui integration with wgpu and winit: frame timing, input capture and
//! overlay rendering.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

const FONT_SIZE: f32 = 18.0;

/// Which ImGui capture flag decides whether an event stops at the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Mouse,
    Keyboard,
    /// Seen by both the UI and the scene.
    Shared,
}

/// `None` for events ImGui has no use for.
fn capture_kind(event: &WindowEvent) -> Option<Capture> {
    match event {
        WindowEvent::CursorMoved { .. }
        | WindowEvent::MouseInput { .. }
        | WindowEvent::MouseWheel { .. } => Some(Capture::Mouse),
        WindowEvent::KeyboardInput { .. } => Some(Capture::Keyboard),
        WindowEvent::ModifiersChanged(_) | WindowEvent::Focused(_) => Some(Capture::Shared),
        _ => None,
    }
}

/// Owns the ImGui context and its winit platform and wgpu renderer.
///
/// A frame is built with [`update_logic`](Self::update_logic) and recorded
/// into the scene's command encoder with
/// [`render_display_only`](Self::render_display_only).
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
    frame_pending: bool,
}

impl UiManager {
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        // Locked DPI, scaling is handled by the font size
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: FONT_SIZE,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
            frame_pending: false,
        }
    }

    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Forwards an input event to ImGui. Returns true if the UI captured it,
    /// in which case the scene should not see it.
    ///
    /// Modifier and focus changes are never captured: the orbit input tracks
    /// them too.
    pub fn handle_input(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let Some(capture) = capture_kind(event) else {
            return false;
        };
        let event: Event<()> = Event::WindowEvent {
            window_id: window.id(),
            event: event.clone(),
        };
        self.platform
            .handle_event(self.context.io_mut(), window, &event);

        let io = self.context.io();
        match capture {
            Capture::Mouse => io.want_capture_mouse,
            Capture::Keyboard => io.want_capture_keyboard,
            Capture::Shared => false,
        }
    }

    /// Whether ImGui wants raw mouse motion, e.g. while a slider is dragged.
    pub fn wants_mouse(&self) -> bool {
        self.context.io().want_capture_mouse
    }

    /// Starts an ImGui frame and runs `run_ui` to build it. Returns whether
    /// the UI wants input this frame.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        if self.frame_pending {
            // The previous frame was never recorded; close it first.
            self.context.render();
        }

        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(error) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::error!("Failed to prepare UI frame: {error}");
            return false;
        }

        let ui = self.context.frame();
        run_ui(&ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(&ui, window);
        }
        self.frame_pending = true;

        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Records the frame built by the last [`update_logic`](Self::update_logic)
    /// on top of `color_attachment`, keeping the scene underneath.
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(error) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("Failed to render UI: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::{dpi::PhysicalSize, event::Modifiers};

    #[test]
    fn test_modifiers_and_focus_reach_the_scene() {
        assert_eq!(capture_kind(&WindowEvent::Focused(false)), Some(Capture::Shared));
        assert_eq!(
            capture_kind(&WindowEvent::ModifiersChanged(Modifiers::default())),
            Some(Capture::Shared)
        );
        assert_eq!(capture_kind(&WindowEvent::Resized(PhysicalSize::new(1, 1))), None);
        assert_eq!(capture_kind(&WindowEvent::RedrawRequested), None);
    }
}
