//! The engine panel: navigation plus camera, debug, rotation and loop
//! controls.

use crate::{
    gfx::{camera::CameraKind, rendering::RenderBackend, SceneEngine},
    routes::Route,
};

/// Requests from the panel that the application has to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Navigate(Route),
    /// Remount the current view after the loop was stopped.
    Restart,
}

pub fn engine_panel<B: RenderBackend>(
    ui: &imgui::Ui,
    engine: &mut SceneEngine<B>,
    current: Route,
) -> Option<PanelAction> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let mut action = None;
    ui.window("Cairn")
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            for route in Route::ALL {
                if route != Route::ALL[0] {
                    ui.same_line();
                }
                let _disabled = ui.begin_disabled(route == current);
                if ui.button(route.name()) {
                    action = Some(PanelAction::Navigate(route));
                }
            }
            ui.separator();

            render_camera_controls(ui, engine);
            ui.separator();

            if engine.is_running() {
                if ui.button("Stop") {
                    engine.stop();
                }
                ui.same_line();
                let dt = engine.frame_loop().delta().as_secs_f32();
                let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
                ui.text(format!("{fps:.0} fps, frame {}", engine.frame_loop().frame_count()));
            } else if ui.button("Restart") {
                action = Some(PanelAction::Restart);
            }

            if let Some(id) = engine.selected_object() {
                let name = engine.object(id).map_or("", |object| object.name.as_str());
                ui.text(format!("Hovering {id} {name}"));
            }
        });
    action
}

fn render_camera_controls<B: RenderBackend>(ui: &imgui::Ui, engine: &mut SceneEngine<B>) {
    let active = engine.active_camera_kind();
    let has_orthographic = engine.orthographic_camera().is_some();
    {
        let _disabled = ui.begin_disabled(!has_orthographic);
        if ui.button(format!("Camera: {active}")) {
            engine.change_camera(active.toggled());
        }
    }
    if active == CameraKind::Orthographic {
        ui.same_line();
        ui.text_disabled("(pan and zoom)");
    }

    let mut debug = engine.debug_mode();
    if ui.checkbox("Axes helper", &mut debug) {
        engine.change_debug_mode();
    }

    let mut rotation = engine.rotation_enabled();
    if ui.checkbox("Rotation", &mut rotation) {
        if rotation {
            engine.enable_rotation();
        } else {
            engine.disable_rotation();
        }
    }
}
