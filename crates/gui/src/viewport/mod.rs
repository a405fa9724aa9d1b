//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
pub use floorplan_gui_lib::viewport::{camera, mesh};

use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::i18n::{mode_key, t};
use crate::state::editor::GridResolver;
use crate::state::{AppState, EditorSession};
use camera::ArcBallCamera;
use gl_renderer::GlRenderer;

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            gl_renderer: None,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    /// Release GPU resources
    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Fit the camera to the installed walls
    pub fn frame_walls(&mut self, state: &AppState) {
        match state.editor().and_then(|e| e.bounds()) {
            Some(bounds) => self.camera.frame(&bounds),
            None => self.reset_camera(),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        let input = state.settings.input.clone();
        let Some(session) = state.session.as_mut() else {
            return;
        };

        // ── Edit pointer pipeline ─────────────────────────────
        self.handle_pointer(ui, rect, &response, session);

        // ── Camera controls ─────────────────────────────────
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera
                .rotate(delta.x * input.orbit_speed, delta.y * input.orbit_speed);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera
                .pan(-delta.x * input.pan_speed, delta.y * input.pan_speed);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * input.zoom_speed);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
        self.draw_overlays(ui, rect, state);
    }

    /// Feed primary-button events to the editor. Camera drags still reach the
    /// editor so it can tell them apart from clicks.
    fn handle_pointer(
        &mut self,
        ui: &Ui,
        rect: egui::Rect,
        response: &egui::Response,
        session: &mut EditorSession,
    ) {
        let (pressed, released, pos) = ui.input(|i| {
            (
                i.pointer.button_pressed(egui::PointerButton::Primary),
                i.pointer.button_released(egui::PointerButton::Primary),
                i.pointer.latest_pos(),
            )
        });
        let resolver = GridResolver::new(&self.camera, rect);
        let editor = &mut session.editor;

        if let Some(pos) = pos {
            if pressed && response.hovered() {
                editor.on_pointer_down(pos);
            }
            if response.hovered() {
                editor.on_pointer_move(pos, &resolver);
            } else {
                editor.on_pointer_leave();
            }
            if released {
                if let Some(outcome) = editor.on_pointer_up(pos, &resolver) {
                    tracing::debug!(?outcome, "Viewport click");
                }
            }
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                t("status.no_gl"),
                egui::FontId::proportional(14.0),
                egui::Color32::GRAY,
            );
            return;
        };
        let Some(editor) = state.editor() else {
            return;
        };

        let renderer = gl_renderer.clone();
        let camera = self.camera;
        let walls = editor.mesh();
        let version = editor.cache().rebuild_count();
        let ghost = editor.hover().map(|cell| (cell, editor.ghost_color()));
        let wall_height = editor.style().height;
        let grid_settings = state.settings.grid.clone();
        let grid_color = state.settings.theme.grid_color();
        let bg_color = state.settings.theme.background();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    r.update_grid(gl, &grid_settings, grid_color);
                    r.sync_walls(gl, &walls, version);
                    r.sync_ghost(gl, ghost, wall_height);

                    let params = gl_renderer::RenderParams {
                        viewport,
                        grid_visible: grid_settings.visible,
                        bg_color,
                    };
                    r.paint(gl, &camera, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(editor) = state.editor() else {
            return;
        };
        let painter = ui.painter_at(rect);

        // Current mode, top right
        let label = format!("{}: {}", t("mode.current"), t(mode_key(editor.mode())));
        let galley = painter.layout_no_wrap(
            label,
            egui::FontId::proportional(13.0),
            egui::Color32::from_rgb(220, 220, 220),
        );
        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - galley.size().x - 20.0, rect.top() + 6.0),
            galley.size() + egui::vec2(12.0, 8.0),
        );
        painter.rect_filled(
            overlay_rect,
            4.0,
            egui::Color32::from_rgba_premultiplied(0, 0, 0, 140),
        );
        painter.galley(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            galley,
            egui::Color32::from_rgb(220, 220, 220),
        );

        if editor.topology().is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                t("status.nav_hint"),
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }
}
