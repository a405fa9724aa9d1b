//! Main application module

mod keyboard;
pub mod menus;
mod styles;

use std::time::{Duration, Instant};

use eframe::egui;

use crate::state::{AppState, Theme};
use crate::ui::{mode_panel, status_bar, world_list};
use crate::viewport::ViewportPanel;

/// Main application
pub struct FloorplanApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied theme and font size (to detect changes)
    applied_style: (Theme, f32),
}

impl FloorplanApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut state: AppState,
        initial_world: Option<String>,
    ) -> Self {
        let applied_style = (state.settings.theme, state.settings.ui.font_size);
        styles::configure_styles(&cc.egui_ctx, applied_style.0, applied_style.1);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        if let Some(id) = initial_world {
            world_list::open_world(&mut state, &id);
        }

        Self {
            state,
            viewport,
            applied_style,
        }
    }
}

impl eframe::App for FloorplanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let style = (self.state.settings.theme, self.state.settings.ui.font_size);
        if style != self.applied_style {
            styles::configure_styles(ctx, style.0, style.1);
            self.applied_style = style;
        }

        // Autosave runs inside the frame, so keep frames coming while a world is open
        if self.state.session.is_some() {
            self.state.poll_autosave(Instant::now());
            ctx.request_repaint_after(Duration::from_secs(1));
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if self.state.session.is_some() {
                    menus::world_menu(ui, &mut self.state);
                }
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        if self.state.session.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                world_list::show(ui, &mut self.state);
            });
            return;
        }

        // ── Left panel: edit modes ───────────────────────────
        egui::SidePanel::left("mode_panel")
            .default_width(170.0)
            .width_range(140.0..=300.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                mode_panel::show(ui, &mut self.state);
            });

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        self.state.close_world();
        self.state.settings.save();
        if let Some(gl) = gl {
            self.viewport.destroy_gl(gl);
        }
        tracing::info!("Application closed");
    }
}
