//! Application menu bar, file actions and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::worlds::StoreError;
use crate::state::{AppSettings, AppState, Theme};
use crate::viewport::ViewportPanel;

/// Show the world menu (editor screen)
pub fn world_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.world"), |ui| {
        if ui.button(t("menu.back_to_list")).clicked() {
            state.close_world();
            ui.close_menu();
        }
        if ui.button(t("menu.save_now")).clicked() {
            save_world(state);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.import_world")).clicked() {
            ui.close_menu();
            import_world(state);
        }
        if ui.button(t("menu.export_world")).clicked() {
            ui.close_menu();
            if let Some(id) = state.session.as_ref().map(|s| s.world_id.clone()) {
                // Flush edits so the exported file matches the screen
                save_world(state);
                export_world(state, &id);
            }
        }
        if ui.button(t("menu.export_glb")).clicked() {
            ui.close_menu();
            export_glb(state);
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.close_menu();
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.menu_button(t("menu.theme"), |ui| {
            for theme in Theme::all() {
                if ui
                    .radio(state.settings.theme == *theme, theme.display_name())
                    .clicked()
                {
                    state.settings.theme = *theme;
                    state.settings.save();
                    ui.close_menu();
                }
            }
        });
        if ui
            .checkbox(&mut state.settings.grid.visible, t("menu.show_grid"))
            .changed()
        {
            state.settings.save();
        }
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        if ui.button(t("menu.frame_walls")).clicked() {
            viewport.frame_walls(state);
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.radio(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
            if ui.radio(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

// ── File actions ──────────────────────────────────────────────

/// Save the open world and report the result in the status bar
pub fn save_world(state: &mut AppState) {
    match state.save_now() {
        Ok(()) => state.notify(t("status.saved")),
        Err(e) => {
            tracing::error!("Failed to save world: {e}");
            state.notify_error(format!("{}: {e}", t("status.save_failed")));
        }
    }
}

/// Pick a shared world file and add it to the list
pub fn import_world(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.import_title"))
        .add_filter("JSON", &["json"])
        .pick_file()
    else {
        return;
    };
    match state.worlds.import(&path) {
        Ok(_) => state.notify(t("status.imported")),
        Err(e) => {
            tracing::error!("Failed to import {}: {e}", path.display());
            state.notify_error(format!("{}: {e}", t("status.import_failed")));
        }
    }
}

/// Write a world to a user-chosen JSON file
pub fn export_world(state: &mut AppState, id: &str) {
    let file_name = state
        .worlds
        .get(id)
        .map(|info| format!("{}.json", info.name))
        .unwrap_or_else(|| "world.json".to_string());
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.export_title"))
        .add_filter("JSON", &["json"])
        .set_file_name(file_name)
        .save_file()
    else {
        return;
    };
    let result = state.worlds.export(id, &path);
    report_export(state, result);
}

/// Write the installed wall mesh as binary glTF
pub fn export_glb(state: &mut AppState) {
    let Some(glb) = state
        .editor()
        .and_then(|editor| crate::export::build_glb(&editor.mesh()))
    else {
        state.notify(t("status.nothing_to_export"));
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.export_glb_title"))
        .add_filter("GLB", &["glb"])
        .set_file_name("walls.glb")
        .save_file()
    else {
        return;
    };
    let result = std::fs::write(&path, glb).map_err(StoreError::from);
    if result.is_ok() {
        tracing::info!("Exported GLB to {}", path.display());
    }
    report_export(state, result);
}

fn report_export(state: &mut AppState, result: Result<(), StoreError>) {
    match result {
        Ok(()) => state.notify(t("status.exported")),
        Err(e) => {
            tracing::error!("Export failed: {e}");
            state.notify_error(format!("{}: {e}", t("status.export_failed")));
        }
    }
}

// ── Settings window ───────────────────────────────────────────

pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    let mut changed = false;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                changed |= show_appearance_settings(ui, &mut state.settings);
                changed |= show_grid_settings(ui, &mut state.settings);
                changed |= show_wall_settings(ui, &mut state.settings);
                changed |= show_input_settings(ui, &mut state.settings);
                changed |= show_autosave_settings(ui, &mut state.settings);
                changed |= show_ui_settings(ui, &mut state.settings);
                changed |= show_settings_buttons(ui, &mut state.settings, &mut state.show_settings_window);
            });
        });
    if changed {
        state.apply_settings();
        state.settings.save();
    }
    state.show_settings_window &= open;
}

fn show_appearance_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.appearance"));
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(t("settings.theme"));
        egui::ComboBox::from_id_salt("theme_combo")
            .selected_text(settings.theme.display_name())
            .show_ui(ui, |ui| {
                for theme in Theme::all() {
                    changed |= ui
                        .selectable_value(&mut settings.theme, *theme, theme.display_name())
                        .changed();
                }
            });
    });
    ui.add_space(10.0);
    changed
}

fn show_grid_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.grid"));
    let grid = &mut settings.grid;
    let mut changed = ui.checkbox(&mut grid.visible, t("settings.grid_visible")).changed();

    ui.horizontal(|ui| {
        ui.label(t("settings.grid_range"));
        changed |= ui
            .add(egui::DragValue::new(&mut grid.range).speed(1).range(1..=256))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_size"));
        changed |= ui
            .add(egui::DragValue::new(&mut grid.size).speed(0.1).range(0.1..=10.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        changed |= ui.add(egui::Slider::new(&mut grid.opacity, 0.0..=1.0)).changed();
    });
    ui.add_space(10.0);
    changed
}

fn show_wall_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.walls"));
    let walls = &mut settings.walls;
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label(t("settings.wall_height"));
        changed |= ui
            .add(egui::DragValue::new(&mut walls.height).speed(0.05).range(0.1..=10.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.wall_thickness"));
        changed |= ui
            .add(egui::DragValue::new(&mut walls.thickness).speed(0.01).range(0.02..=0.5))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.wall_color"));
        changed |= ui.color_edit_button_srgb(&mut walls.color).changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.wall_roughness"));
        changed |= ui.add(egui::Slider::new(&mut walls.roughness, 0.0..=1.0)).changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.wall_metalness"));
        changed |= ui.add(egui::Slider::new(&mut walls.metalness, 0.0..=1.0)).changed();
    });
    ui.add_space(10.0);
    changed
}

fn show_input_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.input"));
    let input = &mut settings.input;
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label(t("settings.drag_threshold"));
        changed |= ui
            .add(egui::DragValue::new(&mut input.drag_threshold).speed(0.5).range(0.0..=50.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.orbit_speed"));
        changed |= ui.add(egui::Slider::new(&mut input.orbit_speed, 0.05..=2.0)).changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.pan_speed"));
        changed |= ui.add(egui::Slider::new(&mut input.pan_speed, 0.001..=0.1)).changed();
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.zoom_speed"));
        changed |= ui.add(egui::Slider::new(&mut input.zoom_speed, 0.001..=0.05)).changed();
    });
    ui.add_space(10.0);
    changed
}

fn show_autosave_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.autosave"));
    let autosave = &mut settings.autosave;
    let mut changed = ui
        .checkbox(&mut autosave.enabled, t("settings.autosave_enabled"))
        .changed();
    ui.horizontal(|ui| {
        ui.label(t("settings.autosave_interval"));
        changed |= ui
            .add(egui::DragValue::new(&mut autosave.interval_secs).speed(1).range(1..=600))
            .changed();
    });
    ui.add_space(10.0);
    changed
}

fn show_ui_settings(ui: &mut egui::Ui, settings: &mut AppSettings) -> bool {
    ui.heading(t("settings.ui"));
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        changed |= ui
            .add(egui::Slider::new(&mut settings.ui.font_size, 10.0..=24.0).step_by(1.0))
            .changed();
    });
    ui.add_space(10.0);
    changed
}

fn show_settings_buttons(ui: &mut egui::Ui, settings: &mut AppSettings, open: &mut bool) -> bool {
    ui.separator();
    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.button(t("settings.reset")).clicked() {
            *settings = AppSettings::default();
            changed = true;
        }
        if ui.button(t("settings.close")).clicked() {
            *open = false;
        }
    });
    changed
}
