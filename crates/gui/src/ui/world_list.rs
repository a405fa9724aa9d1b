//! World browser: list, create, open, delete, import/export

use egui::Ui;

use crate::app::menus;
use crate::i18n::t;
use crate::state::worlds::{validate_name, StoreError};
use crate::state::AppState;

/// Action picked in the list, applied after the list is drawn
enum WorldAction {
    Open(String),
    Delete(String),
    Export(String),
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("worlds.title"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(t("worlds.import")).clicked() {
                menus::import_world(state);
            }
        });
    });
    ui.separator();

    show_create_form(ui, state);
    ui.add_space(8.0);

    let worlds = state.worlds.list();
    if worlds.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("worlds.empty"));
        });
        return;
    }

    let mut action = None;
    egui::ScrollArea::vertical()
        .id_salt("world_list_scroll")
        .show(ui, |ui| {
            egui::Grid::new("world_list_grid")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (id, info) in &worlds {
                        ui.vertical(|ui| {
                            ui.strong(info.name.as_str());
                            ui.weak(format!("{}: {}", t("worlds.created"), format_created(info.created)));
                        });
                        ui.horizontal(|ui| {
                            if ui.button(t("worlds.open")).clicked() {
                                action = Some(WorldAction::Open(id.clone()));
                            }
                            if ui.button(t("worlds.export")).clicked() {
                                action = Some(WorldAction::Export(id.clone()));
                            }
                            if ui.button(t("worlds.delete")).clicked() {
                                action = Some(WorldAction::Delete(id.clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    match action {
        Some(WorldAction::Open(id)) => open_world(state, &id),
        Some(WorldAction::Export(id)) => menus::export_world(state, &id),
        Some(WorldAction::Delete(id)) => {
            if let Err(e) = state.delete_world(&id) {
                tracing::error!("Failed to delete world {id}: {e}");
                state.notify_error(e.to_string());
            }
        }
        None => {}
    }
}

fn show_create_form(ui: &mut Ui, state: &mut AppState) {
    let valid = validate_name(&state.new_world_name).is_ok();
    ui.horizontal(|ui| {
        ui.label(t("worlds.new"));
        let edit = ui.add(
            egui::TextEdit::singleline(&mut state.new_world_name)
                .hint_text(t("worlds.name_hint"))
                .desired_width(220.0),
        );
        let submit = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(valid, egui::Button::new(t("worlds.create")))
            .clicked();
        if (clicked || submit) && valid {
            let name = std::mem::take(&mut state.new_world_name);
            match state.create_world(&name) {
                Ok(id) => open_world(state, &id),
                Err(e) => state.notify_error(e.to_string()),
            }
        }
    });
    if !state.new_world_name.trim().is_empty() && !valid {
        ui.colored_label(egui::Color32::from_rgb(230, 90, 90), t("worlds.name_too_short"));
    }
}

/// Open a world, falling back to the list with a notice on failure
pub fn open_world(state: &mut AppState, id: &str) {
    match state.open_world(id) {
        Ok(()) => {}
        Err(StoreError::NotFound(_)) => {
            tracing::warn!("World {id} not found");
            state.notify_error(t("status.world_missing"));
        }
        Err(e) => {
            tracing::error!("Failed to open world {id}: {e}");
            state.notify_error(format!("{}: {e}", t("status.load_failed")));
        }
    }
}

/// Render a millisecond Unix timestamp as `YYYY-MM-DD HH:MM` (UTC)
fn format_created(millis: u64) -> String {
    let secs = millis / 1000;
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (y, m, d) = civil_from_days(days);
    format!("{y:04}-{m:02}-{d:02} {:02}:{:02}", rem / 3600, (rem % 3600) / 60)
}

/// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(0), "1970-01-01 00:00");
        // 2024-02-29 12:34 UTC
        assert_eq!(format_created(1_709_210_040_000), "2024-02-29 12:34");
    }
}
