use std::time::Duration;

use egui::Ui;

use crate::i18n::t;
use crate::state::{AppState, NoticeLevel};

/// How long a notice stays in the status bar
const NOTICE_TTL: Duration = Duration::from_secs(5);

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        if let Some(session) = &state.session {
            ui.label(session.world_name.as_str());
            ui.separator();
            let editor = &session.editor;
            ui.weak(format!("{}: {}", t("status.walls"), editor.topology().len()));
            ui.weak(format!("{}: {}", t("status.beams"), editor.cache().beam_count()));
            if let Some(cell) = editor.hover() {
                ui.separator();
                ui.weak(format!("({}, {})", cell.x, cell.z));
            }
        } else {
            ui.weak(format!("{}: {}", t("worlds.title"), state.worlds.len()));
        }

        if let Some(notice) = &state.notice {
            if notice.at.elapsed() < NOTICE_TTL {
                ui.separator();
                match notice.level {
                    NoticeLevel::Info => {
                        ui.colored_label(egui::Color32::from_rgb(120, 200, 120), notice.text.as_str());
                    }
                    NoticeLevel::Error => {
                        ui.colored_label(egui::Color32::from_rgb(230, 90, 90), notice.text.as_str());
                    }
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Floorplan v", env!("CARGO_PKG_VERSION")));
        });
    });
}
