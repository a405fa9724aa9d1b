//! Edit mode selector

use egui::Ui;
use shared::EditMode;

use crate::i18n::{mode_key, t};
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let Some(editor) = state.editor_mut() else {
        return;
    };

    ui.heading(t("mode.title"));
    ui.separator();

    let current = editor.mode();
    for (i, mode) in EditMode::all().iter().enumerate() {
        let label = format!("{}  {}", i + 1, t(mode_key(*mode)));
        if ui
            .add_sized(
                [ui.available_width(), 28.0],
                egui::SelectableLabel::new(current == *mode, label),
            )
            .clicked()
        {
            editor.set_mode(*mode);
        }
    }
}
