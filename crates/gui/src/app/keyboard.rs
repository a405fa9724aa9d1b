//! Keyboard shortcut handling

use eframe::egui;
use shared::EditMode;

use super::menus;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the editor screen
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState, viewport: &mut ViewportPanel) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }
    if state.session.is_none() {
        return;
    }

    let (mode, save, frame, reset) = ctx.input(|i| {
        let plain = !i.modifiers.command;
        let mode = if plain && i.key_pressed(egui::Key::Num1) {
            Some(EditMode::WallAdd)
        } else if plain && i.key_pressed(egui::Key::Num2) {
            Some(EditMode::WallDelete)
        } else if plain && i.key_pressed(egui::Key::Num3) {
            Some(EditMode::Delete)
        } else {
            None
        };
        (
            mode,
            i.modifiers.command && i.key_pressed(egui::Key::S),
            plain && i.key_pressed(egui::Key::F),
            i.key_pressed(egui::Key::Home),
        )
    });

    if let Some(mode) = mode {
        if let Some(editor) = state.editor_mut() {
            editor.set_mode(mode);
        }
    }
    if save {
        menus::save_world(state);
    }
    if frame {
        viewport.frame_walls(state);
    }
    if reset {
        viewport.reset_camera();
    }
}
