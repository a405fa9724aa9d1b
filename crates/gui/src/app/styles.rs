//! Application style configuration

use eframe::egui;

use crate::state::Theme;

/// Configure application styles for the given theme and font size
pub fn configure_styles(ctx: &egui::Context, theme: Theme, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    style.visuals = match theme {
        Theme::Dark => dark_visuals(),
        Theme::Light => light_visuals(),
    };

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(3);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(3);

    // Spacing
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

fn dark_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgb(30, 30, 34);
    visuals.window_fill = egui::Color32::from_rgb(35, 35, 40);
    visuals.selection.bg_fill = egui::Color32::from_rgb(40, 80, 140);
    visuals
}

fn light_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = egui::Color32::from_rgb(240, 242, 246);
    visuals.window_fill = egui::Color32::from_rgb(248, 248, 250);
    visuals.selection.bg_fill = egui::Color32::from_rgb(150, 190, 240);
    visuals
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::proportional(font_size),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(font_size),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(font_size * 0.85),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(font_size * 1.3),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::monospace(font_size),
    );
}
