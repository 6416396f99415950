use eframe::egui;

// --- Sizing ---
pub const ICON_COL_WIDTH: f32 = 30.0;
pub const SIZE_COL_WIDTH: f32 = 80.0;
pub const MODIFIED_COL_WIDTH: f32 = 130.0;
pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 20.0;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;

// --- Colors ---
pub const ACTION_BAR_FILL: egui::Color32 = egui::Color32::from_rgb(40, 70, 110);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(120, 180, 255);

pub fn apply(ctx: &egui::Context, dark: bool, font_size: f32) {
    ctx.set_visuals(if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(font_size));
        style
            .text_styles
            .insert(egui::TextStyle::Button, egui::FontId::proportional(font_size));
    });
}

pub fn truncated_label_with_sense(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
    sense: egui::Sense,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate().sense(sense))
}
