use egui::{Color32, RichText};

pub const ACCENT: Color32 = Color32::from_rgb(34, 211, 238);
pub const ACCENT_DIM: Color32 = Color32::from_rgb(21, 94, 117);
pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175);
pub const SURFACE: Color32 = Color32::from_rgb(17, 24, 39);
pub const OPERATOR_BUBBLE: Color32 = Color32::from_rgb(55, 65, 81);
pub const ASSISTANT_BUBBLE: Color32 = Color32::from_rgb(22, 58, 70);

pub fn panel_heading(ui: &mut egui::Ui, title: &str) {
    ui.heading(RichText::new(title).color(ACCENT).strong());
    ui.separator();
}
