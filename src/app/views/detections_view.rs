use egui::{RichText, Sense};

use crate::app::views::theme::{self, ACCENT, MUTED};
use crate::app::views::{UiAction, View, ViewContext};
use crate::common::timecode::format_timestamp;
use crate::common::DetectionEvent;

#[derive(Default)]
pub struct DetectionsView;

impl DetectionsView {
    pub fn new() -> Self {
        Self
    }

    fn draw_item(ui: &mut egui::Ui, event: &DetectionEvent, selected: bool) -> bool {
        let frame = egui::Frame::new()
            .inner_margin(egui::Margin::same(8))
            .corner_radius(6.0)
            .fill(if selected {
                theme::ACCENT_DIM
            } else {
                egui::Color32::TRANSPARENT
            });

        let response = frame
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(survivor_label(event))
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    RichText::new(timestamp_label(event))
                        .small()
                        .color(MUTED),
                );
            })
            .response
            .interact(Sense::click());

        if response.hovered() {
            ui.painter().rect_stroke(
                response.rect,
                6.0,
                egui::Stroke::new(1.0, ACCENT),
                egui::StrokeKind::Inside,
            );
        }
        response.clicked()
    }
}

pub fn survivor_label(event: &DetectionEvent) -> String {
    format!("Survivor (Confidence: {}%)", event.confidence_percent())
}

pub fn timestamp_label(event: &DetectionEvent) -> String {
    format!("Timestamp: {}", format_timestamp(event.timestamp))
}

impl View for DetectionsView {
    fn draw(&mut self, ui: &mut egui::Ui, context: &ViewContext<'_>, actions: &mut Vec<UiAction>) {
        theme::panel_heading(ui, "Detections Log");

        egui::ScrollArea::vertical()
            .id_salt("detections_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Timestamps may repeat, so rows are keyed by position.
                for (index, event) in context.state.detections.iter().enumerate() {
                    let selected = context.state.is_selected(index);
                    let clicked = ui
                        .push_id(index, |ui| Self::draw_item(ui, event, selected))
                        .inner;
                    if clicked {
                        actions.push(UiAction::SelectDetection(index));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BoundingBox;

    #[test]
    fn labels_match_the_log_format() {
        let event = DetectionEvent::new(83.7, BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0.876);
        assert_eq!(survivor_label(&event), "Survivor (Confidence: 88%)");
        assert_eq!(timestamp_label(&event), "Timestamp: 01:23");
    }
}
