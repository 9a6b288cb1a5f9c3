use egui::{Align, Key, Layout, RichText};

use crate::app::views::theme::{self, ASSISTANT_BUBBLE, OPERATOR_BUBBLE};
use crate::app::views::{UiAction, View, ViewContext};
use crate::common::ChatMessage;

const INPUT_HINT: &str = "Ask about protocols or hazards...";

#[derive(Default)]
pub struct ChatView {
    input: String,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_bubble(ui: &mut egui::Ui, message: &ChatMessage) {
        let (layout, fill) = if message.is_from_assistant() {
            (Layout::top_down(Align::Min), ASSISTANT_BUBBLE)
        } else {
            (Layout::top_down(Align::Max), OPERATOR_BUBBLE)
        };
        ui.with_layout(layout, |ui| {
            egui::Frame::new()
                .fill(fill)
                .corner_radius(10.0)
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.8);
                    ui.label(RichText::new(&message.text).color(egui::Color32::WHITE));
                    ui.label(
                        RichText::new(message.sent_at.format("%H:%M").to_string())
                            .small()
                            .color(theme::MUTED),
                    );
                });
        });
        ui.add_space(4.0);
    }

    /// Takes the pending input if it holds anything to send.
    fn take_question(&mut self) -> Option<String> {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return None;
        }
        self.input.clear();
        Some(question)
    }
}

impl View for ChatView {
    fn draw(&mut self, ui: &mut egui::Ui, context: &ViewContext<'_>, actions: &mut Vec<UiAction>) {
        theme::panel_heading(ui, "Mission AI Assistant");

        let input_height = 40.0;
        egui::ScrollArea::vertical()
            .id_salt("chat_scroll")
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .max_height((ui.available_height() - input_height).max(0.0))
            .show(ui, |ui| {
                for message in &context.state.messages {
                    Self::draw_bubble(ui, message);
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            let edit = ui.add_sized(
                [(ui.available_width() - 64.0).max(80.0), 28.0],
                egui::TextEdit::singleline(&mut self.input).hint_text(INPUT_HINT),
            );
            let can_send = !self.input.trim().is_empty();
            let send = ui.add_enabled(can_send, egui::Button::new("Send"));
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if send.clicked() || submitted {
                if let Some(question) = self.take_question() {
                    actions.push(UiAction::SubmitQuestion(question));
                }
                edit.request_focus();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_not_taken() {
        let mut view = ChatView::new();
        view.input = "   ".to_string();
        assert_eq!(view.take_question(), None);
        assert_eq!(view.input, "   ");
    }

    #[test]
    fn taking_a_question_clears_the_input() {
        let mut view = ChatView::new();
        view.input = "  hazard protocol ".to_string();
        assert_eq!(view.take_question(), Some("hazard protocol".to_string()));
        assert!(view.input.is_empty());
    }
}
