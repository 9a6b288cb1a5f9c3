use std::path::PathBuf;

use egui::{Align2, Color32, FontId, RichText, Sense, Stroke, StrokeKind};

use crate::app::views::theme::{self, ACCENT, SURFACE};
use crate::app::views::{UiAction, View, ViewContext};
use crate::common::timecode::format_clock;
use crate::overlay::{FrameSize, Letterbox};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "avi", "mkv", "webm"];
const TRANSPORT_HEIGHT: f32 = 36.0;
const VIDEO_AREA: Color32 = Color32::from_rgb(31, 41, 55);

pub struct FeedView {
    stroke: Stroke,
}

impl FeedView {
    pub fn new(stroke_width: f32, color: [u8; 3]) -> Self {
        let [r, g, b] = color;
        Self {
            stroke: Stroke::new(stroke_width, Color32::from_rgb(r, g, b)),
        }
    }

    fn pick_video() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select drone footage")
            .add_filter("Video", VIDEO_EXTENSIONS)
            .pick_file()
    }

    fn draw_upload_button(
        &self,
        ui: &mut egui::Ui,
        context: &ViewContext<'_>,
        actions: &mut Vec<UiAction>,
    ) {
        let processing = context.state.is_processing;
        let label = if processing {
            "PROCESSING..."
        } else {
            "Upload Drone Footage"
        };
        let button = egui::Button::new(RichText::new(label).strong().color(SURFACE))
            .fill(ACCENT)
            .min_size(egui::vec2(220.0, 36.0));

        ui.vertical_centered(|ui| {
            // Advisory; the controller tolerates a superseding upload.
            if ui.add_enabled(!processing, button).clicked() {
                if let Some(path) = Self::pick_video() {
                    actions.push(UiAction::OpenFile(path));
                }
            }
        });
    }

    fn draw_surface(&self, ui: &mut egui::Ui, context: &ViewContext<'_>) {
        let reserved = if context.has_source {
            TRANSPORT_HEIGHT
        } else {
            0.0
        };
        let size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - reserved).max(0.0),
        );
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 6.0, Color32::BLACK);

        if let Some(source) = context.intrinsic_size {
            let canvas = FrameSize::new(rect.width(), rect.height());
            if let Some(letterbox) = Letterbox::fit(source, canvas) {
                painter.rect_filled(letterbox.render_area().to_screen(rect.min), 0.0, VIDEO_AREA);
                if let Some(bbox) = context.overlay_box {
                    let target = letterbox.map(source, &bbox).to_screen(rect.min);
                    painter.rect_stroke(target, 0.0, self.stroke, StrokeKind::Middle);
                }
            }
        }

        let banner = |text: &str, color: Color32| {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(26.0),
                color,
            );
        };
        if context.state.is_processing {
            painter.rect_filled(rect, 6.0, Color32::from_black_alpha(128));
            banner("ANALYZING FOOTAGE...", ACCENT);
        } else if !context.has_source {
            banner("DRONE FEED OFFLINE", theme::MUTED);
        }
    }

    fn draw_transport(&self, ui: &mut egui::Ui, context: &ViewContext<'_>, actions: &mut Vec<UiAction>) {
        let playback = context.playback;
        ui.horizontal(|ui| {
            let icon = if playback.is_playing { "⏸" } else { "▶" };
            if ui
                .add(egui::Button::new(RichText::new(icon).color(SURFACE)).fill(ACCENT))
                .clicked()
            {
                actions.push(UiAction::TogglePlayback);
            }
            ui.monospace(format!(
                "{} / {}",
                format_clock(playback.current_time),
                format_clock(playback.duration)
            ));
            ui.add(
                egui::ProgressBar::new(playback.progress())
                    .desired_height(6.0)
                    .fill(ACCENT),
            );
        });
    }
}

impl View for FeedView {
    fn draw(&mut self, ui: &mut egui::Ui, context: &ViewContext<'_>, actions: &mut Vec<UiAction>) {
        theme::panel_heading(ui, "Live Mission Feed");
        self.draw_upload_button(ui, context, actions);
        ui.add_space(8.0);
        self.draw_surface(ui, context);
        if context.has_source {
            self.draw_transport(ui, context, actions);
        }
    }
}
