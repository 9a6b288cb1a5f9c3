use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::app::controller::{AppController, AppControllerBuilder};
use crate::app::views::chat_view::ChatView;
use crate::app::views::detections_view::DetectionsView;
use crate::app::views::feed_view::FeedView;
use crate::app::views::{UiAction, View, ViewContext};
use crate::config::Settings;
use crate::error::AppError;

const ACTIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(33);

pub struct DashboardApp {
    controller: AppController,
    feed_view: FeedView,
    chat_view: ChatView,
    detections_view: DetectionsView,
}

impl DashboardApp {
    pub fn new(controller: AppController, feed_view: FeedView) -> Self {
        Self {
            controller,
            feed_view,
            chat_view: ChatView::new(),
            detections_view: DetectionsView::new(),
        }
    }

    /// Blocks until the window is closed. Must be called from within a tokio runtime.
    pub fn start_gui(settings: &Settings) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.window.width, settings.window.height))
                .with_title(settings.window.title.clone()),
            ..Default::default()
        };

        let builder = AppControllerBuilder::from_settings(settings)?;
        let feed_view = FeedView::new(settings.overlay.stroke_width, settings.overlay.rgb()?);

        info!("Starting {}", settings.window.title);
        eframe::run_native(
            &settings.window.title,
            options,
            Box::new(move |cc| {
                let controller = builder.repaint_context(cc.egui_ctx.clone()).build()?;
                Ok(Box::new(DashboardApp::new(controller, feed_view)))
            }),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn apply(&mut self, action: UiAction, now: Instant) {
        debug!("UI action: {:?}", action);
        match action {
            UiAction::OpenFile(path) => self.controller.select_file(path),
            UiAction::SelectDetection(index) => {
                self.controller.select_detection(index, now);
            }
            UiAction::TogglePlayback => self.controller.toggle_playback(now),
            UiAction::SubmitQuestion(question) => {
                self.controller.submit_question(&question);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.tick(Instant::now());

        let mut actions = Vec::new();
        {
            let context = ViewContext {
                state: self.controller.state(),
                playback: self.controller.playback(),
                has_source: self.controller.has_source(),
                intrinsic_size: self.controller.intrinsic_size(),
                overlay_box: self.controller.overlay_box(),
            };

            let side_width = ctx.screen_rect().width() * 0.35;
            egui::SidePanel::right("side_column")
                .resizable(false)
                .exact_width(side_width)
                .show(ctx, |ui| {
                    let detections_height = ui.available_height() * 0.4;
                    egui::TopBottomPanel::bottom("detections_panel")
                        .resizable(false)
                        .exact_height(detections_height)
                        .show_inside(ui, |ui| {
                            self.detections_view.draw(ui, &context, &mut actions);
                        });
                    egui::CentralPanel::default().show_inside(ui, |ui| {
                        self.chat_view.draw(ui, &context, &mut actions);
                    });
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                self.feed_view.draw(ui, &context, &mut actions);
            });
        }

        let now = Instant::now();
        let had_actions = !actions.is_empty();
        for action in actions {
            self.apply(action, now);
        }

        if had_actions || self.controller.needs_frequent_repaint() {
            ctx.request_repaint_after(ACTIVE_REPAINT_INTERVAL);
        }
    }
}
