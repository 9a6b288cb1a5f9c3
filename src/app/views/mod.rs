pub mod chat_view;
pub mod detections_view;
pub mod feed_view;
pub mod theme;

use std::path::PathBuf;

use crate::app::controller::DashboardState;
use crate::common::BoundingBox;
use crate::overlay::FrameSize;
use crate::playback::PlaybackState;

/// Requests raised by the panels; the app hands them to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenFile(PathBuf),
    SelectDetection(usize),
    TogglePlayback,
    SubmitQuestion(String),
}

/// Read-only snapshot of everything a panel may show this frame.
pub struct ViewContext<'a> {
    pub state: &'a DashboardState,
    pub playback: PlaybackState,
    pub has_source: bool,
    pub intrinsic_size: Option<FrameSize>,
    pub overlay_box: Option<BoundingBox>,
}

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui, context: &ViewContext<'_>, actions: &mut Vec<UiAction>);
}
