use crate::common::message::WELCOME_MESSAGE;
use crate::common::{ChatMessage, DetectionEvent};

/// Session state shared by every panel. Only the controller mutates it.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub detections: Vec<DetectionEvent>,
    pub selected: Option<DetectionEvent>,
    /// Position of `selected` in `detections`; identical events may repeat.
    pub selected_index: Option<usize>,
    pub is_processing: bool,
    pub messages: Vec<ChatMessage>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            detections: Vec::new(),
            selected: None,
            selected_index: None,
            is_processing: false,
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detection(&self, index: usize) -> Option<&DetectionEvent> {
        self.detections.get(index)
    }

    /// Returns the newly selected event, or `None` when `index` is out of range.
    pub fn select(&mut self, index: usize) -> Option<&DetectionEvent> {
        let event = self.detections.get(index)?.clone();
        self.selected = Some(event);
        self.selected_index = Some(index);
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.selected_index = None;
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == Some(index)
    }
}
