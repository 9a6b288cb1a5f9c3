//! Bookkeeping for the upload-and-process round trip.
//!
//! Every upload gets a sequence number. Only the result for the newest upload
//! is applied; anything older that arrives late is dropped.

use tracing::{debug, error, info};

use crate::app::controller::dashboard_state::DashboardState;
use crate::common::DetectionEvent;
use crate::error::NetworkError;

#[derive(Debug, Default)]
pub struct UploadTracker {
    latest: u64,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Starts a new upload: clears the selection and detections and raises the
    /// processing flag. Returns the upload's sequence number.
    pub fn begin(&mut self, state: &mut DashboardState) -> u64 {
        self.latest += 1;
        state.clear_selection();
        state.detections.clear();
        state.is_processing = true;
        debug!("Upload {} started", self.latest);
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Applies a processing result. Returns false when the result was stale.
    pub fn finish(
        &mut self,
        state: &mut DashboardState,
        seq: u64,
        result: Result<Vec<DetectionEvent>, NetworkError>,
    ) -> bool {
        if !self.is_current(seq) {
            debug!(
                "Discarding result of upload {} (latest is {})",
                seq, self.latest
            );
            return false;
        }

        state.is_processing = false;
        match result {
            Ok(events) => {
                info!("Processing complete: {} detections", events.len());
                state.detections = events;
            }
            Err(e) => {
                error!("Failed to process video: {}", e);
                state.detections.clear();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BoundingBox;

    fn event(timestamp: f64) -> DetectionEvent {
        DetectionEvent::new(timestamp, BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.8)
    }

    #[test]
    fn begin_resets_state() {
        let mut state = DashboardState::new();
        state.detections = vec![event(1.0)];
        state.detections = vec![event(1.0)];
        state.select(0);
        let mut tracker = UploadTracker::new();

        let seq = tracker.begin(&mut state);

        assert_eq!(seq, 1);
        assert!(state.detections.is_empty());
        assert!(state.selected.is_none());
        assert!(state.selected_index.is_none());
        assert!(state.is_processing);
    }

    #[test]
    fn empty_result_leaves_list_empty_and_clears_flag() {
        let mut state = DashboardState::new();
        let mut tracker = UploadTracker::new();
        let seq = tracker.begin(&mut state);

        assert!(tracker.finish(&mut state, seq, Ok(Vec::new())));
        assert!(state.detections.is_empty());
        assert!(!state.is_processing);
    }

    #[test]
    fn failure_clears_flag_and_keeps_list_empty() {
        let mut state = DashboardState::new();
        let mut tracker = UploadTracker::new();
        let seq = tracker.begin(&mut state);

        let failure = NetworkError::Status {
            endpoint: "http://processor".to_string(),
            status: 502,
        };
        assert!(tracker.finish(&mut state, seq, Err(failure)));
        assert!(state.detections.is_empty());
        assert!(!state.is_processing);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut state = DashboardState::new();
        let mut tracker = UploadTracker::new();
        let first = tracker.begin(&mut state);
        let second = tracker.begin(&mut state);

        assert!(!tracker.finish(&mut state, first, Ok(vec![event(1.0)])));
        assert!(state.detections.is_empty());
        assert!(state.is_processing);

        assert!(tracker.finish(&mut state, second, Ok(vec![event(2.0), event(2.0)])));
        assert_eq!(state.detections.len(), 2);
        assert!(!state.is_processing);
    }
}
