//! Keeps the overlay in step with playback.
//!
//! The selection itself lives with the controller. The synchronizer only
//! reacts to media lifecycle events and tells its owner when the selection must
//! be dropped or the overlay re-evaluated.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::common::{BoundingBox, DetectionEvent};
use crate::overlay::FrameSize;
use crate::playback::media::{MediaEvent, MediaSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loaded,
    Playing,
    Paused,
}

/// Mirror of the media surface, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
}

impl PlaybackState {
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// What the owner of the selection has to do in response to a media event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRequest {
    ClearSelection,
    Redraw,
}

#[derive(Debug)]
pub struct PlaybackSynchronizer {
    phase: PlaybackPhase,
    state: PlaybackState,
    redraw_delay: Duration,
    redraw_due: Option<Instant>,
    armed: Option<DetectionEvent>,
}

impl PlaybackSynchronizer {
    pub fn new(redraw_delay: Duration) -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            state: PlaybackState::default(),
            redraw_delay,
            redraw_due: None,
            armed: None,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_due.is_some()
    }

    /// A new file was chosen: everything about the previous source is stale.
    pub fn on_new_source(&mut self) -> SyncRequest {
        debug!("New media source, resetting playback sync");
        self.phase = PlaybackPhase::Idle;
        self.state = PlaybackState::default();
        self.redraw_due = None;
        self.armed = None;
        SyncRequest::ClearSelection
    }

    pub fn on_media_event(&mut self, event: MediaEvent) -> Option<SyncRequest> {
        match event {
            MediaEvent::LoadedData { duration } => {
                if self.phase == PlaybackPhase::Idle {
                    self.phase = PlaybackPhase::Loaded;
                }
                self.state.duration = duration;
                Some(SyncRequest::Redraw)
            }
            MediaEvent::Play => {
                self.phase = PlaybackPhase::Playing;
                self.state.is_playing = true;
                self.redraw_due = None;
                self.armed = None;
                Some(SyncRequest::ClearSelection)
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                if self.phase != PlaybackPhase::Idle {
                    self.phase = PlaybackPhase::Paused;
                }
                self.state.is_playing = false;
                Some(SyncRequest::Redraw)
            }
            MediaEvent::TimeUpdate(time) => {
                self.state.current_time = time;
                None
            }
        }
    }

    /// Seeks to the event, forces a pause and schedules the overlay redraw.
    /// Valid in any phase.
    pub fn on_event_selected(
        &mut self,
        event: &DetectionEvent,
        media: &mut dyn MediaSurface,
        now: Instant,
    ) {
        media.seek(event.timestamp, now);
        media.pause(now);
        self.state.is_playing = false;
        if self.phase == PlaybackPhase::Playing {
            self.phase = PlaybackPhase::Paused;
        }
        self.armed = None;
        self.redraw_due = Some(now + self.redraw_delay);
        debug!(
            "Selected detection at {:.2}s, redraw due in {:?}",
            event.timestamp, self.redraw_delay
        );
    }

    /// True once, when a scheduled redraw has come due.
    pub fn take_due_redraw(&mut self, now: Instant) -> bool {
        match self.redraw_due {
            Some(due) if now >= due => {
                self.redraw_due = None;
                true
            }
            _ => false,
        }
    }

    /// Re-evaluates the overlay. While playing, or before dimensions are
    /// known, this clears it instead.
    pub fn redraw(&mut self, selected: Option<&DetectionEvent>, intrinsic: Option<FrameSize>) {
        let drawable = intrinsic.is_some_and(|size| size.is_drawable());
        self.armed = if self.state.is_playing || !drawable {
            None
        } else {
            selected.cloned()
        };
    }

    /// The box to draw this frame, if any.
    pub fn overlay_box(
        &self,
        selected: Option<&DetectionEvent>,
        intrinsic: Option<FrameSize>,
    ) -> Option<BoundingBox> {
        if self.state.is_playing || !intrinsic.is_some_and(|size| size.is_drawable()) {
            return None;
        }
        match (selected, self.armed.as_ref()) {
            (Some(selected), Some(armed)) if selected == armed => Some(selected.bbox),
            _ => None,
        }
    }
}
