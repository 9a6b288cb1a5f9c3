use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::overlay::FrameSize;
use crate::playback::probe::VideoInfo;

/// Lifecycle notifications raised by a media surface, drained by the owner each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Metadata is known; carries the duration in seconds.
    LoadedData { duration: f64 },
    Play,
    Pause,
    Ended,
    TimeUpdate(f64),
}

/// The playback surface the dashboard drives. Time-dependent calls take `now`
/// explicitly so the surface can be stepped deterministically.
pub trait MediaSurface {
    fn load(&mut self, source: PathBuf);
    fn set_metadata(&mut self, info: VideoInfo);
    fn source(&self) -> Option<&Path>;
    fn play(&mut self, now: Instant);
    fn pause(&mut self, now: Instant);
    fn seek(&mut self, seconds: f64, now: Instant);
    /// Moves the playback clock forward and raises `TimeUpdate`/`Ended`.
    fn advance(&mut self, now: Instant);
    fn is_paused(&self) -> bool;
    fn current_time(&self, now: Instant) -> f64;
    fn duration(&self) -> f64;
    /// `None` until metadata with positive dimensions has arrived.
    fn intrinsic_size(&self) -> Option<FrameSize>;
    fn take_events(&mut self) -> Vec<MediaEvent>;
}

/// A media surface driven by the wall clock. It reports position, duration and
/// dimensions; it does not decode frames.
#[derive(Debug, Default)]
pub struct ClockMedia {
    source: Option<PathBuf>,
    info: Option<VideoInfo>,
    position: f64,
    playing_since: Option<Instant>,
    events: VecDeque<MediaEvent>,
}

impl ClockMedia {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_ended(&self) -> bool {
        let duration = self.duration();
        duration > 0.0 && self.position >= duration
    }

    fn clamp(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let duration = self.duration();
        if duration > 0.0 {
            seconds.min(duration)
        } else {
            seconds
        }
    }
}

impl MediaSurface for ClockMedia {
    fn load(&mut self, source: PathBuf) {
        debug!("Loading media source {}", source.display());
        self.source = Some(source);
        self.info = None;
        self.position = 0.0;
        self.playing_since = None;
        self.events.clear();
    }

    fn set_metadata(&mut self, info: VideoInfo) {
        let duration = info.duration;
        self.info = Some(info);
        self.position = self.clamp(self.position);
        self.events.push_back(MediaEvent::LoadedData { duration });
    }

    fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn play(&mut self, now: Instant) {
        if self.source.is_none() || self.playing_since.is_some() {
            return;
        }
        if self.has_ended() {
            self.position = 0.0;
        }
        self.playing_since = Some(now);
        self.events.push_back(MediaEvent::Play);
    }

    fn pause(&mut self, now: Instant) {
        if self.playing_since.is_none() {
            return;
        }
        self.position = self.current_time(now);
        self.playing_since = None;
        self.events.push_back(MediaEvent::Pause);
    }

    fn seek(&mut self, seconds: f64, now: Instant) {
        if self.source.is_none() {
            return;
        }
        self.position = self.clamp(seconds);
        if self.playing_since.is_some() {
            self.playing_since = Some(now);
        }
        self.events.push_back(MediaEvent::TimeUpdate(self.position));
    }

    fn advance(&mut self, now: Instant) {
        if self.playing_since.is_none() {
            return;
        }
        let time = self.current_time(now);
        if self.duration() > 0.0 && time >= self.duration() {
            self.position = self.duration();
            self.playing_since = None;
            self.events.push_back(MediaEvent::TimeUpdate(self.position));
            self.events.push_back(MediaEvent::Ended);
        } else {
            self.events.push_back(MediaEvent::TimeUpdate(time));
        }
    }

    fn is_paused(&self) -> bool {
        self.playing_since.is_none()
    }

    fn current_time(&self, now: Instant) -> f64 {
        match self.playing_since {
            Some(since) => {
                self.clamp(self.position + now.saturating_duration_since(since).as_secs_f64())
            }
            None => self.position,
        }
    }

    fn duration(&self) -> f64 {
        self.info.as_ref().map(|info| info.duration).unwrap_or(0.0)
    }

    fn intrinsic_size(&self) -> Option<FrameSize> {
        let info = self.info.as_ref()?;
        let size = FrameSize::new(info.width as f32, info.height as f32);
        size.is_drawable().then_some(size)
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn loaded(duration: f64) -> ClockMedia {
        let mut media = ClockMedia::new();
        media.load(PathBuf::from("flight.mp4"));
        media.set_metadata(VideoInfo {
            width: 1920,
            height: 1080,
            duration,
        });
        media.take_events();
        media
    }

    #[test]
    fn metadata_raises_loaded_data() {
        let mut media = ClockMedia::new();
        media.load(PathBuf::from("flight.mp4"));
        assert!(media.intrinsic_size().is_none());
        media.set_metadata(VideoInfo {
            width: 1280,
            height: 720,
            duration: 42.0,
        });
        assert_eq!(
            media.take_events(),
            vec![MediaEvent::LoadedData { duration: 42.0 }]
        );
        assert_eq!(media.intrinsic_size(), Some(FrameSize::new(1280.0, 720.0)));
    }

    #[test]
    fn clock_advances_while_playing() {
        let mut media = loaded(60.0);
        let start = Instant::now();
        media.play(start);
        media.advance(start + Duration::from_secs(2));
        assert!((media.current_time(start + Duration::from_secs(2)) - 2.0).abs() < 1e-6);
        media.pause(start + Duration::from_secs(3));
        assert!(media.is_paused());
        assert!((media.current_time(start + Duration::from_secs(10)) - 3.0).abs() < 1e-6);
        assert_eq!(
            media.take_events(),
            vec![
                MediaEvent::Play,
                MediaEvent::TimeUpdate(2.0),
                MediaEvent::Pause
            ]
        );
    }

    #[test]
    fn reaching_the_end_stops_and_restarts_from_zero() {
        let mut media = loaded(5.0);
        let start = Instant::now();
        media.play(start);
        media.advance(start + Duration::from_secs(6));
        assert!(media.is_paused());
        let events = media.take_events();
        assert_eq!(events.last(), Some(&MediaEvent::Ended));

        let later = start + Duration::from_secs(7);
        media.play(later);
        assert_eq!(media.current_time(later), 0.0);
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let mut media = loaded(10.0);
        let now = Instant::now();
        media.seek(25.0, now);
        assert_eq!(media.current_time(now), 10.0);
        media.seek(-3.0, now);
        assert_eq!(media.current_time(now), 0.0);
    }

    #[test]
    fn controls_without_source_do_nothing() {
        let mut media = ClockMedia::new();
        let now = Instant::now();
        media.play(now);
        media.seek(4.0, now);
        assert!(media.is_paused());
        assert!(media.take_events().is_empty());
    }

    #[test]
    fn zero_dimensions_are_not_intrinsic() {
        let mut media = ClockMedia::new();
        media.load(PathBuf::from("audio-only.mp4"));
        media.set_metadata(VideoInfo {
            width: 0,
            height: 0,
            duration: 3.0,
        });
        assert!(media.intrinsic_size().is_none());
    }
}
