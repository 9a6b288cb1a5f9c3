pub mod media;
pub mod probe;
pub mod synchronizer;

pub use media::{ClockMedia, MediaEvent, MediaSurface};
pub use probe::{FfprobeProbe, MediaProbe, VideoInfo};
pub use synchronizer::{PlaybackPhase, PlaybackState, PlaybackSynchronizer, SyncRequest};
