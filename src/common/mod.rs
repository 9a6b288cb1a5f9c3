pub mod detection;
pub mod message;
pub mod timecode;

pub use detection::{BoundingBox, DetectionEvent};
pub use message::{ChatMessage, MessageAuthor};
