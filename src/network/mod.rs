pub mod assistant;
pub mod processing;
pub mod types;

pub use assistant::{HttpKnowledgeBase, KnowledgeBase};
pub use processing::{HttpVideoProcessor, VideoProcessor};
