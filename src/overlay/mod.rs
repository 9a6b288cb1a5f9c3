pub mod geometry;

pub use geometry::{map_box, FrameSize, Letterbox, OverlayRect};
