pub mod app;
pub mod common;
pub mod config;
pub mod error;
pub mod network;
pub mod overlay;
pub mod playback;

pub use crate::app::controller::{AppController, AppControllerBuilder};
pub use crate::config::Settings;
pub use crate::error::{AppError, MediaError, NetworkError};
