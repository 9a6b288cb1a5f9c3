pub mod app_controller;
pub mod chat_flow;
pub mod dashboard_state;
pub mod upload_flow;

pub use app_controller::{AppController, AppControllerBuilder, UiUpdate};
pub use dashboard_state::DashboardState;
