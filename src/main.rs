use rescue_vision::app::DashboardApp;
use rescue_vision::{AppError, Settings};
use tracing::Level;

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(settings.logging.level()?);
    DashboardApp::start_gui(&settings)
}
