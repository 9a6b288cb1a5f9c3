use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::AppError;

const CONFIG_FILE: &str = "rescue_vision";
const ENV_PREFIX: &str = "RESCUE_VISION";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub processing: EndpointSettings,
    pub assistant: EndpointSettings,
    pub overlay: OverlaySettings,
    pub window: WindowSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl EndpointSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub stroke_width: f32,
    /// `#rrggbb`
    pub color: String,
    /// Delay between selecting a detection and drawing its box, so the seek can settle.
    pub redraw_delay_ms: u64,
}

impl OverlaySettings {
    pub fn redraw_delay(&self) -> Duration {
        Duration::from_millis(self.redraw_delay_ms)
    }

    pub fn rgb(&self) -> Result<[u8; 3], AppError> {
        parse_hex_color(&self.color).ok_or_else(|| AppError::InvalidSetting {
            key: "overlay.color",
            reason: format!("expected #rrggbb, got {:?}", self.color),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl LoggingSettings {
    pub fn level(&self) -> Result<Level, AppError> {
        Level::from_str(&self.level).map_err(|e| AppError::InvalidSetting {
            key: "logging.level",
            reason: e.to_string(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            processing: EndpointSettings {
                url: "http://127.0.0.1:5002/api/process_video".to_string(),
                timeout_secs: 300,
            },
            assistant: EndpointSettings {
                url: "http://127.0.0.1:5001/api/query".to_string(),
                timeout_secs: 30,
            },
            overlay: OverlaySettings {
                stroke_width: 3.0,
                color: "#22d3ee".to_string(),
                redraw_delay_ms: 100,
            },
            window: WindowSettings {
                title: "RescueVision Mission Console".to_string(),
                width: 1440.0,
                height: 900.0,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Defaults, then an optional `rescue_vision.*` file, then `RESCUE_VISION__*` variables.
    pub fn load() -> Result<Self, AppError> {
        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.overlay.rgb()?;
        self.logging.level()?;
        if self.overlay.stroke_width <= 0.0 {
            return Err(AppError::InvalidSetting {
                key: "overlay.stroke_width",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
