// settings.rs
use eframe::egui::{self, Color32};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RANGE_PADDING: f64 = 0.05; // 5% запас сверху и снизу
pub const Y_INTERVALS: usize = 10; // 11 горизонтальных линий
pub const TICK_LENGTH: f32 = 5.0;
pub const LABEL_GAP: f32 = 5.0;
pub const STATUS_MESSAGE_MAX_COUNT: usize = 5;
pub const STATUS_MESSAGE_LIFETIME_SECONDS: u64 = 10;
pub const CONFIG_FILE: &str = "quote-chart.toml";
pub const CONFIG_ENV: &str = "QUOTE_CHART_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub chart: ChartStyle,
    pub picker: PickerStyle,
    pub messages: Messages,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// `$QUOTE_CHART_CONFIG`, then `./quote-chart.toml`, then defaults.
    pub fn load_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub num_rows: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub use_system_proxy: bool,
    pub download_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.wsj.com".to_string(),
            num_rows: 90,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) quote-chart/0.1".to_string(),
            timeout_secs: 30,
            use_system_proxy: true,
            download_dir: std::env::temp_dir().join("quote-chart"),
        }
    }
}

/// Chart canvas geometry and colors. The plot rectangle is the canvas inset
/// by `margin` on every side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub panel: [u8; 3],
    pub background: [u8; 3],
    pub grid: [u8; 3],
    pub axis: [u8; 3],
    pub line: [u8; 3],
    pub text: [u8; 3],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            margin: 50.0,
            font_size: 12.0,
            panel: [238, 238, 238],
            background: [255, 255, 255],
            grid: [215, 215, 215],
            axis: [0, 0, 0],
            line: [0, 0, 0],
            text: [0, 0, 0],
        }
    }
}

impl ChartStyle {
    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_width, self.canvas_height)
    }

    pub fn plot_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.margin, self.margin),
            egui::vec2(
                (self.canvas_width - self.margin * 2.0).max(0.0),
                (self.canvas_height - self.margin * 2.0).max(0.0),
            ),
        )
    }

    pub fn color(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerStyle {
    pub window_width: f32,
    pub window_height: f32,
    pub font_size: f32,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            window_width: 720.0,
            window_height: 320.0,
            font_size: 24.0,
        }
    }
}

/// Texts shown in place of a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub loading: String,
    pub load_failed: String,
    pub no_data: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Loading...".to_string(),
            load_failed: "Load failed".to_string(),
            no_data: "No data available".to_string(),
        }
    }
}
