use cloak_detection::MorphologyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub camera: CameraConfig,
    pub background: BackgroundConfig,
    pub mask: MaskConfig,
    pub display: DisplayConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device_id: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub frame_count: usize,
    pub sample_interval_ms: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct MaskConfig {
    pub kernel_radius: u8,
    pub open_iterations: u32,
    pub dilate_iterations: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window_title: String,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub retry_delay_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 1280,
            height: 720,
            fps: 30,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            frame_count: 30,
            sample_interval_ms: 100,
        }
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        let morph = MorphologyConfig::default();
        Self {
            kernel_radius: morph.kernel_radius,
            open_iterations: morph.open_iterations,
            dilate_iterations: morph.dilate_iterations,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: "Invisible Cloak".to_string(),
            poll_interval_ms: 1,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: 1000,
        }
    }
}

impl MaskConfig {
    pub fn morphology(&self) -> MorphologyConfig {
        MorphologyConfig {
            kernel_radius: self.kernel_radius,
            open_iterations: self.open_iterations,
            dilate_iterations: self.dilate_iterations,
        }
    }
}

impl Config {
    // Load config from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    // Load default config
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_file("config/default.toml")
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.background.sample_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.capture.retry_delay_ms)
    }
}
