use std::{collections::HashMap, fs};

use serde::Deserialize;
use shared::protocol::DEFAULT_CONTROL_ADDR;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub device_path: String,
    pub step_size: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_CONTROL_ADDR.into(),
            device_path: "/dev/v4l-subdev1".into(),
            step_size: 1,
        }
    }
}

/// Layering: defaults, then `focusd.toml` in the working directory, then
/// environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("focusd.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.bind_addr = v.clone();
            }
            if let Some(v) = file_cfg.get("device_path") {
                settings.device_path = v.clone();
            }
            if let Some(v) = file_cfg.get("step_size") {
                if let Ok(parsed) = v.parse::<i64>() {
                    settings.step_size = parsed;
                }
            }
        }
    }

    if let Ok(v) = std::env::var("FOCUSD_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("FOCUSD_DEVICE") {
        settings.device_path = v;
    }
    if let Ok(v) = std::env::var("FOCUSD_STEP_SIZE") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.step_size = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
