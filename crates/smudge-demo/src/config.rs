//! Configuration for the demo server.

use anyhow::{Context, Result};
use serde::Deserialize;
use smudge::{BackgroundColor, CaptchaOptions};
use std::path::Path;

/// Demo server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Options for the captcha rendered on the index page
    #[serde(default = "default_captcha")]
    pub captcha: CaptchaOptions,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8181".to_string()
}

/// Index page captcha: eight characters on a wide gradient canvas.
fn default_captcha() -> CaptchaOptions {
    CaptchaOptions {
        length: Some(8),
        width: Some(350),
        height: Some(100),
        color: Some(BackgroundColor::Random),
        ..CaptchaOptions::default()
    }
}

impl DemoConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, listen_override: Option<&str>) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        if let Some(listen) = listen_override {
            config.listen_addr = listen.to_string();
        }

        Ok(config)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            captcha: default_captcha(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load("does/not/exist.toml", None).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8181");
        assert_eq!(config.captcha.length, Some(8));
        assert_eq!(config.captcha.width, Some(350));
    }

    #[test]
    fn listen_override_wins() {
        let config = DemoConfig::load("does/not/exist.toml", Some("0.0.0.0:9000")).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
    }
}
