use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use engine_logging::{engine_info, engine_warn};
use reelscript_engine::GeneratorSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "reelscript.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub error_display_secs: u64,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = GeneratorSettings::default();
        Self {
            endpoint: settings.endpoint,
            request_timeout_secs: settings.response_timeout.as_secs(),
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            read_timeout_secs: settings.read_timeout.as_secs(),
            error_display_secs: reelscript_core::ERROR_DISPLAY.as_secs(),
            max_response_bytes: settings.max_response_bytes,
        }
    }
}

impl AppConfig {
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            response_timeout: Duration::from_secs(self.request_timeout_secs),
            // A read timeout below the request deadline would preempt it.
            read_timeout: Duration::from_secs(self.read_timeout_secs.max(self.request_timeout_secs)),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.error_display_secs)
    }

    fn check(self) -> anyhow::Result<Self> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.endpoint.trim().is_empty() {
            bail!("endpoint must not be empty");
        }
        Ok(self)
    }
}

/// Loads the config from `explicit`, or from `./reelscript.ron` when no path is given.
///
/// An explicit path must exist and parse. The implicit file is optional; if it
/// is missing or broken the defaults are used and a warning is logged.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: AppConfig = ron::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            engine_info!("Loaded config from {:?}", path);
            config
        }
        None => load_implicit(Path::new(CONFIG_FILENAME)),
    };
    config.check()
}

fn load_implicit(path: &Path) -> AppConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            engine_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&text) {
        Ok(config) => {
            engine_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            engine_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
