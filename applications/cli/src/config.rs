/// CLI configuration
use crate::error::{CliError, Result};
use harmonic_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "harmonic.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Catalog export to load (`{ "songs": [...], "playlists": [...] }`)
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_device")]
    pub device: DeviceSettings,

    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Clock step between simulated time updates
    #[serde(default = "default_time_update_ms")]
    pub time_update_ms: u64,

    /// Duration reported for media without a duration hint
    #[serde(default = "default_fallback_duration_secs")]
    pub fallback_duration_secs: u64,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `harmonic.toml` in the working
    /// directory is used if present. `HARMONIC_*` variables override both,
    /// with `__` between nested keys (`HARMONIC_PLAYBACK__VOLUME=0.4`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("HARMONIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.playback
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.device.time_update_ms == 0 {
            return Err(CliError::Config(
                "device.time_update_ms must be greater than zero".to_string(),
            ));
        }

        if self.device.fallback_duration_secs == 0 {
            return Err(CliError::Config(
                "device.fallback_duration_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            playback: PlaybackConfig::default(),
            device: default_device(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_device() -> DeviceSettings {
    DeviceSettings {
        time_update_ms: default_time_update_ms(),
        fallback_duration_secs: default_fallback_duration_secs(),
    }
}

fn default_time_update_ms() -> u64 {
    250
}

fn default_fallback_duration_secs() -> u64 {
    180
}

fn default_log_filter() -> String {
    "harmonic=info,harmonic_playback=info,harmonic_core=info".to_string()
}
