//! Host configuration.
//!
//! Loaded from `solstice.toml` in the platform config directory. Missing or
//! unreadable files fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use solstice_core::{CycleLength, SettingsChoices, StartSeason};
use tracing::{info, warn};

use crate::error::HostResult;

/// Configuration file name.
const CONFIG_FILE: &str = "solstice.toml";

/// Directory name under the platform config/data directories.
const APP_DIR: &str = "solstice";

/// Host configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Directory holding save slots (None = platform data directory)
    pub save_dir: Option<PathBuf>,
    /// Save slot used by the demo run
    pub slot: String,
    /// Tracing filter directive
    pub log_filter: String,
    /// Enable the seasonal cycle on first launch
    pub enabled: bool,
    /// Cycle length choice index (0-3)
    pub cycle_length: usize,
    /// Start season
    pub start_season: StartSeason,
    /// Seed for the random start season (None = entropy)
    pub rng_seed: Option<u64>,
    /// Days simulated by the demo run
    pub simulate_days: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            slot: "sandbox1".to_string(),
            log_filter: "solstice=info".to_string(),
            enabled: true,
            cycle_length: CycleLength::default().choice_index(),
            start_season: StartSeason::default(),
            rng_seed: None,
            simulate_days: 30,
        }
    }
}

impl HostConfig {
    /// Load configuration from the default file location.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> HostResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        let max_choice = CycleLength::TwelveMonths.choice_index();
        if self.cycle_length > max_choice {
            warn!(
                "Cycle length choice {} out of range, using {}",
                self.cycle_length, max_choice
            );
            self.cycle_length = max_choice;
        }
        if self.slot.trim().is_empty() {
            self.slot = Self::default().slot;
        }
    }

    /// Settings-menu choices described by this config.
    #[must_use]
    pub fn choices(&self) -> SettingsChoices {
        SettingsChoices {
            enabled: self.enabled,
            cycle_length: self.cycle_length,
            start_season: self.start_season,
        }
    }

    /// Random generator for the start season.
    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        self.rng_seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }

    /// Directory holding save slots.
    #[must_use]
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join("saves"))
                .unwrap_or_else(|| PathBuf::from("saves"))
        })
    }

    /// Default configuration file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }
}
