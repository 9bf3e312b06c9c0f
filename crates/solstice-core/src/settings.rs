//! Cycle settings and the user-facing choices they are derived from.
//!
//! This module provides:
//! - `CycleSettings`: the persisted record (enabled, cycle length, offset)
//! - `SettingsChoices`: what the settings menu exposes
//! - Blob encoding with overwrite-style merging on load
//! - Menu field visibility

use serde::{Deserialize, Serialize};
use solstice_common::{ConfigurationError, SolsticeError, SolsticeResult};
use tracing::warn;

use crate::cycle::{CycleLength, StartSeason};

/// File name used for the settings blob inside a save slot.
pub const SETTINGS_FILE_NAME: &str = "solstice-settings";

/// Persisted seasonal-cycle settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSettings {
    /// Cycle length in days.
    pub cycle_length: CycleLength,
    /// Days added to the host day counter, `0..cycle_length`.
    pub cycle_offset: u32,
    /// Whether the seasonal cycle drives the schedule.
    pub enabled: bool,
}

/// Partial record used for overwrite-style loading.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycleSettingsPatch {
    cycle_length: Option<u32>,
    cycle_offset: Option<u32>,
    enabled: Option<bool>,
}

impl CycleSettings {
    /// Serialize to the save-slot blob format.
    pub fn to_blob(&self) -> SolsticeResult<String> {
        serde_json::to_string(self).map_err(|e| SolsticeError::Serialization(e.to_string()))
    }

    /// Parse a complete blob.
    ///
    /// Fields missing from the blob take their default values.
    pub fn from_blob(blob: &str) -> Result<Self, ConfigurationError> {
        let mut settings = Self::default();
        settings.merge_blob(blob)?;
        Ok(settings)
    }

    /// Overwrite the fields present in `blob`, keeping the rest.
    ///
    /// Unknown fields are ignored. The merged record is validated before it
    /// is stored; on error `self` is left untouched.
    pub fn merge_blob(&mut self, blob: &str) -> Result<(), ConfigurationError> {
        let patch: CycleSettingsPatch =
            serde_json::from_str(blob).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;

        let cycle_length = match patch.cycle_length {
            Some(days) => CycleLength::try_from(days)?,
            None => self.cycle_length,
        };

        let mut merged = Self {
            cycle_length,
            cycle_offset: patch.cycle_offset.unwrap_or(self.cycle_offset),
            enabled: patch.enabled.unwrap_or(self.enabled),
        };
        merged.validate();

        *self = merged;
        Ok(())
    }

    /// Bring the offset into `0..cycle_length`.
    pub fn validate(&mut self) {
        let days = self.cycle_length.days();
        if self.cycle_offset >= days {
            let wrapped = self.cycle_offset % days;
            warn!(
                "Cycle offset {} out of range for {} day cycle, using {}",
                self.cycle_offset, days, wrapped
            );
            self.cycle_offset = wrapped;
        }
    }
}

/// Choices made in the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsChoices {
    /// Enable the seasonal cycle.
    pub enabled: bool,
    /// Cycle length choice index (0 = 2 months .. 3 = 12 months).
    pub cycle_length: usize,
    /// Where in the cycle the game starts.
    pub start_season: StartSeason,
}

impl Default for SettingsChoices {
    fn default() -> Self {
        Self {
            enabled: true,
            cycle_length: CycleLength::default().choice_index(),
            start_season: StartSeason::default(),
        }
    }
}

impl SettingsChoices {
    /// Derive persisted settings from these choices.
    pub fn derive(&self, rng: &mut fastrand::Rng) -> CycleSettings {
        let cycle_length = CycleLength::from_choice(self.cycle_length);
        CycleSettings {
            cycle_length,
            cycle_offset: self.start_season.cycle_offset(cycle_length, rng),
            enabled: self.enabled,
        }
    }
}

/// Which settings-menu fields are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsVisibility {
    /// Cycle length selector.
    pub cycle_length: bool,
    /// Start season selector.
    pub start_season: bool,
}

/// Fields depending on the enabled toggle are hidden while it is off.
#[must_use]
pub fn compute_visibility(choices: &SettingsChoices) -> SettingsVisibility {
    SettingsVisibility {
        cycle_length: choices.enabled,
        start_season: choices.enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blob_field_names() {
        let settings = CycleSettings {
            cycle_length: CycleLength::SixMonths,
            cycle_offset: 45,
            enabled: true,
        };
        let blob = settings.to_blob().expect("serialize");
        assert_eq!(blob, r#"{"cycleLength":180,"cycleOffset":45,"enabled":true}"#);
    }

    #[test]
    fn test_merge_keeps_missing_fields() {
        let mut settings = CycleSettings {
            cycle_length: CycleLength::TwelveMonths,
            cycle_offset: 200,
            enabled: false,
        };
        settings
            .merge_blob(r#"{"enabled":true,"unknown":5}"#)
            .expect("merge");

        assert!(settings.enabled);
        assert_eq!(settings.cycle_length, CycleLength::TwelveMonths);
        assert_eq!(settings.cycle_offset, 200);
    }

    #[test]
    fn test_merge_rejects_garbage() {
        let mut settings = CycleSettings::default();
        let before = settings;
        let result = settings.merge_blob("not json");
        assert!(matches!(result, Err(ConfigurationError::Malformed(_))));
        assert_eq!(settings, before);
    }

    #[test]
    fn test_merge_rejects_unsupported_length() {
        let mut settings = CycleSettings::default();
        let result = settings.merge_blob(r#"{"cycleLength":90}"#);
        assert!(matches!(
            result,
            Err(ConfigurationError::UnsupportedCycleLength(90))
        ));
    }

    #[test]
    fn test_offset_wrapped_on_load() {
        let settings =
            CycleSettings::from_blob(r#"{"cycleLength":60,"cycleOffset":75,"enabled":true}"#)
                .expect("parse");
        assert_eq!(settings.cycle_offset, 15);
    }

    #[test]
    fn test_derive_from_choices() {
        let mut rng = fastrand::Rng::with_seed(1);
        let choices = SettingsChoices {
            enabled: true,
            cycle_length: 2,
            start_season: StartSeason::Autumn,
        };
        let settings = choices.derive(&mut rng);
        assert_eq!(settings.cycle_length.days(), 180);
        assert_eq!(settings.cycle_offset, 135);
        assert!(settings.enabled);
    }

    #[test]
    fn test_visibility_follows_enabled() {
        let mut choices = SettingsChoices::default();
        assert_eq!(
            compute_visibility(&choices),
            SettingsVisibility {
                cycle_length: true,
                start_season: true
            }
        );

        choices.enabled = false;
        let visibility = compute_visibility(&choices);
        assert!(!visibility.cycle_length);
        assert!(!visibility.start_season);
    }

    proptest! {
        #[test]
        fn prop_blob_roundtrip(choice in 0usize..4, offset in 0u32..360, enabled in any::<bool>()) {
            let cycle_length = CycleLength::from_choice(choice);
            let settings = CycleSettings {
                cycle_length,
                cycle_offset: offset % cycle_length.days(),
                enabled,
            };
            let blob = settings.to_blob().expect("serialize");
            let back = CycleSettings::from_blob(&blob).expect("parse");
            prop_assert_eq!(settings, back);
        }
    }
}
