//! Seasonal cycle lifecycle.
//!
//! `Solstice` is the single context object the host integration owns. It
//! ties the scheduler, the keyframe reconfigurer and the settings together
//! and is passed the weather-system handle on every call.

use solstice_common::{PreconditionError, SolsticeError, SolsticeResult};
use tracing::{debug, info, warn};

use crate::cycle::{CyclePosition, CycleScheduler};
use crate::keyframes::{KeyframeReconfigurer, SeasonalOutputs, WeatherSystemHandle};
use crate::settings::{CycleSettings, SettingsChoices};

/// Lifecycle state of the seasonal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No weather system has been captured yet.
    Uninitialized,
    /// Captured, host schedule untouched.
    Disabled,
    /// Captured, host schedule driven by the cycle.
    Enabled,
}

/// Values recomputed on every enabled update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeDerived {
    /// Seasonal strength, roughly `-0.5..=0.5`.
    pub strength: f32,
    /// Daytime light multiplier, `0.0..=1.0`.
    pub brightness_multiplier: f32,
    /// Temperature bias, never positive.
    pub temperature_offset: f32,
    /// Pinned cycle day for debugging.
    pub forced_day: Option<u32>,
}

impl Default for RuntimeDerived {
    fn default() -> Self {
        Self {
            strength: 0.0,
            brightness_multiplier: 1.0,
            temperature_offset: 0.0,
            forced_day: None,
        }
    }
}

/// Seasonal day-length cycle driver.
#[derive(Debug, Clone, Default)]
pub struct Solstice {
    settings: CycleSettings,
    scheduler: CycleScheduler,
    reconfigurer: KeyframeReconfigurer,
    derived: RuntimeDerived,
    last_position: Option<CyclePosition>,
}

impl Solstice {
    /// Create a disabled, uninitialized context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        if !self.reconfigurer.is_initialized() {
            LifecycleState::Uninitialized
        } else if self.settings.enabled {
            LifecycleState::Enabled
        } else {
            LifecycleState::Disabled
        }
    }

    /// Whether the cycle is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// Latest seasonal strength.
    #[must_use]
    pub fn strength(&self) -> f32 {
        self.derived.strength
    }

    /// Daytime light multiplier.
    #[must_use]
    pub fn brightness_multiplier(&self) -> f32 {
        self.derived.brightness_multiplier
    }

    /// Temperature bias.
    #[must_use]
    pub fn temperature_offset(&self) -> f32 {
        self.derived.temperature_offset
    }

    /// Pinned cycle day, if any.
    #[must_use]
    pub fn forced_day(&self) -> Option<u32> {
        self.derived.forced_day
    }

    /// All derived values.
    #[must_use]
    pub fn derived(&self) -> &RuntimeDerived {
        &self.derived
    }

    /// Cycle position computed by the last enabled update.
    #[must_use]
    pub fn last_position(&self) -> Option<&CyclePosition> {
        self.last_position.as_ref()
    }

    /// Capture the unmodified schedule of a weather system.
    ///
    /// Must run once for every weather-system instance before any update.
    pub fn init<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &H) {
        if self.reconfigurer.is_initialized() {
            debug!("Replacing keyframe snapshot for new weather system");
        }
        self.reconfigurer.capture(handle);
    }

    /// Store settings derived from menu choices and re-apply the schedule.
    pub fn apply_settings<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        choices: &SettingsChoices,
        rng: &mut fastrand::Rng,
        handle: &mut H,
    ) -> SolsticeResult<()> {
        self.settings = choices.derive(rng);
        self.log_settings();

        self.reconfigurer.restore(handle)?;
        self.update(handle)
    }

    /// Turn the cycle off and restore the original schedule.
    ///
    /// Does nothing when already disabled.
    pub fn disable<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &mut H) -> SolsticeResult<()> {
        if !self.settings.enabled {
            return Ok(());
        }

        self.settings.enabled = false;
        self.reconfigurer.restore(handle)?;
        info!("Seasonal cycle disabled");
        Ok(())
    }

    /// Load settings from a save-slot blob.
    ///
    /// A missing or empty blob disables the cycle. A malformed blob also
    /// disables it and the configuration error is returned.
    pub fn load_data<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        blob: Option<&str>,
        handle: &mut H,
    ) -> SolsticeResult<()> {
        let blob = match blob {
            Some(data) if !data.trim().is_empty() => data,
            _ => {
                self.disable(handle)?;
                self.log_settings();
                return Ok(());
            },
        };

        let was_enabled = self.settings.enabled;
        if let Err(e) = self.settings.merge_blob(blob) {
            warn!("Ignoring saved settings: {e}");
            if let Err(restore) = self.disable(handle) {
                warn!("Could not restore the host schedule: {restore}");
            }
            return Err(SolsticeError::Configuration(e));
        }

        if self.settings.enabled {
            self.update(handle)?;
        } else if was_enabled {
            self.reconfigurer.restore(handle)?;
        }

        self.log_settings();
        Ok(())
    }

    /// Serialize the current settings.
    pub fn save_data(&self) -> SolsticeResult<String> {
        self.settings.to_blob()
    }

    /// Pin the cycle day, or clear the pin with `None` or a negative day.
    ///
    /// Days past the cycle length wrap around.
    pub fn set_forced_day<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        day: Option<i64>,
        handle: &mut H,
    ) -> SolsticeResult<()> {
        let days = i64::from(self.settings.cycle_length.days());
        self.derived.forced_day = day
            .filter(|d| *d >= 0)
            .and_then(|d| u32::try_from(d % days).ok());

        match self.derived.forced_day {
            Some(day) => info!("Forcing cycle day {day}"),
            None => info!("Cleared forced cycle day"),
        }

        self.update(handle)
    }

    /// Recompute strength and rewrite the schedule. No-op while disabled.
    pub fn update<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &mut H) -> SolsticeResult<()> {
        if !self.settings.enabled {
            return Ok(());
        }
        if !self.reconfigurer.is_initialized() {
            return Err(PreconditionError::NotInitialized.into());
        }

        // The cycle length may have changed since the day was pinned.
        let days = self.settings.cycle_length.days();
        self.derived.forced_day = self.derived.forced_day.map(|day| day % days);

        let position = self.scheduler.evaluate(
            handle.day_counter(),
            self.settings.cycle_offset,
            self.settings.cycle_length,
            self.derived.forced_day,
        );
        let outputs = SeasonalOutputs::from_strength(position.strength);

        self.derived.strength = outputs.strength;
        self.derived.brightness_multiplier = outputs.brightness_multiplier;
        self.derived.temperature_offset = outputs.temperature_offset;
        self.last_position = Some(position);

        self.reconfigurer.apply(handle, &outputs)?;

        debug!(
            "Day: {} / {}; strength: {:.3}; brightness: {:.3}; temperature offset: {:.2}",
            position.cycle_day,
            self.settings.cycle_length.days(),
            outputs.strength,
            outputs.brightness_multiplier,
            outputs.temperature_offset
        );
        Ok(())
    }

    fn log_settings(&self) {
        info!(
            "Enabled: {}, Cycle Length: {}, Cycle Offset: {}",
            self.settings.enabled,
            self.settings.cycle_length.days(),
            self.settings.cycle_offset
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CycleLength, StartSeason};
    use crate::keyframes::test_support::FakeWeather;
    use crate::keyframes::KeyframeSnapshot;

    fn enabled_choices(start_season: StartSeason) -> SettingsChoices {
        SettingsChoices {
            enabled: true,
            cycle_length: 1,
            start_season,
        }
    }

    fn enabled_solstice(weather: &mut FakeWeather) -> Solstice {
        let mut solstice = Solstice::new();
        solstice.init(&*weather);
        let mut rng = fastrand::Rng::with_seed(3);
        solstice
            .apply_settings(&enabled_choices(StartSeason::Winter), &mut rng, weather)
            .expect("apply settings");
        solstice
    }

    #[test]
    fn test_initial_state() {
        let solstice = Solstice::new();
        assert_eq!(solstice.state(), LifecycleState::Uninitialized);
        assert!(!solstice.enabled());
        assert!((solstice.brightness_multiplier() - 1.0).abs() < 1e-6);
        assert!(solstice.temperature_offset().abs() < 1e-6);
    }

    #[test]
    fn test_apply_before_init_fails() {
        let mut weather = FakeWeather::default();
        let mut solstice = Solstice::new();
        let mut rng = fastrand::Rng::with_seed(3);
        let result =
            solstice.apply_settings(&enabled_choices(StartSeason::Winter), &mut rng, &mut weather);
        assert!(matches!(
            result,
            Err(SolsticeError::Precondition(PreconditionError::NotInitialized))
        ));
    }

    #[test]
    fn test_apply_settings_enables_and_writes() {
        let mut weather = FakeWeather::default();
        let solstice = enabled_solstice(&mut weather);

        assert_eq!(solstice.state(), LifecycleState::Enabled);
        assert_eq!(solstice.settings().cycle_length, CycleLength::FourMonths);
        assert_eq!(solstice.settings().cycle_offset, 0);
        // Day 0 of a winter start is midwinter.
        assert!((solstice.strength() + 0.492).abs() < 1e-6);
        assert!((weather.keyframes[3] - 12.0).abs() < 1e-6);
        assert!(weather.master_offset.abs() < 1e-6);
        assert!(solstice.temperature_offset() < 0.0);
    }

    #[test]
    fn test_update_is_noop_when_disabled() {
        let mut weather = FakeWeather::default();
        let before = weather.keyframes;
        let mut solstice = Solstice::new();
        solstice.init(&weather);

        weather.day_counter = 33;
        solstice.update(&mut weather).expect("update");
        assert_eq!(weather.keyframes, before);
        assert_eq!(solstice.state(), LifecycleState::Disabled);
    }

    #[test]
    fn test_forced_day_overrides_counter() {
        let mut weather = FakeWeather::default();
        let mut solstice = enabled_solstice(&mut weather);

        solstice
            .set_forced_day(Some(50), &mut weather)
            .expect("force day");
        for counter in [0, 7, 64, 1000] {
            weather.day_counter = counter;
            solstice.update(&mut weather).expect("update");
            assert_eq!(solstice.last_position().map(|p| p.cycle_day), Some(50));
        }

        solstice.set_forced_day(None, &mut weather).expect("clear");
        weather.day_counter = 7;
        solstice.update(&mut weather).expect("update");
        assert_eq!(solstice.last_position().map(|p| p.cycle_day), Some(7));
    }

    #[test]
    fn test_forced_day_wraps_and_negative_clears() {
        let mut weather = FakeWeather::default();
        let mut solstice = enabled_solstice(&mut weather);

        solstice
            .set_forced_day(Some(130), &mut weather)
            .expect("force day");
        assert_eq!(solstice.forced_day(), Some(10));

        solstice
            .set_forced_day(Some(-1), &mut weather)
            .expect("clear");
        assert_eq!(solstice.forced_day(), None);
    }

    #[test]
    fn test_disable_restores_and_is_idempotent() {
        let mut weather = FakeWeather::default();
        let original = KeyframeSnapshot::capture(&weather);
        let mut solstice = enabled_solstice(&mut weather);
        assert_ne!(KeyframeSnapshot::capture(&weather), original);

        solstice.disable(&mut weather).expect("disable");
        let once = KeyframeSnapshot::capture(&weather);
        let settings_once = *solstice.settings();

        solstice.disable(&mut weather).expect("disable again");
        assert_eq!(KeyframeSnapshot::capture(&weather), once);
        assert_eq!(*solstice.settings(), settings_once);
        assert_eq!(once, original);
        assert_eq!(solstice.state(), LifecycleState::Disabled);
    }

    #[test]
    fn test_load_missing_blob_disables() {
        let mut weather = FakeWeather::default();
        let original = KeyframeSnapshot::capture(&weather);
        let mut solstice = enabled_solstice(&mut weather);

        solstice.load_data(None, &mut weather).expect("load");
        assert!(!solstice.enabled());
        assert_eq!(KeyframeSnapshot::capture(&weather), original);

        solstice.load_data(Some(""), &mut weather).expect("load empty");
        assert!(!solstice.enabled());
    }

    #[test]
    fn test_load_applies_saved_settings() {
        let mut weather = FakeWeather::default();
        let mut solstice = Solstice::new();
        solstice.init(&weather);

        weather.day_counter = 40;
        solstice
            .load_data(
                Some(r#"{"cycleLength":120,"cycleOffset":90,"enabled":true}"#),
                &mut weather,
            )
            .expect("load");

        assert!(solstice.enabled());
        assert_eq!(solstice.last_position().map(|p| p.cycle_day), Some(10));
        assert!((weather.keyframes[3] - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_disabled_record_restores() {
        let mut weather = FakeWeather::default();
        let original = KeyframeSnapshot::capture(&weather);
        let mut solstice = enabled_solstice(&mut weather);

        solstice
            .load_data(Some(r#"{"enabled":false}"#), &mut weather)
            .expect("load");
        assert!(!solstice.enabled());
        assert_eq!(KeyframeSnapshot::capture(&weather), original);
    }

    #[test]
    fn test_load_malformed_falls_back_to_disabled() {
        let mut weather = FakeWeather::default();
        let original = KeyframeSnapshot::capture(&weather);
        let mut solstice = enabled_solstice(&mut weather);

        let result = solstice.load_data(Some("{broken"), &mut weather);
        assert!(matches!(result, Err(SolsticeError::Configuration(_))));
        assert!(!solstice.enabled());
        assert_eq!(KeyframeSnapshot::capture(&weather), original);
    }

    #[test]
    fn test_load_malformed_before_init_keeps_configuration_error() {
        let mut weather = FakeWeather::default();
        let mut solstice = Solstice::new();

        let first = solstice.load_data(Some(r#"{"enabled":true}"#), &mut weather);
        assert!(matches!(
            first,
            Err(SolsticeError::Precondition(PreconditionError::NotInitialized))
        ));

        let result = solstice.load_data(Some("{broken"), &mut weather);
        assert!(matches!(result, Err(SolsticeError::Configuration(_))));
        assert!(!solstice.enabled());
    }

    #[test]
    fn test_forced_day_rewraps_after_length_change() {
        let mut weather = FakeWeather::default();
        let mut solstice = Solstice::new();
        solstice.init(&weather);
        let mut rng = fastrand::Rng::with_seed(3);
        let year = SettingsChoices {
            cycle_length: 3,
            ..enabled_choices(StartSeason::Winter)
        };
        solstice
            .apply_settings(&year, &mut rng, &mut weather)
            .expect("apply year");
        solstice
            .set_forced_day(Some(300), &mut weather)
            .expect("force day");
        assert_eq!(solstice.forced_day(), Some(300));

        let two_months = SettingsChoices {
            cycle_length: 0,
            ..year
        };
        solstice
            .apply_settings(&two_months, &mut rng, &mut weather)
            .expect("apply two months");

        assert_eq!(solstice.forced_day(), Some(0));
        let position = solstice.last_position().expect("position");
        assert_eq!(position.cycle_day, 0);
        assert!(position.position < 12.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut weather = FakeWeather::default();
        let solstice = enabled_solstice(&mut weather);
        let blob = solstice.save_data().expect("save");

        let mut restored = Solstice::new();
        restored.init(&weather);
        restored.load_data(Some(&blob), &mut weather).expect("load");
        assert_eq!(restored.settings(), solstice.settings());
    }
}
