//! Keyframe reconfiguration of the host's time-of-day schedule.
//!
//! The host weather system owns a table of seven time-of-day keyframes
//! (hours, 0-24). While the seasonal cycle is enabled the table is rewritten
//! every tick from the current strength; when it is disabled the values
//! captured at init are written back.

use solstice_common::PreconditionError;
use tracing::debug;

use crate::curve::SeasonalCurve;

/// Number of time-of-day keyframes in the host schedule.
pub const KEYFRAME_COUNT: usize = 7;

/// Fixed midday anchor written to keyframe 3.
pub const MIDDAY: f32 = 12.0;

/// Narrow view of the host weather system.
pub trait WeatherSystemHandle {
    /// Current in-game day counter.
    fn day_counter(&self) -> u32;

    /// Time-of-day keyframes.
    fn keyframe_times(&self) -> &[f32; KEYFRAME_COUNT];

    /// Mutable time-of-day keyframes.
    fn keyframe_times_mut(&mut self) -> &mut [f32; KEYFRAME_COUNT];

    /// Offset applied to all keyframe times.
    fn master_time_offset(&self) -> f32;

    /// Set the offset applied to all keyframe times.
    fn set_master_time_offset(&mut self, offset: f32);

    /// Sun elevation in degrees.
    fn sun_angle(&self) -> f32;

    /// Set the sun elevation in degrees.
    fn set_sun_angle(&mut self, angle: f32);

    /// Time of day, 0.0 (midnight) to 1.0.
    fn normalized_time(&self) -> f32;

    /// Whether it is night or blending into night.
    fn is_night_or_night_blend(&self) -> bool;
}

/// Copy of the host keyframe state taken at init.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSnapshot {
    /// Keyframe times.
    pub keyframe_times: [f32; KEYFRAME_COUNT],
    /// Master time-key offset.
    pub master_time_offset: f32,
}

impl KeyframeSnapshot {
    /// Capture the current state of a weather system.
    #[must_use]
    pub fn capture<H: WeatherSystemHandle + ?Sized>(handle: &H) -> Self {
        Self {
            keyframe_times: *handle.keyframe_times(),
            master_time_offset: handle.master_time_offset(),
        }
    }
}

/// Everything derived from a single strength value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalOutputs {
    /// Strength the outputs were computed from.
    pub strength: f32,
    /// Start of morning twilight.
    pub dawn: f32,
    /// Sunrise.
    pub sunrise: f32,
    /// Sunset.
    pub sunset: f32,
    /// End of evening twilight.
    pub dusk: f32,
    /// Sun elevation in degrees.
    pub sun_angle: f32,
    /// Daytime light multiplier, `0.0..=1.0`.
    pub brightness_multiplier: f32,
    /// Temperature bias, never positive.
    pub temperature_offset: f32,
}

impl SeasonalOutputs {
    /// Evaluate all curves for `strength`.
    #[must_use]
    pub fn from_strength(strength: f32) -> Self {
        Self {
            strength,
            dawn: SeasonalCurve::DAWN.calculate(strength),
            sunrise: SeasonalCurve::SUNRISE.calculate(strength),
            sunset: SeasonalCurve::SUNSET.calculate(strength),
            dusk: SeasonalCurve::DUSK.calculate(strength),
            sun_angle: SeasonalCurve::SUN_ANGLE.calculate(strength),
            brightness_multiplier: brightness_multiplier(strength),
            temperature_offset: temperature_offset(strength),
        }
    }
}

/// Daytime light multiplier for `strength`.
#[must_use]
pub fn brightness_multiplier(strength: f32) -> f32 {
    (1.1 + strength).clamp(0.0, 1.0)
}

/// Temperature bias for `strength`.
#[must_use]
pub fn temperature_offset(strength: f32) -> f32 {
    (10.0 * strength).min(0.0)
}

/// Writes seasonal keyframes into the host table and restores the originals.
#[derive(Debug, Clone, Default)]
pub struct KeyframeReconfigurer {
    original: Option<KeyframeSnapshot>,
}

impl KeyframeReconfigurer {
    /// Create a reconfigurer with no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the unmodified keyframes of a weather system.
    pub fn capture<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &H) {
        self.original = Some(KeyframeSnapshot::capture(handle));
    }

    /// The captured snapshot, if any.
    #[must_use]
    pub fn original(&self) -> Option<&KeyframeSnapshot> {
        self.original.as_ref()
    }

    /// Whether a snapshot has been captured.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.original.is_some()
    }

    /// Write the seasonal schedule for `outputs` into the host.
    pub fn apply<H: WeatherSystemHandle + ?Sized>(
        &self,
        handle: &mut H,
        outputs: &SeasonalOutputs,
    ) -> Result<(), PreconditionError> {
        if self.original.is_none() {
            return Err(PreconditionError::NotInitialized);
        }

        handle.set_master_time_offset(0.0);

        let times = handle.keyframe_times_mut();
        times[0] = outputs.dawn;
        times[1] = outputs.sunrise;
        times[2] = times[1] + 1.0;
        times[3] = MIDDAY;

        times[6] = outputs.dusk;
        times[5] = outputs.sunset;
        times[4] = times[5] - 1.0;

        handle.set_sun_angle(outputs.sun_angle);

        debug!(
            "Applied keyframes: sunrise {:.3}, sunset {:.3}, sun angle {:.2}",
            outputs.sunrise, outputs.sunset, outputs.sun_angle
        );
        Ok(())
    }

    /// Write the captured keyframes back into the host.
    pub fn restore<H: WeatherSystemHandle + ?Sized>(
        &self,
        handle: &mut H,
    ) -> Result<(), PreconditionError> {
        let original = self.original.ok_or(PreconditionError::NotInitialized)?;

        handle
            .keyframe_times_mut()
            .copy_from_slice(&original.keyframe_times);
        handle.set_master_time_offset(original.master_time_offset);

        debug!("Restored original keyframes");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeWeather;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_apply_requires_capture() {
        let mut weather = FakeWeather::default();
        let reconfigurer = KeyframeReconfigurer::new();
        let outputs = SeasonalOutputs::from_strength(0.2);

        assert_eq!(
            reconfigurer.apply(&mut weather, &outputs),
            Err(PreconditionError::NotInitialized)
        );
        assert_eq!(
            reconfigurer.restore(&mut weather),
            Err(PreconditionError::NotInitialized)
        );
    }

    #[test]
    fn test_apply_layout() {
        let mut weather = FakeWeather::default();
        let mut reconfigurer = KeyframeReconfigurer::new();
        reconfigurer.capture(&weather);

        let outputs = SeasonalOutputs::from_strength(0.5);
        reconfigurer
            .apply(&mut weather, &outputs)
            .expect("apply after capture");

        let times = weather.keyframes;
        assert!((times[0] - outputs.dawn).abs() < 1e-6);
        assert!((times[1] - outputs.sunrise).abs() < 1e-6);
        assert!((times[2] - (outputs.sunrise + 1.0)).abs() < 1e-6);
        assert!((times[3] - MIDDAY).abs() < 1e-6);
        assert!((times[4] - (outputs.sunset - 1.0)).abs() < 1e-6);
        assert!((times[5] - outputs.sunset).abs() < 1e-6);
        assert!((times[6] - outputs.dusk).abs() < 1e-6);
        assert!(weather.master_offset.abs() < 1e-6);
        assert!((weather.sun_angle - outputs.sun_angle).abs() < 1e-6);
    }

    #[test]
    fn test_restore_is_exact_inverse() {
        let mut weather = FakeWeather::default();
        let mut reconfigurer = KeyframeReconfigurer::new();
        reconfigurer.capture(&weather);

        reconfigurer.restore(&mut weather).expect("restore");
        let original = KeyframeSnapshot::capture(&weather);

        reconfigurer
            .apply(&mut weather, &SeasonalOutputs::from_strength(-0.37))
            .expect("apply");
        reconfigurer.restore(&mut weather).expect("restore");

        let restored = KeyframeSnapshot::capture(&weather);
        for (a, b) in original
            .keyframe_times
            .iter()
            .zip(restored.keyframe_times.iter())
        {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert_eq!(
            original.master_time_offset.to_bits(),
            restored.master_time_offset.to_bits()
        );
    }

    #[test]
    fn test_derived_scalars() {
        assert!((brightness_multiplier(-0.492) - 0.608).abs() < 1e-5);
        assert!((brightness_multiplier(0.5) - 1.0).abs() < 1e-6);
        assert!((temperature_offset(-0.492) + 4.92).abs() < 1e-5);
        assert!(temperature_offset(0.3).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_brightness_bounded(strength in -10.0f32..10.0) {
            let brightness = brightness_multiplier(strength);
            prop_assert!((0.0..=1.0).contains(&brightness));
        }

        #[test]
        fn prop_temperature_never_positive(strength in -10.0f32..10.0) {
            prop_assert!(temperature_offset(strength) <= 0.0);
        }

        #[test]
        fn prop_day_ordering(strength in -0.5f32..0.5) {
            let o = SeasonalOutputs::from_strength(strength);
            prop_assert!(o.dawn < o.sunrise);
            prop_assert!(o.sunrise + 1.0 < MIDDAY);
            prop_assert!(MIDDAY < o.sunset - 1.0);
            prop_assert!(o.sunset < o.dusk);
        }
    }
}
