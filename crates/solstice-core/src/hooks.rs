//! Hook points the host calls at fixed moments of its frame.
//!
//! - After blending the time-of-day lighting state: scale daytime lighting
//! - After generating high/low temperatures: add the seasonal bias
//! - Instead of the host's sun transform update: orient the sun light

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::keyframes::WeatherSystemHandle;
use crate::solstice::Solstice;

/// Elevation the host's default sun path is built around, in degrees.
pub const REFERENCE_ANGLE: f32 = 45.0;

/// Blended time-of-day lighting values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingState {
    /// Sun light intensity.
    pub sun_light_intensity: f32,
    /// Sky bloom intensity.
    pub sky_bloom_intensity: f32,
    /// Sky fog colour (RGBA).
    pub sky_fog_color: Vec4,
    /// Fog colour (RGBA).
    pub fog_color: Vec4,
}

impl LightingState {
    /// Multiply every light contribution by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.sun_light_intensity *= factor;
        self.sky_bloom_intensity *= factor;
        self.sky_fog_color *= factor;
        self.fog_color *= factor;
    }
}

/// Dim daytime lighting by the seasonal brightness multiplier.
///
/// Returns whether the lighting was changed. Night and night blends are left
/// alone, as is everything while the cycle is disabled.
pub fn apply_brightness<H: WeatherSystemHandle + ?Sized>(
    solstice: &Solstice,
    handle: &H,
    lighting: &mut LightingState,
) -> bool {
    if !solstice.enabled() || handle.is_night_or_night_blend() {
        return false;
    }

    lighting.scale(solstice.brightness_multiplier());
    true
}

/// Add the seasonal temperature bias to a generated temperature.
#[must_use]
pub fn adjust_temperature(solstice: &Solstice, temperature: f32) -> f32 {
    if !solstice.enabled() {
        return temperature;
    }
    temperature + solstice.temperature_offset()
}

/// Forward vector of the sun light for the current time and sun angle.
///
/// `None` while the cycle is disabled, in which case the host keeps its own
/// sun transform.
pub fn sun_direction<H: WeatherSystemHandle + ?Sized>(
    solstice: &Solstice,
    handle: &H,
) -> Option<Vec3> {
    if !solstice.enabled() {
        return None;
    }
    Some(sun_forward(handle.normalized_time(), handle.sun_angle()))
}

/// Sun light forward vector for `normalized_time` (0-1) and elevation in degrees.
///
/// The light starts tilted 45 degrees down and turns about its own up axis,
/// so it points down at noon, sits on the horizon at 06:00 and 18:00 and
/// points up at midnight.
#[must_use]
pub fn sun_forward(normalized_time: f32, sun_angle: f32) -> Vec3 {
    let reference_height = REFERENCE_ANGLE.to_radians().sin();

    let base = Vec3::new(0.0, -reference_height, reference_height);
    let local_up = Vec3::new(0.0, reference_height, reference_height).normalize();
    let yaw = (normalized_time * 360.0 - 180.0).to_radians();
    let forward = Quat::from_axis_angle(local_up, yaw) * base;

    let lift = reference_height - sun_angle.to_radians().sin();
    Vec3::new(forward.x, forward.y + lift, forward.z).normalize_or_zero()
}
