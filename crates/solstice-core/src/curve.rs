//! Linear responses of the day/night schedule to seasonal strength.

use serde::{Deserialize, Serialize};

/// A linear map `strength -> base + strength * factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalCurve {
    base: f32,
    factor: f32,
}

impl SeasonalCurve {
    /// Sun elevation in degrees.
    pub const SUN_ANGLE: Self = Self::new(30.0, 47.0);
    /// Start of morning twilight (hours).
    pub const DAWN: Self = Self::new(5.0, -7.0);
    /// Sunrise (hours).
    pub const SUNRISE: Self = Self::new(6.0, -6.333);
    /// Sunset (hours).
    pub const SUNSET: Self = Self::new(18.0, 6.333);
    /// End of evening twilight (hours).
    pub const DUSK: Self = Self::new(19.0, 6.8);

    /// Create a curve.
    #[must_use]
    pub const fn new(base: f32, factor: f32) -> Self {
        Self { base, factor }
    }

    /// Value at zero strength.
    #[must_use]
    pub const fn base(&self) -> f32 {
        self.base
    }

    /// Change in value per unit of strength.
    #[must_use]
    pub const fn factor(&self) -> f32 {
        self.factor
    }

    /// Evaluate the curve.
    #[must_use]
    pub fn calculate(&self, strength: f32) -> f32 {
        self.base + strength * self.factor
    }
}
