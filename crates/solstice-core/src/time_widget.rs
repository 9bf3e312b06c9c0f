//! Sun and moon placement on the HUD time-of-day dial.
//!
//! The dial maps normalized time onto an angle so that the sun icon crosses
//! the horizon markers exactly at sunrise and sunset, whatever the season.

use glam::Vec2;

use crate::interpolator::Interpolator;

/// Hours in a day.
const HOURS_PER_DAY: f32 = 24.0;

/// Angle lookup for the sun and moon icons.
#[derive(Debug, Clone)]
pub struct TimeWidgetDial {
    sun: Interpolator,
    moon: Interpolator,
    sun_radius: f32,
    moon_radius: f32,
}

impl TimeWidgetDial {
    /// Create a dial with the icon radii of the host widget and the default
    /// 6:00/18:00 day.
    #[must_use]
    pub fn new(sun_radius: f32, moon_radius: f32) -> Self {
        let mut dial = Self {
            sun: Interpolator::new(),
            moon: Interpolator::new(),
            sun_radius,
            moon_radius,
        };
        dial.set_times(6.0, 18.0);
        dial
    }

    /// Rebuild both lookups for new sunrise/sunset hours.
    pub fn set_times(&mut self, sunrise: f32, sunset: f32) {
        let sunrise = sunrise / HOURS_PER_DAY;
        let sunset = sunset / HOURS_PER_DAY;

        self.sun.clear();
        self.sun.set(0.0, -180.0);
        self.sun.set(sunrise, -100.0);
        self.sun.set(0.5, 0.0);
        self.sun.set(sunset, 100.0);
        self.sun.set(1.0, 180.0);

        self.moon.clear();
        self.moon.set(0.0, 0.0);
        self.moon.set(sunrise, 100.0);
        self.moon.set(0.5, 180.0);
        self.moon.set(sunset, 260.0);
        self.moon.set(1.0, 360.0);
    }

    /// Sun icon angle in degrees, 0 at the top of the dial.
    #[must_use]
    pub fn sun_angle(&self, normalized_time: f32) -> f32 {
        self.sun.value_at(normalized_time)
    }

    /// Moon icon angle in degrees.
    #[must_use]
    pub fn moon_angle(&self, normalized_time: f32) -> f32 {
        self.moon.value_at(normalized_time)
    }

    /// Sun icon offset from the dial centre.
    #[must_use]
    pub fn sun_position(&self, normalized_time: f32) -> Vec2 {
        position_on_circle(self.sun_radius, self.sun_angle(normalized_time))
    }

    /// Moon icon offset from the dial centre.
    #[must_use]
    pub fn moon_position(&self, normalized_time: f32) -> Vec2 {
        position_on_circle(self.moon_radius, self.moon_angle(normalized_time))
    }
}

fn position_on_circle(radius: f32, angle_degrees: f32) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(radius * sin, radius * cos)
}
