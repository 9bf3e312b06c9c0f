//! Simulated weather system for running the cycle outside a game.
//!
//! Tracks time of day and a day counter, and owns a time-of-day keyframe
//! table the way the game's weather system does.

use solstice_core::{WeatherSystemHandle, KEYFRAME_COUNT};

/// Hours in a game day.
const HOURS_PER_DAY: f32 = 24.0;

/// Keyframe times of an unmodified schedule.
pub const DEFAULT_KEYFRAME_TIMES: [f32; KEYFRAME_COUNT] = [5.0, 6.0, 7.0, 12.0, 17.0, 18.0, 19.0];

/// In-memory weather system.
#[derive(Debug, Clone)]
pub struct SimulatedWeatherSystem {
    /// Current time of day (0.0 = midnight, 0.5 = noon)
    normalized_time: f32,
    /// Number of complete days
    day_counter: u32,
    keyframe_times: [f32; KEYFRAME_COUNT],
    master_time_offset: f32,
    sun_angle: f32,
}

impl Default for SimulatedWeatherSystem {
    fn default() -> Self {
        Self {
            normalized_time: 0.25,
            day_counter: 0,
            keyframe_times: DEFAULT_KEYFRAME_TIMES,
            master_time_offset: 0.0,
            sun_angle: 30.0,
        }
    }
}

impl SimulatedWeatherSystem {
    /// Creates a weather system starting at `day` and `hour`.
    #[must_use]
    pub fn new(day: u32, hour: f32) -> Self {
        Self {
            normalized_time: (hour / HOURS_PER_DAY).rem_euclid(1.0),
            day_counter: day,
            ..Default::default()
        }
    }

    /// Advance the clock, rolling the day counter over at midnight.
    ///
    /// Returns the number of days that started.
    pub fn advance_hours(&mut self, hours: f32) -> u32 {
        let total = self.normalized_time + hours.max(0.0) / HOURS_PER_DAY;
        let days = total.floor() as u32;
        self.normalized_time = total.fract();
        self.day_counter = self.day_counter.saturating_add(days);
        days
    }

    /// Current hour (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        (self.normalized_time * HOURS_PER_DAY) as u32 % 24
    }

    /// Sunrise hour from the keyframe table.
    #[must_use]
    pub fn sunrise(&self) -> f32 {
        self.keyframe_times[1] + self.master_time_offset
    }

    /// Sunset hour from the keyframe table.
    #[must_use]
    pub fn sunset(&self) -> f32 {
        self.keyframe_times[5] + self.master_time_offset
    }
}

impl WeatherSystemHandle for SimulatedWeatherSystem {
    fn day_counter(&self) -> u32 {
        self.day_counter
    }

    fn keyframe_times(&self) -> &[f32; KEYFRAME_COUNT] {
        &self.keyframe_times
    }

    fn keyframe_times_mut(&mut self) -> &mut [f32; KEYFRAME_COUNT] {
        &mut self.keyframe_times
    }

    fn master_time_offset(&self) -> f32 {
        self.master_time_offset
    }

    fn set_master_time_offset(&mut self, offset: f32) {
        self.master_time_offset = offset;
    }

    fn sun_angle(&self) -> f32 {
        self.sun_angle
    }

    fn set_sun_angle(&mut self, angle: f32) {
        self.sun_angle = angle;
    }

    fn normalized_time(&self) -> f32 {
        self.normalized_time
    }

    fn is_night_or_night_blend(&self) -> bool {
        let hour = self.normalized_time * HOURS_PER_DAY;
        let dawn = self.keyframe_times[0] + self.master_time_offset;
        let dusk = self.keyframe_times[6] + self.master_time_offset;
        hour < dawn || hour >= dusk
    }
}
