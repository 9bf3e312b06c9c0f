//! Cycle scheduling: from the host's day counter to seasonal strength.
//!
//! A cycle of `N` in-game days is mapped onto a fixed 13-point seasonal
//! curve spanning positions `0..=12`. Position 0 and 12 are midwinter
//! (shortest days), position 6 is midsummer.

use serde::{Deserialize, Serialize};
use solstice_common::ConfigurationError;

use crate::interpolator::Interpolator;

/// Number of steps in the seasonal curve domain.
pub const INTERPOLATOR_STEPS: f32 = 12.0;

/// Seasonal strength at each integer position `0..=12`.
pub const SEASONAL_STRENGTH: [f32; 13] = [
    -0.492, -0.415, -0.216, 0.008, 0.264, 0.44, 0.5, 0.443, 0.264, 0.02, -0.225, -0.419, -0.492,
];

/// Supported cycle lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CycleLength {
    /// 60 in-game days.
    TwoMonths,
    /// 120 in-game days.
    #[default]
    FourMonths,
    /// 180 in-game days.
    SixMonths,
    /// 360 in-game days.
    TwelveMonths,
}

impl CycleLength {
    /// Map a settings-menu choice index to a cycle length.
    ///
    /// Indices past the last choice select the longest cycle.
    #[must_use]
    pub const fn from_choice(index: usize) -> Self {
        match index {
            0 => Self::TwoMonths,
            1 => Self::FourMonths,
            2 => Self::SixMonths,
            _ => Self::TwelveMonths,
        }
    }

    /// Settings-menu choice index.
    #[must_use]
    pub const fn choice_index(self) -> usize {
        match self {
            Self::TwoMonths => 0,
            Self::FourMonths => 1,
            Self::SixMonths => 2,
            Self::TwelveMonths => 3,
        }
    }

    /// Length in in-game days.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::TwoMonths => 60,
            Self::FourMonths => 120,
            Self::SixMonths => 180,
            Self::TwelveMonths => 360,
        }
    }

    /// Label shown in the settings menu.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TwoMonths => "2 Months",
            Self::FourMonths => "4 Months",
            Self::SixMonths => "6 Months",
            Self::TwelveMonths => "12 Months",
        }
    }

    /// All supported lengths in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::TwoMonths,
            Self::FourMonths,
            Self::SixMonths,
            Self::TwelveMonths,
        ]
    }
}

impl TryFrom<u32> for CycleLength {
    type Error = ConfigurationError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::all()
            .into_iter()
            .find(|length| length.days() == days)
            .ok_or(ConfigurationError::UnsupportedCycleLength(days))
    }
}

impl From<CycleLength> for u32 {
    fn from(length: CycleLength) -> Self {
        length.days()
    }
}

/// Where in the cycle a new game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StartSeason {
    /// Uniformly random day of the cycle.
    #[default]
    Random,
    /// Days are short and cold.
    Winter,
    /// Days are getting longer and warmer.
    Spring,
    /// Days are long and warm.
    Summer,
    /// Days are getting shorter and colder.
    Autumn,
}

impl StartSeason {
    /// Label shown in the settings menu.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
        }
    }

    /// Cycle offset in days for a cycle of `length`.
    pub fn cycle_offset(self, length: CycleLength, rng: &mut fastrand::Rng) -> u32 {
        let days = length.days();
        let fraction = match self {
            Self::Random => return rng.u32(0..days),
            Self::Winter => 0.0,
            Self::Spring => 0.25,
            Self::Summer => 0.5,
            Self::Autumn => 0.75,
        };
        (f64::from(days) * fraction) as u32
    }
}

/// Where the current day sits in the seasonal cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePosition {
    /// Day within the cycle, `0..cycle_length`.
    pub cycle_day: u32,
    /// Position on the seasonal curve, `0.0..12.0`.
    pub position: f32,
    /// Seasonal strength at that position.
    pub strength: f32,
}

/// Turns a day counter into seasonal strength.
#[derive(Debug, Clone)]
pub struct CycleScheduler {
    seasonal: Interpolator,
}

impl Default for CycleScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleScheduler {
    /// Create a scheduler seeded with the fixed seasonal curve.
    #[must_use]
    pub fn new() -> Self {
        let mut seasonal = Interpolator::new();
        for (step, strength) in SEASONAL_STRENGTH.iter().enumerate() {
            seasonal.set(step as f32, *strength);
        }
        Self { seasonal }
    }

    /// The seasonal curve.
    #[must_use]
    pub fn seasonal_curve(&self) -> &Interpolator {
        &self.seasonal
    }

    /// Day within the cycle, honouring a forced day when set.
    ///
    /// A forced day is wrapped into the cycle like the counter is.
    #[must_use]
    pub fn cycle_day(
        day_counter: u32,
        cycle_offset: u32,
        length: CycleLength,
        forced_day: Option<u32>,
    ) -> u32 {
        if let Some(day) = forced_day {
            return day % length.days();
        }
        let days = u64::from(length.days());
        ((u64::from(day_counter) + u64::from(cycle_offset)) % days) as u32
    }

    /// Position on the seasonal curve for a cycle day.
    #[must_use]
    pub fn position(cycle_day: u32, length: CycleLength) -> f32 {
        INTERPOLATOR_STEPS * cycle_day as f32 / length.days() as f32
    }

    /// Seasonal strength for a cycle day.
    #[must_use]
    pub fn strength(&self, cycle_day: u32, length: CycleLength) -> f32 {
        self.seasonal.value_at(Self::position(cycle_day, length))
    }

    /// Full evaluation for a day counter.
    #[must_use]
    pub fn evaluate(
        &self,
        day_counter: u32,
        cycle_offset: u32,
        length: CycleLength,
        forced_day: Option<u32>,
    ) -> CyclePosition {
        let cycle_day = Self::cycle_day(day_counter, cycle_offset, length, forced_day);
        let position = Self::position(cycle_day, length);
        CyclePosition {
            cycle_day,
            position,
            strength: self.seasonal.value_at(position),
        }
    }
}
