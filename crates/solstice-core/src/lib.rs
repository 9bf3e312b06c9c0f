//! # Solstice Core
//!
//! Seasonal day-length cycle for a host weather simulation.
//!
//! This crate provides:
//! - A sorted piecewise-linear interpolator
//! - Linear seasonal curves for dawn, sunrise, sunset, dusk and sun angle
//! - Cycle scheduling from the host day counter to seasonal strength
//! - Rewriting and restoring the host's time-of-day keyframes
//! - Cycle settings, their persisted blob and menu visibility
//! - Lighting, temperature and sun-transform hook points
//! - The HUD time-of-day dial

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod curve;
pub mod cycle;
pub mod hooks;
pub mod interpolator;
pub mod keyframes;
pub mod settings;
pub mod shared;
pub mod solstice;
pub mod time_widget;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::curve::*;
    pub use crate::cycle::*;
    pub use crate::hooks::*;
    pub use crate::interpolator::*;
    pub use crate::keyframes::*;
    pub use crate::settings::*;
    pub use crate::shared::*;
    pub use crate::solstice::*;
    pub use crate::time_widget::*;
}

pub use prelude::*;
