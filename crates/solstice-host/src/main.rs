//! # Solstice
//!
//! Runs the seasonal cycle against a simulated weather system: applies the
//! configured settings, advances the calendar day by day and logs the
//! resulting schedule, then saves and reloads the settings slot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use solstice_core::WeatherSystemHandle;
use solstice_host::{FileSlotStore, HostConfig, SimulatedWeatherSystem, SolsticeHost};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    let config = HostConfig::load();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_filter))?)
        .init();

    let store = FileSlotStore::new(config.resolved_save_dir());
    info!("Save directory: {}", store.save_dir().display());

    let mut weather = SimulatedWeatherSystem::new(0, 12.0);
    let mut host = SolsticeHost::new(store, config.rng());
    host.on_weather_system_init(&weather);
    host.on_settings_confirmed(config.choices(), &mut weather)?;

    for _ in 0..config.simulate_days {
        weather.advance_hours(24.0);
        host.on_tick(&mut weather)?;

        let times = weather.keyframe_times();
        info!(
            "Day {:>4}: sunrise {:05.2}, sunset {:05.2}, sun angle {:5.1}, brightness {:.2}, temperature {:+.1}",
            weather.day_counter(),
            times[1],
            times[5],
            weather.sun_angle(),
            host.brightness_multiplier(),
            host.temperature_offset()
        );
    }

    host.on_save(&config.slot)?;
    host.on_load(&config.slot, &mut weather)?;
    info!(
        "Reloaded slot {}: enabled {}, offset {}",
        config.slot,
        host.enabled(),
        host.solstice().settings().cycle_offset
    );

    Ok(())
}
