//! Host integration layer.
//!
//! `SolsticeHost` is what the game calls at its lifecycle moments: settings
//! confirmation, save/load, weather-system init, the per-day tick, new-game
//! reset and console input. It owns the `Solstice` context, the save-slot
//! store and the HUD dial.

use solstice_common::{ModVersion, SolsticeError};
use glam::Vec3;
use solstice_core::{
    compute_visibility, LightingState, SettingsChoices, SettingsVisibility, Solstice,
    TimeWidgetDial, WeatherSystemHandle, SETTINGS_FILE_NAME,
};
use tracing::{error, info};

use crate::console::{self, CommandResult, ConsoleCommand};
use crate::error::HostResult;
use crate::slot_store::SlotStore;

/// Default HUD dial icon radii.
const DEFAULT_SUN_RADIUS: f32 = 40.0;
const DEFAULT_MOON_RADIUS: f32 = 34.0;

/// Game-facing entry points for the seasonal cycle.
#[derive(Debug)]
pub struct SolsticeHost<S: SlotStore> {
    solstice: Solstice,
    store: S,
    choices: SettingsChoices,
    rng: fastrand::Rng,
    dial: TimeWidgetDial,
}

impl<S: SlotStore> SolsticeHost<S> {
    /// Create the integration with a disabled cycle.
    pub fn new(store: S, rng: fastrand::Rng) -> Self {
        info!("Version {}", ModVersion::current());

        Self {
            solstice: Solstice::new(),
            store,
            choices: SettingsChoices::default(),
            rng,
            dial: TimeWidgetDial::new(DEFAULT_SUN_RADIUS, DEFAULT_MOON_RADIUS),
        }
    }

    /// The seasonal cycle context.
    #[must_use]
    pub fn solstice(&self) -> &Solstice {
        &self.solstice
    }

    /// The save-slot store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The HUD time-of-day dial.
    #[must_use]
    pub fn time_widget(&self) -> &TimeWidgetDial {
        &self.dial
    }

    /// Last confirmed settings-menu choices.
    #[must_use]
    pub fn choices(&self) -> &SettingsChoices {
        &self.choices
    }

    /// Settings-menu field visibility for in-progress choices.
    #[must_use]
    pub fn visibility(choices: &SettingsChoices) -> SettingsVisibility {
        compute_visibility(choices)
    }

    /// Whether the cycle is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.solstice.enabled()
    }

    /// Daytime light multiplier.
    #[must_use]
    pub fn brightness_multiplier(&self) -> f32 {
        self.solstice.brightness_multiplier()
    }

    /// Temperature bias.
    #[must_use]
    pub fn temperature_offset(&self) -> f32 {
        self.solstice.temperature_offset()
    }

    /// The weather system was created.
    pub fn on_weather_system_init<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &H) {
        self.solstice.init(handle);
    }

    /// The settings menu was confirmed.
    pub fn on_settings_confirmed<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        choices: SettingsChoices,
        handle: &mut H,
    ) -> HostResult<()> {
        self.choices = choices;
        self.solstice
            .apply_settings(&choices, &mut self.rng, handle)?;
        self.refresh_dial(handle);
        Ok(())
    }

    /// A save slot is being loaded.
    ///
    /// Unusable settings data leaves the cycle disabled; the error is logged
    /// and returned.
    pub fn on_load<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        slot: &str,
        handle: &mut H,
    ) -> HostResult<()> {
        let blob = self.store.load_slot_blob(slot, SETTINGS_FILE_NAME)?;
        if let Err(e) = self.solstice.load_data(blob.as_deref(), handle) {
            if matches!(e, SolsticeError::Configuration(_)) {
                error!("Saved settings in slot {slot} are unusable: {e}");
            }
            return Err(e.into());
        }
        self.refresh_dial(handle);
        Ok(())
    }

    /// A save slot is being written.
    pub fn on_save(&mut self, slot: &str) -> HostResult<()> {
        let blob = self.solstice.save_data()?;
        self.store.save_slot_blob(slot, SETTINGS_FILE_NAME, &blob)
    }

    /// Per-day tick from the weather system.
    pub fn on_tick<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &mut H) -> HostResult<()> {
        self.solstice.update(handle)?;
        self.refresh_dial(handle);
        Ok(())
    }

    /// Game statistics were reset for a new game.
    ///
    /// Outside custom mode the seasonal cycle is not offered, so it is
    /// switched off.
    pub fn on_stats_reset<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        custom_mode: bool,
        handle: &mut H,
    ) -> HostResult<()> {
        if custom_mode {
            return Ok(());
        }
        self.disable(handle)
    }

    /// Turn the cycle off and restore the host schedule.
    pub fn disable<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &mut H) -> HostResult<()> {
        self.solstice.disable(handle)?;
        self.refresh_dial(handle);
        Ok(())
    }

    /// Lighting hook: scale daytime lighting.
    pub fn on_lighting_blended<H: WeatherSystemHandle + ?Sized>(
        &self,
        handle: &H,
        lighting: &mut LightingState,
    ) -> bool {
        solstice_core::apply_brightness(&self.solstice, handle, lighting)
    }

    /// Temperature hook: bias a generated high or low.
    #[must_use]
    pub fn on_temperature_generated(&self, temperature: f32) -> f32 {
        solstice_core::adjust_temperature(&self.solstice, temperature)
    }

    /// Sun transform hook: forward vector for the sun light.
    ///
    /// `None` while disabled, leaving the host's own transform in place.
    #[must_use]
    pub fn on_sun_transform<H: WeatherSystemHandle + ?Sized>(&self, handle: &H) -> Option<Vec3> {
        solstice_core::sun_direction(&self.solstice, handle)
    }

    /// Execute a console input line.
    pub fn run_command<H: WeatherSystemHandle + ?Sized>(
        &mut self,
        line: &str,
        handle: &mut H,
    ) -> CommandResult {
        let command = match ConsoleCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return CommandResult::ok(""),
            Err(msg) => return CommandResult::err(msg),
        };

        match command {
            ConsoleCommand::Help(topic) => console::help(topic.as_deref()),
            ConsoleCommand::SolsticeDay(day) => {
                if let Err(e) = self.solstice.set_forced_day(day, handle) {
                    return CommandResult::err(e.to_string());
                }
                self.refresh_dial(handle);
                match self.solstice.forced_day() {
                    Some(day) => CommandResult::ok(format!(
                        "Cycle day pinned to {day}, strength {:.3}",
                        self.solstice.strength()
                    )),
                    None => CommandResult::ok("Cycle day follows the calendar"),
                }
            },
        }
    }

    fn refresh_dial<H: WeatherSystemHandle + ?Sized>(&mut self, handle: &H) {
        let times = handle.keyframe_times();
        let offset = handle.master_time_offset();
        self.dial.set_times(times[1] + offset, times[5] + offset);
    }
}
