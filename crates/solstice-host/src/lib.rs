//! # Solstice Host
//!
//! Host-side glue for the seasonal cycle:
//! - Save-slot persistence channel
//! - Debug console command
//! - Host configuration file
//! - Simulated weather system
//! - Game lifecycle entry points

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod console;
pub mod error;
pub mod integration;
pub mod sim;
pub mod slot_store;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use integration::SolsticeHost;
pub use sim::SimulatedWeatherSystem;
pub use slot_store::{FileSlotStore, MemorySlotStore, SlotStore};
