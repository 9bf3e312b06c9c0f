//! # Solstice Common
//!
//! Shared types for the Solstice workspace:
//! - Error types and result aliases
//! - Version information reported by the host integration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::version::*;
}

pub use prelude::*;
