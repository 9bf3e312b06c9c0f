//! Thread-safe handle to a single `Solstice` context.
//!
//! Every mutation goes through one mutex so that "compute strength, write
//! keyframes" is observed as a single step by other holders of the handle.

use std::sync::Arc;

use parking_lot::Mutex;
use solstice_common::SolsticeResult;

use crate::keyframes::WeatherSystemHandle;
use crate::solstice::Solstice;

/// Cloneable, mutex-guarded `Solstice`.
#[derive(Debug, Clone, Default)]
pub struct SharedSolstice {
    inner: Arc<Mutex<Solstice>>,
}

impl SharedSolstice {
    /// Wrap a context.
    #[must_use]
    pub fn new(solstice: Solstice) -> Self {
        Self {
            inner: Arc::new(Mutex::new(solstice)),
        }
    }

    /// Run `f` with exclusive access to the context.
    pub fn with<R>(&self, f: impl FnOnce(&mut Solstice) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Update under the lock.
    pub fn update<H: WeatherSystemHandle + ?Sized>(&self, handle: &mut H) -> SolsticeResult<()> {
        self.inner.lock().update(handle)
    }

    /// Current brightness multiplier.
    #[must_use]
    pub fn brightness_multiplier(&self) -> f32 {
        self.inner.lock().brightness_multiplier()
    }

    /// Current temperature bias.
    #[must_use]
    pub fn temperature_offset(&self) -> f32 {
        self.inner.lock().temperature_offset()
    }

    /// Whether the cycle is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.inner.lock().enabled()
    }
}
