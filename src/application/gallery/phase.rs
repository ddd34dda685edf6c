// SPDX-License-Identifier: MPL-2.0
//! Gallery state machine and busy-guard.
//!
//! A gallery is `Idle` between operations. Each operation moves it to its
//! own phase for the whole round trip; a second request arriving meanwhile
//! is rejected with [`Error::Busy`], never queued.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Phase of a gallery's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryPhase {
    #[default]
    Idle,
    Loading,
    Uploading,
    Removing,
}

impl GalleryPhase {
    /// Returns `true` when no operation is in flight.
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == GalleryPhase::Idle
    }
}

impl fmt::Display for GalleryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GalleryPhase::Idle => "idle",
            GalleryPhase::Loading => "loading",
            GalleryPhase::Uploading => "uploading",
            GalleryPhase::Removing => "removing",
        };
        f.write_str(label)
    }
}

/// Anything that carries a phase behind a mutex.
pub(crate) trait HasPhase {
    fn phase_mut(&mut self) -> &mut GalleryPhase;
}

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds a gallery in a non-idle phase; returns it to `Idle` on drop.
///
/// Also runs when the operation future is dropped mid-flight.
pub(crate) struct BusyGuard<'a, S: HasPhase> {
    state: &'a Mutex<S>,
}

impl<'a, S: HasPhase> BusyGuard<'a, S> {
    /// Moves the state from `Idle` to `phase`, or fails with `Busy`.
    pub(crate) fn acquire(state: &'a Mutex<S>, phase: GalleryPhase) -> Result<Self> {
        let mut guard = lock(state);
        let current = guard.phase_mut();
        if !current.is_idle() {
            return Err(Error::Busy);
        }
        *current = phase;
        Ok(Self { state })
    }
}

impl<S: HasPhase> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        *lock(self.state).phase_mut() = GalleryPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        phase: GalleryPhase,
    }

    impl HasPhase for Probe {
        fn phase_mut(&mut self) -> &mut GalleryPhase {
            &mut self.phase
        }
    }

    #[test]
    fn acquire_sets_phase_and_drop_restores_idle() {
        let state = Mutex::new(Probe::default());
        {
            let _guard = BusyGuard::acquire(&state, GalleryPhase::Uploading).expect("idle gallery");
            assert_eq!(lock(&state).phase, GalleryPhase::Uploading);
        }
        assert_eq!(lock(&state).phase, GalleryPhase::Idle);
    }

    #[test]
    fn second_acquire_is_rejected_while_busy() {
        let state = Mutex::new(Probe::default());
        let _guard = BusyGuard::acquire(&state, GalleryPhase::Uploading).expect("idle gallery");
        let second = BusyGuard::acquire(&state, GalleryPhase::Removing);
        assert!(matches!(second, Err(Error::Busy)));
        assert_eq!(lock(&state).phase, GalleryPhase::Uploading);
    }

    #[test]
    fn phase_display_is_lowercase() {
        assert_eq!(GalleryPhase::Removing.to_string(), "removing");
        assert!(GalleryPhase::default().is_idle());
    }
}
