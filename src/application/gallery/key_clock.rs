// SPDX-License-Identifier: MPL-2.0
//! Millisecond stamps for storage keys.

use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out strictly increasing millisecond stamps.
///
/// Follows the wall clock, but never repeats a stamp: files uploaded in the
/// same millisecond get consecutive values, so same-named files in one batch
/// still land on distinct keys.
#[derive(Debug, Default)]
pub struct KeyClock {
    last: AtomicI64,
}

impl KeyClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stamp for the current wall-clock time.
    pub fn stamp(&self) -> i64 {
        self.stamp_at(chrono::Utc::now().timestamp_millis())
    }

    /// Returns `max(now_ms, last + 1)` and records it.
    pub fn stamp_at(&self, now_ms: i64) -> i64 {
        let advance = |last: i64| now_ms.max(last.saturating_add(1));
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(advance(last)))
        {
            Ok(previous) | Err(previous) => advance(previous),
        }
    }
}
