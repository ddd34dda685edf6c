// SPDX-License-Identifier: MPL-2.0
//! Gallery service: the stateful owner of one project's mockups.

mod key_clock;
mod manager;
mod phase;

pub use key_clock::KeyClock;
pub use manager::GalleryManager;
pub use phase::GalleryPhase;
