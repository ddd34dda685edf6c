// SPDX-License-Identifier: MPL-2.0
//! Query services (read side).
//!
//! These types do not modify state; they give the presentation layer a
//! read-only snapshot of a gallery.
//!
//! # Available Services
//!
//! - [`view`]: Gallery render snapshot (`GalleryView`)

pub mod view;

pub use view::{CurrentMockup, GalleryView, Thumbnail};
