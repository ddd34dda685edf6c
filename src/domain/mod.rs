// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery rules without I/O.
//!
//! This module contains pure types, value objects, and business rules.
//! Nothing here talks to the network or the filesystem, so every rule can
//! be tested in isolation.
//!
//! # Modules
//!
//! - [`gallery`]: Wrap-around cursor ([`Carousel`](gallery::Carousel))
//! - [`mockup`]: Mockup records ([`Mockup`](mockup::Mockup),
//!   [`ProjectId`](mockup::ProjectId)) and the upload selection policy
//!   ([`UploadSelection`](mockup::UploadSelection), [`MaxImages`](mockup::MaxImages))

pub mod gallery;
pub mod mockup;
