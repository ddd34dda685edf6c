// SPDX-License-Identifier: MPL-2.0
//! `mockup_gallery` manages per-project galleries of design mockup images.
//!
//! Images live in a hosted object store and are described by rows in a
//! metadata table. A [`GalleryManager`](application::gallery::GalleryManager)
//! filters and uploads files, removes mockups, and keeps a carousel cursor
//! over the project's images.

#![doc(html_root_url = "https://docs.rs/mockup_gallery/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
