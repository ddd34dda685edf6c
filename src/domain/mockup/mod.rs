// SPDX-License-Identifier: MPL-2.0
//! Mockup domain types.
//!
//! - [`types`]: stored records ([`Mockup`], [`NewMockup`]) and identifiers
//! - [`upload`]: type filter, capacity limit and storage key rules

pub mod types;
pub mod upload;

pub use types::{sort_by_upload_time, Mockup, MockupId, NewMockup, ProjectId};
pub use upload::{capacity_bounds, storage_key, CandidateFile, ImageMime, MaxImages, UploadSelection};
