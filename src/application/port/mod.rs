// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, so the gallery logic stays
//! independent of the hosted backend it talks to.
//!
//! # Available Ports
//!
//! - [`storage`]: Object bucket holding image bytes
//! - [`metadata`]: Table of mockup rows
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so one store can serve concurrent uploads
//! - Methods are `async` (via `async_trait`) and return [`StoreResult`]
//! - URL resolution is synchronous and pure

pub mod error;
pub mod metadata;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use metadata::MetadataStore;
pub use storage::ObjectStore;
