// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Hosted backend over HTTP (object storage and metadata table)
//! - [`memory`]: In-process stores for tests and offline use

pub mod http;
pub mod memory;

pub use http::{connect, CancelHandle, HttpBackend, HttpMetadataStore, HttpObjectStore};
pub use memory::{InMemoryMetadataStore, InMemoryObjectStore};
