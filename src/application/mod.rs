// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`gallery`]: The gallery manager (upload, remove, load, carousel)
//! - [`query`]: Read-only snapshots for rendering
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use mockup_gallery::application::gallery::GalleryManager;
//! use mockup_gallery::domain::mockup::{MaxImages, ProjectId};
//!
//! let gallery = GalleryManager::open(project, objects, metadata).await?;
//! gallery.upload(files, MaxImages::default()).await?;
//! let view = gallery.view(MaxImages::default());
//! ```

pub mod gallery;
pub mod port;
pub mod query;
