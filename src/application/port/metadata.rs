// SPDX-License-Identifier: MPL-2.0
//! Metadata table port definition.
//!
//! This module defines the [`MetadataStore`] trait for the table of mockup
//! rows. Rows are keyed by a store-generated id and grouped by project.

use super::StoreResult;
use crate::domain::mockup::{Mockup, MockupId, NewMockup, ProjectId};
use async_trait::async_trait;

/// Port for the mockup metadata table.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for concurrent inserts.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Inserts one row and returns it with its generated `id` and
    /// `uploaded_at`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](super::StoreError) if the insert fails.
    async fn insert(&self, row: NewMockup) -> StoreResult<Mockup>;

    /// Returns all rows of `project`, ordered by `uploaded_at` ascending.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](super::StoreError) if the query fails.
    async fn select_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Mockup>>;

    /// Deletes the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](super::StoreError) if the delete fails.
    async fn delete_by_id(&self, id: &MockupId) -> StoreResult<()>;
}
