// SPDX-License-Identifier: MPL-2.0
//! Core mockup records for the domain layer.
//!
//! A [`Mockup`] is one uploaded image attached to a project. It is backed by
//! a stored object (addressed by `file_path`) and a metadata row (addressed
//! by `id`). Records are created and destroyed, never edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the metadata store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockupId(String);

impl MockupId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MockupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping key for the mockups of one project card.
///
/// Guaranteed non-empty: the only constructor rejects blank input, so a
/// gallery can never issue a query for an empty project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a project id, returning `None` when the input is blank.
    ///
    /// Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "project_id must not be empty".to_string())
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One uploaded image record, as stored in the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mockup {
    pub id: MockupId,
    pub project_id: ProjectId,
    /// Original client-side file name, display only.
    pub file_name: String,
    /// Storage key of the backing object. Unique within the bucket.
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Set by the store on insert. Galleries are ordered by this field.
    pub uploaded_at: DateTime<Utc>,
}

/// Metadata row sent to the store on insert.
///
/// The store assigns `id` and `uploaded_at` and returns the full [`Mockup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMockup {
    pub project_id: ProjectId,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

/// Sorts mockups by `uploaded_at` ascending, keeping store order for ties.
pub fn sort_by_upload_time(mockups: &mut [Mockup]) {
    mockups.sort_by_key(|mockup| mockup.uploaded_at);
}
