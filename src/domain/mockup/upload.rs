// SPDX-License-Identifier: MPL-2.0
//! Upload selection policy.
//!
//! Decides which picked files are sent to the store: only PNG and JPEG
//! images are accepted, and the accepted set is truncated to the gallery's
//! remaining capacity. Everything else is dropped without an error; the
//! drop counts are kept on [`UploadSelection`] for callers that want them.

use super::ProjectId;
use std::path::Path;

// =============================================================================
// Capacity Bounds
// =============================================================================

/// Bounds for capacity ceilings read from settings or the command line.
///
/// [`MaxImages::new`] does not apply them; see [`MaxImages::bounded`].
pub mod capacity_bounds {
    /// Smallest configurable capacity ceiling.
    pub const MIN_IMAGES: usize = 1;
    /// Largest configurable capacity ceiling.
    pub const MAX_IMAGES: usize = 50;
    /// Default ceiling used by the upload picker.
    pub const DEFAULT_IMAGES: usize = 10;
}

// =============================================================================
// ImageMime
// =============================================================================

/// Image media types a gallery accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Png,
    Jpeg,
}

impl ImageMime {
    /// Parses a declared media type.
    ///
    /// Accepts `image/png`, `image/jpeg` and the `image/jpg` alias some
    /// browsers report. Anything else, including other `image/*` types,
    /// returns `None`.
    #[must_use]
    pub fn from_declared(declared: &str) -> Option<Self> {
        if !declared.starts_with("image/") {
            return None;
        }
        match declared {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Guesses the media type from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Canonical media type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

// =============================================================================
// MaxImages
// =============================================================================

/// Capacity ceiling of a gallery.
///
/// A ceiling of `0` accepts no uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxImages(usize);

impl MaxImages {
    /// Creates a ceiling of exactly `value` images.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// Creates a ceiling from user input, clamped to
    /// [`MIN_IMAGES`](capacity_bounds::MIN_IMAGES)..=[`MAX_IMAGES`](capacity_bounds::MAX_IMAGES).
    #[must_use]
    pub fn bounded(value: usize) -> Self {
        Self(value.clamp(capacity_bounds::MIN_IMAGES, capacity_bounds::MAX_IMAGES))
    }

    /// Returns the raw ceiling.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Slots left for a gallery that already holds `current` images.
    #[must_use]
    pub fn remaining(self, current: usize) -> usize {
        self.0.saturating_sub(current)
    }
}

impl Default for MaxImages {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT_IMAGES)
    }
}

// =============================================================================
// CandidateFile
// =============================================================================

/// A file offered by the picker, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Original client-side name.
    pub name: String,
    /// Media type declared by the client (browser, extension lookup, ...).
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Parsed media type, if the file is an accepted image.
    #[must_use]
    pub fn image_mime(&self) -> Option<ImageMime> {
        ImageMime::from_declared(&self.declared_type)
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> i64 {
        i64::try_from(self.bytes.len()).unwrap_or(i64::MAX)
    }
}

// =============================================================================
// UploadSelection
// =============================================================================

/// Outcome of applying the type filter and capacity limit to a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSelection {
    /// Files that will be uploaded, in submission order.
    pub accepted: Vec<CandidateFile>,
    /// Files dropped because their type is not PNG or JPEG.
    pub rejected_type: usize,
    /// Valid files dropped because the gallery ran out of slots.
    pub over_capacity: usize,
}

impl UploadSelection {
    /// Filters `files` for a gallery currently holding `current_count` images.
    #[must_use]
    pub fn select(files: Vec<CandidateFile>, max_images: MaxImages, current_count: usize) -> Self {
        let total = files.len();
        let mut accepted: Vec<CandidateFile> = files
            .into_iter()
            .filter(|file| file.image_mime().is_some())
            .collect();
        let rejected_type = total - accepted.len();

        let slots = max_images.remaining(current_count);
        let over_capacity = accepted.len().saturating_sub(slots);
        accepted.truncate(slots);

        Self {
            accepted,
            rejected_type,
            over_capacity,
        }
    }

    /// Returns `true` when nothing is left to upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Total number of dropped files.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.rejected_type + self.over_capacity
    }
}

/// Builds the storage key `{project}/{stamp_ms}_{file_name}`.
///
/// The stamp disambiguates same-named files within one project.
#[must_use]
pub fn storage_key(project: &ProjectId, stamp_ms: i64, file_name: &str) -> String {
    format!("{}/{}_{}", project.as_str(), stamp_ms, file_name)
}
