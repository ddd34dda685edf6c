// SPDX-License-Identifier: MPL-2.0
//! Default values for configuration settings.
//!
//! Gallery capacity bounds live with [`MaxImages`](crate::domain::mockup::MaxImages)
//! in `domain::mockup::capacity_bounds`.

// ==========================================================================
// Backend Defaults
// ==========================================================================

/// Storage bucket holding mockup images.
pub const DEFAULT_BUCKET: &str = "project-mockups";

/// Metadata table holding mockup rows.
pub const DEFAULT_TABLE: &str = "project_mockups";

/// Per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
