// SPDX-License-Identifier: MPL-2.0
//! Render snapshot of a gallery.
//!
//! [`GalleryView`] carries everything the upload panel needs to draw itself
//! (capacity badge, main preview, navigation arrows, thumbnail strip)
//! without access to the manager or the stores.

use crate::application::gallery::GalleryPhase;
use crate::domain::gallery::Carousel;
use crate::domain::mockup::{MaxImages, Mockup, MockupId};

/// The mockup shown in the main preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentMockup {
    pub id: MockupId,
    pub file_name: String,
    pub url: String,
}

/// One entry of the thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub id: MockupId,
    pub url: String,
    /// Whether this thumbnail is under the cursor.
    pub selected: bool,
}

/// Snapshot of a gallery for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub count: usize,
    pub max_images: usize,
    pub current_index: usize,
    pub current: Option<CurrentMockup>,
    pub thumbnails: Vec<Thumbnail>,
    /// Previous/next arrows and the thumbnail strip only show with more
    /// than one image.
    pub show_navigation: bool,
    pub phase: GalleryPhase,
}

impl GalleryView {
    /// Builds a snapshot, resolving display URLs with `url_for`.
    pub fn build(
        mockups: &Carousel<Mockup>,
        max_images: MaxImages,
        phase: GalleryPhase,
        url_for: impl Fn(&str) -> String,
    ) -> Self {
        let current_index = mockups.current_index();
        let thumbnails = mockups
            .items()
            .iter()
            .enumerate()
            .map(|(index, mockup)| Thumbnail {
                index,
                id: mockup.id.clone(),
                url: url_for(&mockup.file_path),
                selected: index == current_index,
            })
            .collect();
        let current = mockups.current().map(|mockup| CurrentMockup {
            id: mockup.id.clone(),
            file_name: mockup.file_name.clone(),
            url: url_for(&mockup.file_path),
        });

        Self {
            count: mockups.len(),
            max_images: max_images.value(),
            current_index,
            current,
            thumbnails,
            show_navigation: mockups.len() > 1,
            phase,
        }
    }

    /// Capacity badge text, e.g. `"3/10 images"`.
    #[must_use]
    pub fn capacity_label(&self) -> String {
        format!("{}/{} images", self.count, self.max_images)
    }

    /// Position text under the preview, e.g. `"2 of 5"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        if self.count == 0 {
            "No images".to_string()
        } else {
            format!("{} of {}", self.current_index + 1, self.count)
        }
    }

    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.max_images.saturating_sub(self.count)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remaining_capacity() == 0
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.phase == GalleryPhase::Uploading
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == GalleryPhase::Loading
    }

    /// The picker and delete controls are disabled while this is `true`.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.phase.is_idle()
    }
}
