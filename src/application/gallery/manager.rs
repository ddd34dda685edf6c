// SPDX-License-Identifier: MPL-2.0
//! Mockup gallery manager.
//!
//! [`GalleryManager`] owns the cached mockup list of one project, mediates
//! uploads and removals against the object and metadata stores, and drives
//! the carousel cursor over the list.
//!
//! # Consistency
//!
//! The in-memory list only changes after the stores confirm an operation.
//! Two windows are knowingly left open:
//!
//! - a multi-file upload that fails part-way keeps the files that did
//!   succeed in the stores (the cached list is not updated; a
//!   [`refresh`](GalleryManager::refresh) shows them)
//! - a removal whose row deletion fails after the object was deleted
//!   leaves a row pointing at a missing object

use super::key_clock::KeyClock;
use super::phase::{lock, BusyGuard, GalleryPhase, HasPhase};
use crate::application::port::{MetadataStore, ObjectStore, StoreError};
use crate::application::query::GalleryView;
use crate::domain::gallery::Carousel;
use crate::domain::mockup::{
    sort_by_upload_time, storage_key, CandidateFile, MaxImages, Mockup, MockupId, NewMockup,
    ProjectId, UploadSelection,
};
use crate::error::{Error, Result};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Mutable part of a gallery, guarded by one mutex.
#[derive(Debug)]
struct GalleryState {
    project: ProjectId,
    mockups: Carousel<Mockup>,
    phase: GalleryPhase,
}

impl HasPhase for GalleryState {
    fn phase_mut(&mut self) -> &mut GalleryPhase {
        &mut self.phase
    }
}

/// Gallery of mockups for one project.
///
/// All methods take `&self`; the state mutex is only held for short,
/// synchronous sections and never across a store call. Mutating operations
/// (`load`, `upload`, `remove`) are serialized by a busy-guard: while one
/// runs, the others fail with [`Error::Busy`].
pub struct GalleryManager<O: ?Sized, M: ?Sized> {
    objects: Arc<O>,
    metadata: Arc<M>,
    state: Mutex<GalleryState>,
    key_clock: KeyClock,
}

impl<O, M> GalleryManager<O, M>
where
    O: ObjectStore + ?Sized,
    M: MetadataStore + ?Sized,
{
    /// Creates an empty gallery for `project` without contacting the stores.
    pub fn new(project: ProjectId, objects: Arc<O>, metadata: Arc<M>) -> Self {
        Self {
            objects,
            metadata,
            state: Mutex::new(GalleryState {
                project,
                mockups: Carousel::new(),
                phase: GalleryPhase::Idle,
            }),
            key_clock: KeyClock::new(),
        }
    }

    /// Creates a gallery and performs the first load.
    ///
    /// # Errors
    ///
    /// Returns the store error if the initial load fails.
    pub async fn open(project: ProjectId, objects: Arc<O>, metadata: Arc<M>) -> Result<Self> {
        let gallery = Self::new(project, objects, metadata);
        gallery.load().await?;
        Ok(gallery)
    }

    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Refetches the project's mockups and replaces the cached list.
    ///
    /// The list is sorted by `uploaded_at` ascending whatever order the
    /// store returns. The cursor is kept when still in range.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Busy`] if another operation is running, or with
    /// the store error if the query fails (the cached list is kept).
    pub async fn load(&self) -> Result<usize> {
        let _busy = BusyGuard::acquire(&self.state, GalleryPhase::Loading)?;
        self.fetch(self.project()).await
    }

    /// Reloads the current project. Same as [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub async fn refresh(&self) -> Result<usize> {
        self.load().await
    }

    /// Points the gallery at another project and loads its mockups.
    ///
    /// Switching to the current project is a no-op. Otherwise the cached
    /// list is cleared before the fetch, so a failed load never shows the
    /// previous project's images.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Busy`] if an operation is running, or with the
    /// store error if the fetch fails.
    pub async fn switch_project(&self, project: ProjectId) -> Result<usize> {
        let _busy = BusyGuard::acquire(&self.state, GalleryPhase::Loading)?;
        {
            let mut state = lock(&self.state);
            if state.project == project {
                return Ok(state.mockups.len());
            }
            info!(from = %state.project, to = %project, "switching gallery project");
            state.project = project.clone();
            state.mockups = Carousel::new();
        }
        self.fetch(project).await
    }

    /// Replaces the cached list with `project`'s rows. Caller holds the
    /// busy-guard.
    async fn fetch(&self, project: ProjectId) -> Result<usize> {
        let mut rows = self.metadata.select_by_project(&project).await?;
        sort_by_upload_time(&mut rows);
        let count = rows.len();

        lock(&self.state).mockups.replace(rows);
        debug!(project = %project, count, "loaded mockups");
        Ok(count)
    }

    /// Uploads the acceptable part of `files` and appends the new mockups.
    ///
    /// Files whose declared type is not PNG or JPEG are dropped, and the rest
    /// is truncated to the slots left under `max_images`. If nothing is left
    /// no store is contacted and an empty list is returned.
    ///
    /// Each accepted file is written to the object store and then recorded
    /// in the metadata table; all files proceed concurrently. New mockups are
    /// appended in completion order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Busy`] if another operation is running. If any
    /// file fails, waits for the others to settle and returns the first
    /// error; files that succeeded stay in the stores but the cached list is
    /// left unchanged.
    pub async fn upload(
        &self,
        files: Vec<CandidateFile>,
        max_images: MaxImages,
    ) -> Result<Vec<Mockup>> {
        let _busy = BusyGuard::acquire(&self.state, GalleryPhase::Uploading)?;

        let (project, current_count) = {
            let state = lock(&self.state);
            (state.project.clone(), state.mockups.len())
        };

        let selection = UploadSelection::select(files, max_images, current_count);
        if selection.dropped() > 0 {
            debug!(
                project = %project,
                rejected_type = selection.rejected_type,
                over_capacity = selection.over_capacity,
                "dropped files from upload"
            );
        }
        if selection.is_empty() {
            return Ok(Vec::new());
        }

        let requested = selection.accepted.len();
        let mut pending: FuturesUnordered<_> = selection
            .accepted
            .into_iter()
            .map(|file| {
                let key = storage_key(&project, self.key_clock.stamp(), &file.name);
                self.store_one(project.clone(), key, file)
            })
            .collect();

        let mut created = Vec::with_capacity(requested);
        let mut first_error: Option<StoreError> = None;
        while let Some(result) = pending.next().await {
            match result {
                Ok(mockup) => created.push(mockup),
                Err(err) => {
                    warn!(project = %project, error = %err, "mockup upload failed");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            if !created.is_empty() {
                warn!(
                    project = %project,
                    persisted = created.len(),
                    requested,
                    "partial upload left persisted mockups outside the cached list"
                );
            }
            return Err(err.into());
        }

        lock(&self.state).mockups.extend(created.iter().cloned());
        info!(project = %project, count = created.len(), "uploaded mockups");
        Ok(created)
    }

    /// Removes a mockup from both stores and from the cached list.
    ///
    /// The object is deleted first; the row is only deleted once that
    /// succeeded. The cursor is re-clamped afterwards.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Busy`] if another operation is running,
    /// [`Error::MockupNotFound`] if `id` is not in the cached list (no store
    /// is contacted), or the store error of the failing step.
    pub async fn remove(&self, id: &MockupId) -> Result<Mockup> {
        let _busy = BusyGuard::acquire(&self.state, GalleryPhase::Removing)?;

        let target = {
            let state = lock(&self.state);
            state
                .mockups
                .position(|m| &m.id == id)
                .and_then(|index| state.mockups.get(index))
                .cloned()
                .ok_or_else(|| Error::MockupNotFound(id.clone()))?
        };

        self.objects
            .delete(std::slice::from_ref(&target.file_path))
            .await?;

        if let Err(err) = self.metadata.delete_by_id(&target.id).await {
            warn!(
                id = %target.id,
                file_path = %target.file_path,
                error = %err,
                "object deleted but metadata row remains"
            );
            return Err(err.into());
        }

        let mut state = lock(&self.state);
        if let Some(index) = state.mockups.position(|m| m.id == target.id) {
            state.mockups.remove(index);
        }
        info!(id = %target.id, remaining = state.mockups.len(), "removed mockup");
        Ok(target)
    }

    /// Removes the mockup under the cursor.
    ///
    /// Returns `Ok(None)` on an empty gallery.
    ///
    /// # Errors
    ///
    /// See [`remove`](Self::remove).
    pub async fn remove_current(&self) -> Result<Option<Mockup>> {
        let Some(current) = self.current() else {
            return Ok(None);
        };
        self.remove(&current.id).await.map(Some)
    }

    async fn store_one(
        &self,
        project: ProjectId,
        key: String,
        file: CandidateFile,
    ) -> std::result::Result<Mockup, StoreError> {
        let file_size = file.size();
        let content_type = file
            .image_mime()
            .map_or(file.declared_type.as_str(), |mime| mime.as_str())
            .to_string();

        let file_path = self.objects.put(&key, file.bytes, &content_type).await?;
        self.metadata
            .insert(NewMockup {
                project_id: project,
                file_name: file.name,
                file_path,
                file_size: Some(file_size),
                mime_type: Some(file.declared_type),
            })
            .await
    }

    // =========================================================================
    // Carousel
    // =========================================================================

    /// Advances the cursor with wrap-around. `None` on an empty gallery.
    pub fn next(&self) -> Option<Mockup> {
        lock(&self.state).mockups.next().cloned()
    }

    /// Moves the cursor back with wrap-around. `None` on an empty gallery.
    pub fn previous(&self) -> Option<Mockup> {
        lock(&self.state).mockups.previous().cloned()
    }

    /// Puts the cursor on `index` (thumbnail click). Ignores bad indices.
    pub fn select(&self, index: usize) -> bool {
        lock(&self.state).mockups.select(index)
    }

    /// Returns the mockup under the cursor.
    pub fn current(&self) -> Option<Mockup> {
        lock(&self.state).mockups.current().cloned()
    }

    /// Returns the cursor (`0` when empty).
    pub fn current_index(&self) -> usize {
        lock(&self.state).mockups.current_index()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Maps a storage key to its public URL. No store round trip.
    pub fn display_url(&self, file_path: &str) -> String {
        self.objects.public_url(file_path)
    }

    /// Returns the current project.
    pub fn project(&self) -> ProjectId {
        lock(&self.state).project.clone()
    }

    /// Returns a copy of the cached list, oldest first.
    pub fn mockups(&self) -> Vec<Mockup> {
        lock(&self.state).mockups.items().to_vec()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).mockups.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).mockups.is_empty()
    }

    pub fn phase(&self) -> GalleryPhase {
        lock(&self.state).phase
    }

    pub fn is_uploading(&self) -> bool {
        self.phase() == GalleryPhase::Uploading
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == GalleryPhase::Loading
    }

    /// Returns `true` while any operation is in flight.
    pub fn is_busy(&self) -> bool {
        !self.phase().is_idle()
    }

    /// Builds a render snapshot of the gallery.
    pub fn view(&self, max_images: MaxImages) -> GalleryView {
        let state = lock(&self.state);
        GalleryView::build(
            &state.mockups,
            max_images,
            state.phase,
            |path| self.objects.public_url(path),
        )
    }
}

impl<O: ?Sized, M: ?Sized> std::fmt::Debug for GalleryManager<O, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("GalleryManager")
            .field("project", &state.project)
            .field("count", &state.mockups.len())
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}
