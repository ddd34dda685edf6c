// SPDX-License-Identifier: MPL-2.0
//! In-memory store adapters.
//!
//! [`InMemoryObjectStore`] and [`InMemoryMetadataStore`] keep everything in
//! process. They follow the same contracts as the HTTP adapters (no
//! overwrite on put, rows ordered by upload time) and can be told to fail
//! upcoming calls, which makes them the stores of choice for tests and
//! offline demos.

use crate::application::port::{MetadataStore, ObjectStore, StoreError, StoreResult};
use crate::domain::mockup::{sort_by_upload_time, Mockup, MockupId, NewMockup, ProjectId};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn injected(operation: &str) -> StoreError {
    StoreError::Status {
        status: 500,
        message: format!("injected {operation} failure"),
    }
}

/// Countdown of calls that should fail.
#[derive(Debug, Default)]
struct FailNext(AtomicUsize);

impl FailNext {
    fn arm(&self, count: usize) {
        self.0.store(count, Ordering::SeqCst);
    }

    /// Consumes one armed failure, if any.
    fn take(&self) -> bool {
        self.0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

// =============================================================================
// InMemoryObjectStore
// =============================================================================

/// Stored object bytes and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object store backed by a `HashMap`.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    public_base: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_puts: FailNext,
    fail_put_keys: Mutex<Vec<String>>,
    fail_deletes: FailNext,
    put_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryObjectStore {
    /// Creates an empty store whose public URLs start with `public_base`.
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_string(),
            objects: Mutex::new(HashMap::new()),
            fail_puts: FailNext::default(),
            fail_put_keys: Mutex::new(Vec::new()),
            fail_deletes: FailNext::default(),
            put_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Makes the next `count` puts fail.
    pub fn fail_next_puts(&self, count: usize) {
        self.fail_puts.arm(count);
    }

    /// Makes every put whose key contains `fragment` fail.
    pub fn fail_puts_containing(&self, fragment: impl Into<String>) {
        lock(&self.fail_put_keys).push(fragment.into());
    }

    /// Makes the next `count` deletes fail.
    pub fn fail_next_deletes(&self, count: usize) {
        self.fail_deletes.arm(count);
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.objects).contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        lock(&self.objects).get(key).cloned()
    }

    /// Returns all stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = lock(&self.objects).keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.objects).is_empty()
    }

    /// Number of `put` calls received, failed ones included.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls received, failed ones included.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let key_blocked = lock(&self.fail_put_keys)
            .iter()
            .any(|fragment| key.contains(fragment.as_str()));
        if self.fail_puts.take() || key_blocked {
            return Err(injected("put"));
        }

        let mut objects = lock(&self.objects);
        if objects.contains_key(key) {
            return Err(StoreError::Status {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(key.to_string())
    }

    async fn delete(&self, keys: &[String]) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.take() {
            return Err(injected("delete"));
        }
        let mut objects = lock(&self.objects);
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

// =============================================================================
// InMemoryMetadataStore
// =============================================================================

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Mockup>,
    last_uploaded_at: Option<DateTime<Utc>>,
}

/// Metadata table backed by a `Vec`.
///
/// Generated ids are UUID v4 strings. `uploaded_at` follows the wall clock
/// but is kept strictly increasing, so insert order and time order agree.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    table: Mutex<Table>,
    fail_inserts: FailNext,
    fail_selects: FailNext,
    fail_deletes: FailNext,
    insert_calls: AtomicUsize,
    select_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds fully formed rows as-is (ids and timestamps included).
    pub fn seed(&self, rows: impl IntoIterator<Item = Mockup>) {
        lock(&self.table).rows.extend(rows);
    }

    pub fn fail_next_inserts(&self, count: usize) {
        self.fail_inserts.arm(count);
    }

    pub fn fail_next_selects(&self, count: usize) {
        self.fail_selects.arm(count);
    }

    pub fn fail_next_deletes(&self, count: usize) {
        self.fail_deletes.arm(count);
    }

    /// Returns every row of every project.
    pub fn rows(&self) -> Vec<Mockup> {
        lock(&self.table).rows.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.table).rows.is_empty()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, row: NewMockup) -> StoreResult<Mockup> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.take() {
            return Err(injected("insert"));
        }

        let mut table = lock(&self.table);
        let now = Utc::now();
        let uploaded_at = match table.last_uploaded_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        table.last_uploaded_at = Some(uploaded_at);

        let mockup = Mockup {
            id: MockupId::new(Uuid::new_v4().to_string()),
            project_id: row.project_id,
            file_name: row.file_name,
            file_path: row.file_path,
            file_size: row.file_size,
            mime_type: row.mime_type,
            uploaded_at,
        };
        table.rows.push(mockup.clone());
        Ok(mockup)
    }

    async fn select_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Mockup>> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_selects.take() {
            return Err(injected("select"));
        }
        let mut rows: Vec<_> = lock(&self.table)
            .rows
            .iter()
            .filter(|row| &row.project_id == project)
            .cloned()
            .collect();
        sort_by_upload_time(&mut rows);
        Ok(rows)
    }

    async fn delete_by_id(&self, id: &MockupId) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.take() {
            return Err(injected("delete"));
        }
        lock(&self.table).rows.retain(|row| &row.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> ProjectId {
        ProjectId::new(id).expect("valid project id")
    }

    fn new_row(project_id: &str, name: &str) -> NewMockup {
        NewMockup {
            project_id: project(project_id),
            file_name: name.to_string(),
            file_path: format!("{project_id}/{name}"),
            file_size: Some(10),
            mime_type: Some("image/png".to_string()),
        }
    }

    #[tokio::test]
    async fn put_refuses_to_overwrite() {
        let store = InMemoryObjectStore::new("https://cdn.test/");
        store.put("a/1.png", vec![1], "image/png").await.expect("first put");
        let second = store.put("a/1.png", vec![2], "image/png").await;
        assert!(matches!(second, Err(StoreError::Status { status: 409, .. })));
        assert_eq!(store.get("a/1.png").map(|o| o.bytes), Some(vec![1]));
    }

    #[tokio::test]
    async fn public_url_joins_base_and_key() {
        let store = InMemoryObjectStore::new("https://cdn.test/");
        assert_eq!(store.public_url("a/1.png"), "https://cdn.test/a/1.png");
    }

    #[tokio::test]
    async fn armed_failures_are_consumed_in_order() {
        let store = InMemoryObjectStore::new("https://cdn.test");
        store.fail_next_puts(1);
        assert!(store.put("k1", vec![], "image/png").await.is_err());
        assert!(store.put("k2", vec![], "image/png").await.is_ok());
        assert_eq!(store.put_calls(), 2);
        assert_eq!(store.keys(), ["k2"]);
    }

    #[tokio::test]
    async fn fail_puts_containing_targets_matching_keys() {
        let store = InMemoryObjectStore::new("https://cdn.test");
        store.fail_puts_containing("bad");
        assert!(store.put("p/1_bad.png", vec![], "image/png").await.is_err());
        assert!(store.put("p/2_good.png", vec![], "image/png").await.is_ok());
    }

    #[tokio::test]
    async fn delete_ignores_missing_keys() {
        let store = InMemoryObjectStore::new("https://cdn.test");
        store.put("k", vec![], "image/png").await.expect("put");
        store
            .delete(&["k".to_string(), "missing".to_string()])
            .await
            .expect("delete");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_ids_and_increasing_timestamps() {
        let store = InMemoryMetadataStore::new();
        let first = store.insert(new_row("rms", "a.png")).await.expect("insert");
        let second = store.insert(new_row("rms", "b.png")).await.expect("insert");
        assert_ne!(first.id, second.id);
        assert!(second.uploaded_at > first.uploaded_at);
    }

    #[tokio::test]
    async fn select_filters_by_project() {
        let store = InMemoryMetadataStore::new();
        store.insert(new_row("rms", "a.png")).await.expect("insert");
        store.insert(new_row("other", "b.png")).await.expect("insert");

        let rows = store.select_by_project(&project("rms")).await.expect("select");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_name, "a.png");
    }

    #[tokio::test]
    async fn delete_by_id_removes_row() {
        let store = InMemoryMetadataStore::new();
        let row = store.insert(new_row("rms", "a.png")).await.expect("insert");
        store.delete_by_id(&row.id).await.expect("delete");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn armed_metadata_failures() {
        let store = InMemoryMetadataStore::new();
        store.fail_next_inserts(1);
        store.fail_next_selects(1);
        assert!(store.insert(new_row("rms", "a.png")).await.is_err());
        assert!(store.select_by_project(&project("rms")).await.is_err());
        assert!(store.select_by_project(&project("rms")).await.is_ok());
        assert_eq!(store.insert_calls(), 1);
        assert_eq!(store.select_calls(), 2);
    }
}
