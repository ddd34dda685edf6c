// SPDX-License-Identifier: MPL-2.0
//! Object storage port definition.
//!
//! This module defines the [`ObjectStore`] trait for the bucket that holds
//! mockup image bytes. Infrastructure adapters implement it.

use super::StoreResult;
use async_trait::async_trait;

/// Port for the bucket holding uploaded image bytes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: a gallery fans uploads out
/// concurrently against one shared store.
///
/// # Example
///
/// ```ignore
/// use mockup_gallery::application::port::ObjectStore;
///
/// async fn mirror(store: &impl ObjectStore, key: &str, bytes: Vec<u8>) {
///     let key = store.put(key, bytes, "image/png").await.unwrap();
///     println!("stored at {}", store.public_url(&key));
/// }
/// ```
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the key the store recorded.
    ///
    /// Existing objects are not overwritten.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](super::StoreError) if the write fails or
    /// the key is already taken.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String>;

    /// Deletes every object in `keys`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`](super::StoreError) if the backend rejects
    /// the deletion.
    async fn delete(&self, keys: &[String]) -> StoreResult<()>;

    /// Maps a stored key to a publicly fetchable URL.
    ///
    /// Pure: no network round trip, same key gives the same URL.
    fn public_url(&self, key: &str) -> String;
}
