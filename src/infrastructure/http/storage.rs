// SPDX-License-Identifier: MPL-2.0
//! Object storage over the backend's `/storage/v1` API.

use super::{map_reqwest_error, HttpBackend};
use crate::application::port::{ObjectStore, StoreResult};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

/// Bucket of the hosted object store.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    backend: HttpBackend,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key", default)]
    key: Option<String>,
}

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

impl HttpObjectStore {
    pub fn new(backend: HttpBackend, bucket: impl Into<String>) -> Self {
        Self {
            backend,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// `{base}/storage/v1/object/{bucket}/{key}`
    fn object_url(&self, key: &str) -> Url {
        self.backend.endpoint(
            ["storage", "v1", "object", self.bucket.as_str()]
                .into_iter()
                .chain(key.split('/')),
        )
    }

    /// Strips the bucket prefix the upload response puts on keys.
    fn relative_key(&self, returned: &str) -> String {
        returned
            .strip_prefix(self.bucket.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(returned)
            .to_string()
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String> {
        let request = self
            .backend
            .request(Method::POST, self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes);

        let response = self.backend.send(request).await?;
        let body: UploadResponse = self
            .backend
            .guarded(async { response.json().await.map_err(map_reqwest_error) })
            .await?;

        let stored = body
            .key
            .map_or_else(|| key.to_string(), |returned| self.relative_key(&returned));
        tracing::debug!(bucket = %self.bucket, key = %stored, "stored object");
        Ok(stored)
    }

    async fn delete(&self, keys: &[String]) -> StoreResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let url = self
            .backend
            .endpoint(["storage", "v1", "object", self.bucket.as_str()]);
        let request = self
            .backend
            .request(Method::DELETE, url)
            .json(&RemoveRequest { prefixes: keys });

        self.backend.send(request).await?;
        tracing::debug!(bucket = %self.bucket, count = keys.len(), "deleted objects");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        self.backend
            .endpoint(
                ["storage", "v1", "object", "public", self.bucket.as_str()]
                    .into_iter()
                    .chain(key.split('/')),
            )
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store() -> HttpObjectStore {
        let backend = HttpBackend::new("https://demo.example.co", "anon", Duration::from_secs(5))
            .expect("valid backend");
        HttpObjectStore::new(backend, "project-mockups")
    }

    #[test]
    fn public_url_follows_storage_convention() {
        assert_eq!(
            store().public_url("rms/1700000000000_home.png"),
            "https://demo.example.co/storage/v1/object/public/project-mockups/rms/1700000000000_home.png"
        );
    }

    #[test]
    fn public_url_is_deterministic_and_encoded() {
        let store = store();
        let first = store.public_url("rms/1_home screen#2.png");
        assert_eq!(first, store.public_url("rms/1_home screen#2.png"));
        assert!(first.ends_with("/rms/1_home%20screen%232.png"));
    }

    #[test]
    fn object_url_keeps_key_separators() {
        assert_eq!(
            store().object_url("rms/1_a.png").as_str(),
            "https://demo.example.co/storage/v1/object/project-mockups/rms/1_a.png"
        );
    }

    #[test]
    fn relative_key_strips_bucket_prefix() {
        let store = store();
        assert_eq!(store.relative_key("project-mockups/rms/1_a.png"), "rms/1_a.png");
        assert_eq!(store.relative_key("rms/1_a.png"), "rms/1_a.png");
    }

    #[test]
    fn remove_request_serializes_prefixes() {
        let keys = vec!["rms/1_a.png".to_string()];
        let json = serde_json::to_string(&RemoveRequest { prefixes: &keys }).expect("serialize");
        assert_eq!(json, r#"{"prefixes":["rms/1_a.png"]}"#);
    }
}
