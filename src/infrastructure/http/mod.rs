// SPDX-License-Identifier: MPL-2.0
//! HTTP adapters for the hosted backend.
//!
//! The backend exposes an object storage API under `/storage/v1` and a
//! PostgREST table API under `/rest/v1`. Both authenticate with the project
//! API key, sent as `apikey` and as a bearer token.
//!
//! Every request is bounded by the configured timeout and can be aborted
//! through a [`CancelHandle`], so an unresponsive backend never keeps a
//! gallery busy forever.

mod metadata;
mod storage;

pub use metadata::HttpMetadataStore;
pub use storage::HttpObjectStore;

use crate::application::port::{StoreError, StoreResult};
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// =============================================================================
// CancelHandle
// =============================================================================

/// Aborts in-flight backend requests.
///
/// Cancelling only affects requests already running; calls started
/// afterwards use a fresh token and proceed normally.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: Arc<Mutex<CancellationToken>>,
}

impl CancelHandle {
    /// Cancels every request currently in flight.
    pub fn cancel_in_flight(&self) {
        let mut token = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
    }

    fn current(&self) -> CancellationToken {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// =============================================================================
// HttpBackend
// =============================================================================

/// Shared connection to the hosted backend.
///
/// Cheap to clone: the underlying client and cancel handle are shared.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    cancel: CancelHandle,
}

impl HttpBackend {
    /// Creates a backend connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if `base_url` is not an absolute
    /// http(s) URL or the client cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Transport(format!("invalid backend url: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(StoreError::Transport(format!(
                "backend url must be http(s): {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mockup-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            cancel: CancelHandle::default(),
        })
    }

    /// Returns a handle that aborts this backend's in-flight requests.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub(crate) fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts an authenticated request.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends a request and fails on non-success statuses.
    pub(crate) async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        self.guarded(async move {
            let response = request.send().await.map_err(map_reqwest_error)?;
            check_status(response).await
        })
        .await
    }

    /// Races `exchange` against the cancel handle.
    pub(crate) async fn guarded<T>(
        &self,
        exchange: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        let token = self.cancel.current();
        tokio::select! {
            () = token.cancelled() => Err(StoreError::Cancelled),
            result = exchange => result,
        }
    }
}

/// Opens the object and metadata stores described by `config`.
///
/// # Errors
///
/// Returns [`Error::Config`] if the URL or API key is missing, or the
/// store error if the client cannot be created.
pub fn connect(config: &BackendConfig) -> Result<(HttpObjectStore, HttpMetadataStore)> {
    let url = config
        .url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::Config("backend.url is not set".to_string()))?;
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Config("backend.api_key is not set".to_string()))?;

    let backend = HttpBackend::new(url, api_key, config.request_timeout())?;
    Ok((
        HttpObjectStore::new(backend.clone(), config.bucket()),
        HttpMetadataStore::new(backend, config.table()),
    ))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::TimedOut
    } else if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Transport(err.to_string())
    }
}

/// Error payloads of the storage and table APIs.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extracts a readable message from an error response body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body.trim().to_string(),
    }
}

async fn check_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, "anon-key", Duration::from_secs(5)).expect("valid backend")
    }

    #[test]
    fn new_rejects_non_http_urls() {
        assert!(HttpBackend::new("not a url", "k", Duration::from_secs(1)).is_err());
        assert!(HttpBackend::new("mailto:me@example.com", "k", Duration::from_secs(1)).is_err());
        assert!(HttpBackend::new("ftp://example.com", "k", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let backend = backend("https://demo.example.co/");
        let url = backend.endpoint(["storage", "v1", "object", "bucket", "my file.png"]);
        assert_eq!(
            url.as_str(),
            "https://demo.example.co/storage/v1/object/bucket/my%20file.png"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let backend = backend("https://proxy.example.com/backend");
        let url = backend.endpoint(["rest", "v1", "project_mockups"]);
        assert_eq!(url.as_str(), "https://proxy.example.com/backend/rest/v1/project_mockups");
    }

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"message":"duplicate key"}"#), "duplicate key");
        assert_eq!(error_message(r#"{"error":"Unauthorized"}"#), "Unauthorized");
        assert_eq!(error_message(" gateway timeout \n"), "gateway timeout");
    }

    #[tokio::test]
    async fn cancel_in_flight_aborts_pending_exchange() {
        let backend = backend("https://demo.example.co");
        let handle = backend.cancel_handle();

        let pending = backend.guarded(std::future::pending::<StoreResult<()>>());
        let cancel = async {
            tokio::task::yield_now().await;
            handle.cancel_in_flight();
        };
        let (result, ()) = tokio::join!(pending, cancel);
        assert_eq!(result, Err(StoreError::Cancelled));
    }

    #[tokio::test]
    async fn requests_after_cancel_use_a_fresh_token() {
        let backend = backend("https://demo.example.co");
        backend.cancel_handle().cancel_in_flight();

        let result = backend.guarded(async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn connect_requires_url_and_key() {
        let mut config = BackendConfig::default();
        assert!(matches!(connect(&config), Err(Error::Config(m)) if m.contains("url")));

        config.url = Some("https://demo.example.co".to_string());
        assert!(matches!(connect(&config), Err(Error::Config(m)) if m.contains("api_key")));

        config.api_key = Some("anon".to_string());
        assert!(connect(&config).is_ok());
    }
}
