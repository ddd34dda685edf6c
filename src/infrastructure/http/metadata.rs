// SPDX-License-Identifier: MPL-2.0
//! Mockup rows over the backend's PostgREST `/rest/v1` API.

use super::{map_reqwest_error, HttpBackend};
use crate::application::port::{MetadataStore, StoreError, StoreResult};
use crate::domain::mockup::{Mockup, MockupId, NewMockup, ProjectId};
use async_trait::async_trait;
use reqwest::{Method, Url};

/// Table of mockup rows.
#[derive(Debug, Clone)]
pub struct HttpMetadataStore {
    backend: HttpBackend,
    table: String,
}

impl HttpMetadataStore {
    pub fn new(backend: HttpBackend, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn table_url(&self) -> Url {
        self.backend.endpoint(["rest", "v1", self.table.as_str()])
    }

    /// `select=*&project_id=eq.{project}&order=uploaded_at.asc`
    fn project_rows_url(&self, project: &ProjectId) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("project_id", &format!("eq.{project}"))
            .append_pair("order", "uploaded_at.asc");
        url
    }

    fn row_url(&self, id: &MockupId) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));
        url
    }

    async fn rows(&self, request: reqwest::RequestBuilder) -> StoreResult<Vec<Mockup>> {
        let response = self.backend.send(request).await?;
        self.backend
            .guarded(async { response.json::<Vec<Mockup>>().await.map_err(map_reqwest_error) })
            .await
    }
}

#[async_trait]
impl MetadataStore for HttpMetadataStore {
    async fn insert(&self, row: NewMockup) -> StoreResult<Mockup> {
        let request = self
            .backend
            .request(Method::POST, self.table_url())
            .header("Prefer", "return=representation")
            .json(&row);

        let inserted = self
            .rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))?;
        tracing::debug!(table = %self.table, id = %inserted.id, "inserted mockup row");
        Ok(inserted)
    }

    async fn select_by_project(&self, project: &ProjectId) -> StoreResult<Vec<Mockup>> {
        let request = self
            .backend
            .request(Method::GET, self.project_rows_url(project));
        let rows = self.rows(request).await?;
        tracing::debug!(table = %self.table, %project, count = rows.len(), "selected mockup rows");
        Ok(rows)
    }

    async fn delete_by_id(&self, id: &MockupId) -> StoreResult<()> {
        let request = self.backend.request(Method::DELETE, self.row_url(id));
        self.backend.send(request).await?;
        tracing::debug!(table = %self.table, %id, "deleted mockup row");
        Ok(())
    }
}
