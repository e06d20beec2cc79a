//! Metrics source client.
//!
//! The metrics source is an external BI server exposing named views over
//! HTTP. Its authentication and session lifecycle are its own concern;
//! this client makes single REST calls with explicit timeouts.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::types::{MetricsRow, ViewInfo};

/// Trait for the metrics source.
///
/// Abstracting the client lets tests substitute a canned implementation.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// List the views the source publishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be decoded.
    async fn list_views(&self) -> Result<Vec<ViewInfo>>;

    /// Fetch the tabular dataset for a view.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be decoded.
    async fn query_view(&self, view_id: &str) -> Result<Vec<MetricsRow>>;
}

/// Response from the view-listing endpoint.
#[derive(Debug, Deserialize)]
struct ListViewsResponse {
    views: Vec<ViewInfo>,
}

/// Response from the view-data endpoint.
#[derive(Debug, Deserialize)]
struct QueryViewResponse {
    rows: Vec<MetricsRow>,
}

/// HTTP client for the metrics source.
#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricsSource {
    /// Create a new metrics client with a 30s request / 5s connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen
    /// with default TLS).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a metrics client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn map_request_error(err: &reqwest::Error) -> ReportError {
        if err.is_timeout() {
            ReportError::Timeout(format!("metrics source: {err}"))
        } else {
            ReportError::MetricsSource(err.to_string())
        }
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn list_views(&self) -> Result<Vec<ViewInfo>> {
        let url = format!("{}/v1/views", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::map_request_error(&e))?;

        if !response.status().is_success() {
            return Err(ReportError::MetricsSource(format!(
                "list views returned HTTP {}",
                response.status()
            )));
        }

        let body: ListViewsResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Decode(e.to_string()))?;
        Ok(body.views)
    }

    async fn query_view(&self, view_id: &str) -> Result<Vec<MetricsRow>> {
        let url = format!("{}/v1/views/{view_id}/data", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::map_request_error(&e))?;

        if !response.status().is_success() {
            return Err(ReportError::MetricsSource(format!(
                "query view {view_id} returned HTTP {}",
                response.status()
            )));
        }

        let body: QueryViewResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Decode(e.to_string()))?;

        tracing::debug!(view_id, rows = body.rows.len(), "fetched view data");
        Ok(body.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_views() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/views"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "views": [
                    {"id": "v1", "name": "Team Metrics Weekly"},
                    {"id": "v2", "name": "Backlog"}
                ]
            })))
            .mount(&server)
            .await;

        let client = HttpMetricsSource::new(server.uri());
        let views = client.list_views().await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, "v1");
        assert_eq!(views[0].name, "Team Metrics Weekly");
    }

    #[tokio::test]
    async fn queries_view_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/views/v1/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "rows": [
                    {"agent": "Alice", "measure": "Tickets Closed", "value": 42.0}
                ]
            })))
            .mount(&server)
            .await;

        let client = HttpMetricsSource::new(server.uri());
        let rows = client.query_view("v1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].agent, "Alice");
    }

    #[tokio::test]
    async fn server_error_is_metrics_source_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/views"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpMetricsSource::new(server.uri());
        let err = client.list_views().await.unwrap_err();
        assert!(matches!(err, ReportError::MetricsSource(_)));
    }

    #[tokio::test]
    async fn bad_payload_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/views"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpMetricsSource::new(server.uri());
        let err = client.list_views().await.unwrap_err();
        assert!(matches!(err, ReportError::Decode(_)));
    }
}
