//! Reqwest-backed Overpass source
//!
//! One POST per query, form field `data`, bounded by the client timeout.
//! No retries: a failed call is reported and the caller falls back.

use crate::constants::api::OVERPASS_URL;
use crate::error::Result;
use crate::overpass::{OverpassQuery, PoiSource, RawResult, SourceError};
use std::time::Duration;

const USER_AGENT: &str = concat!("atlasgo/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const BODY_PREVIEW_CHARS: usize = 160;

/// Overpass interpreter client
#[derive(Debug, Clone)]
pub struct OverpassSource {
    client: reqwest::Client,
    endpoint: String,
}

impl OverpassSource {
    /// Create a source for `endpoint` with an explicit request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_user_agent(endpoint, timeout, USER_AGENT)
    }

    /// Create a source with a custom `User-Agent`
    pub fn with_user_agent(
        endpoint: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Public interpreter with default timeout
    pub fn public() -> Result<Self> {
        Self::new(OVERPASS_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PoiSource for OverpassSource {
    fn name(&self) -> &'static str {
        "overpass"
    }

    async fn fetch(&self, query: &OverpassQuery) -> std::result::Result<RawResult, SourceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query.text.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        serde_json::from_slice(&body)
            .map_err(|e| SourceError::Decode(format!("invalid Overpass JSON: {}", e)))
    }
}

fn map_transport_error(error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout(error.to_string())
    } else {
        SourceError::Transport(error.to_string())
    }
}

/// First characters of a body with whitespace collapsed, for log lines
fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(BODY_PREVIEW_CHARS).collect();
    if compact.chars().count() > BODY_PREVIEW_CHARS {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::overpass::{stub, QueryBuilder};
    use crate::poi::CategorySet;
    use axum::http::StatusCode;
    use std::time::Instant;
    use tokio::net::TcpListener;

    fn query() -> OverpassQuery {
        QueryBuilder::default()
            .build(Coordinates::new(48.8566, 2.3522), 1000.0, &CategorySet::all())
            .unwrap()
    }

    async fn spawn_interpreter(status: StatusCode, body: &'static str) -> String {
        stub::spawn_interpreter(status, body, Duration::ZERO).await
    }

    fn source(endpoint: String) -> OverpassSource {
        OverpassSource::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_elements() {
        let endpoint = spawn_interpreter(
            StatusCode::OK,
            r#"{"elements":[{"type":"node","id":42,"lat":48.85,"lon":2.35,"tags":{"amenity":"toilets"}}]}"#,
        )
        .await;

        let raw = source(endpoint).fetch(&query()).await.unwrap();
        assert_eq!(raw.elements.len(), 1);
        assert_eq!(raw.elements[0].id, 42);
        assert_eq!(raw.elements[0].tags["amenity"], "toilets");
    }

    #[tokio::test]
    async fn test_fetch_bad_status() {
        let endpoint = spawn_interpreter(StatusCode::TOO_MANY_REQUESTS, "rate limited").await;

        match source(endpoint).fetch(&query()).await {
            Err(SourceError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_payload() {
        let endpoint = spawn_interpreter(StatusCode::OK, "<html>not json</html>").await;

        let result = source(endpoint).fetch(&query()).await;
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let endpoint =
            stub::spawn_interpreter(StatusCode::OK, r#"{"elements":[]}"#, Duration::from_secs(5))
                .await;
        let source = OverpassSource::new(endpoint, Duration::from_millis(300)).unwrap();

        let started = Instant::now();
        let result = source.fetch(&query()).await;

        assert!(matches!(result, Err(SourceError::Timeout(_))), "got {:?}", result);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_fetch_tolerates_null_tags() {
        let endpoint = spawn_interpreter(
            StatusCode::OK,
            r#"{"elements":[
                {"type":"node","id":1,"lat":48.85,"lon":2.35,"tags":{"amenity":"toilets"}},
                {"type":"node","id":2,"lat":48.85,"lon":2.35,"tags":null}
            ]}"#,
        )
        .await;

        let raw = source(endpoint).fetch(&query()).await.unwrap();
        assert_eq!(raw.elements.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = source(format!("http://{}/api/interpreter", addr))
            .fetch(&query())
            .await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }

    #[test]
    fn test_body_preview_truncates() {
        let long = "x ".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_source_creation() {
        let source = OverpassSource::public().unwrap();
        assert_eq!(source.endpoint(), OVERPASS_URL);
        assert_eq!(source.name(), "overpass");
    }
}
