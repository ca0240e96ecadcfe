//! Test doubles: a scripted [`PoiSource`] and a local interpreter endpoint

use crate::overpass::{OverpassQuery, PoiSource, RawElement, RawResult, SourceError};
use axum::{http::StatusCode, routing::post, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::TcpListener;

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum StubReply {
    Fail,
    Empty,
    Elements(Vec<RawElement>),
}

/// Source that replays a fixed reply and counts calls
#[derive(Debug)]
pub struct StubSource {
    reply: StubReply,
    delay: Duration,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubSource {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self::new(StubReply::Fail)
    }

    /// Hold every reply for `delay` so concurrent callers overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

/// A tagged node element
pub fn node(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> RawElement {
    RawElement {
        element_type: "node".to_string(),
        id,
        lat: Some(lat),
        lon: Some(lon),
        tags: tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

impl PoiSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn fetch(&self, query: &OverpassQuery) -> Result<RawResult, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.text.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            StubReply::Fail => Err(SourceError::Transport("connection refused".to_string())),
            StubReply::Empty => Ok(RawResult::default()),
            StubReply::Elements(elements) => Ok(RawResult {
                elements: elements.clone(),
            }),
        }
    }
}

/// Serve one canned interpreter reply on an ephemeral port, held for `delay`
///
/// Returns the endpoint URL.
pub async fn spawn_interpreter(status: StatusCode, body: &'static str, delay: Duration) -> String {
    let app = Router::new().route(
        "/api/interpreter",
        post(move |form: String| async move {
            assert!(form.starts_with("data="));
            tokio::time::sleep(delay).await;
            (status, body)
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/interpreter", addr)
}
