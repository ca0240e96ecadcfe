//! HTTP API routes
//!
//! Thin adapters: parse query parameters, call the pipeline, serialize.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::overpass::PoiSource;
use crate::places::{PlacesRequest, PlacesResponse};
use crate::poi::{available_categories, CategorySet, Poi};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

/// Create the API router
pub fn create_router<S: PoiSource + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/places", get(places_handler::<S>))
        .route("/search", get(search_handler::<S>))
        .route("/api/status", get(status_handler::<S>))
        .route("/api/categories", get(categories_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "internal_status")]
    pub status: StatusCode,
}

fn internal_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            _ => {
                error!("Request failed: {}", err);
                return ApiError {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                };
            }
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

/// Root response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// GET /
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AtlasGo API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Query parameters for /places
#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in meters
    pub radius_m: Option<f64>,
    /// Comma-separated categories
    pub types: Option<String>,
}

/// Places near a coordinate
///
/// GET /places?lat=..&lng=..&radius_m=1000&types=toilet,parking,wifi
async fn places_handler<S: PoiSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<PlacesResponse>, ApiError> {
    let defaults = &state.config.defaults;
    let request = PlacesRequest::new(
        Coordinates::new(params.lat, params.lng),
        params.radius_m.unwrap_or(defaults.radius_m),
        CategorySet::parse(params.types.as_deref().unwrap_or(&defaults.categories)),
    );

    let response = state.aggregator.retrieve(&request).await?;
    Ok(Json(response))
}

/// Query parameters for /search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub lat: f64,
    pub lng: f64,
}

/// Search places by name or address
///
/// GET /search?q=..&lat=..&lng=..
async fn search_handler<S: PoiSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Poi>>, ApiError> {
    let center = Coordinates::new(params.lat, params.lng);
    center.validate()?;
    Ok(Json(state.search.search(&params.q, center)))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: u64,
    pub cache_entries: usize,
    pub fallback_places: usize,
}

/// Server status
///
/// GET /api/status
async fn status_handler<S: PoiSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.aggregator.source().name().to_string(),
        started_at: state.started_at,
        uptime_secs: state.uptime_secs(),
        cache_entries: state.cache().len(),
        fallback_places: state.aggregator.fallback().len(),
    })
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub label: String,
}

/// List known categories
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    let categories = available_categories()
        .into_iter()
        .map(|c| CategoryInfo {
            name: c.to_string(),
            label: c.label().to_string(),
        })
        .collect();

    Json(CategoriesResponse { categories })
}
