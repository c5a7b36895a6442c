// 🌐 REST API with Axum
//
// The request's own query string is the filter state:
//   GET /api/doctors?search=ali&consultation=In+Clinic&specialty=ENT&sort=fees

use crate::controller::{FetchOutcome, FilterController};
use crate::engine::{compute_visible, suggestions, SUGGESTION_LIMIT};
use crate::model::Doctor;
use crate::query::{parse_query, to_query};
use crate::source::DoctorSource;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::warn;

const NOT_LOADED: &str = "Doctor data is not loaded yet";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<FilterController>>,
    pub source: Arc<dyn DoctorSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn DoctorSource>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(FilterController::default())),
            source,
        }
    }

    /// Fetch through the controller's ticket guard. The lock is not held
    /// while the request is in flight.
    pub async fn reload(&self) -> Result<FetchOutcome, crate::source::FetchError> {
        let ticket = self.controller.lock().await.begin_fetch();
        let result = self.source.fetch_records().await;
        self.controller.lock().await.complete_fetch(ticket, result)
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub count: usize,
    /// Canonical form of the filter state that produced this list
    pub query: String,
    pub doctors: Vec<Doctor>,
}

#[derive(Serialize)]
pub struct SuggestionResponse {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

fn not_loaded() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiResponse::<()>::err(NOT_LOADED)),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/doctors - Visible set for the filter state in the query string
async fn get_doctors(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let controller = state.controller.lock().await;
    let Some(doctors) = controller.doctors() else {
        return not_loaded();
    };

    let filter = parse_query(query.as_deref().unwrap_or_default());
    let visible = compute_visible(doctors, &filter);

    let response = DoctorsResponse {
        count: visible.len(),
        query: to_query(&filter),
        doctors: visible,
    };
    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// GET /api/specialties - Sorted specialty index
async fn get_specialties(State(state): State<AppState>) -> Response {
    let controller = state.controller.lock().await;
    if !controller.is_loaded() {
        return not_loaded();
    }

    (StatusCode::OK, Json(ApiResponse::ok(controller.specialties().to_vec()))).into_response()
}

/// GET /api/suggestions?search=... - Top name matches for autocomplete
async fn get_suggestions(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let controller = state.controller.lock().await;
    let Some(doctors) = controller.doctors() else {
        return not_loaded();
    };

    let filter = parse_query(query.as_deref().unwrap_or_default());
    let response: Vec<SuggestionResponse> = suggestions(doctors, &filter.search_query, SUGGESTION_LIMIT)
        .into_iter()
        .map(|d| SuggestionResponse {
            id: d.id.clone(),
            name: d.name.clone(),
        })
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(response))).into_response()
}

/// POST /api/reload - Re-fetch from the record endpoint
async fn reload(State(state): State<AppState>) -> Response {
    match state.reload().await {
        Ok(FetchOutcome::Applied { count }) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ReloadResponse {
                applied: true,
                count: Some(count),
            })),
        )
            .into_response(),
        Ok(FetchOutcome::Superseded) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ReloadResponse {
                applied: false,
                count: None,
            })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "reload failed");
            (StatusCode::BAD_GATEWAY, Json(ApiResponse::<()>::err(e.to_string()))).into_response()
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/doctors", get(get_doctors))
        .route("/specialties", get(get_specialties))
        .route("/suggestions", get(get_suggestions))
        .route("/reload", post(reload))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
