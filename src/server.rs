//! HTTP surface of the catalog API.
//!
//! All endpoints are GET and carry no request body:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service banner (name and version) |
//! | `GET` | `/sectors` | All sectors with nested companies |
//! | `GET` | `/sectors/{slug}` | One sector by slug |
//! | `GET` | `/companies/{slug}` | One company with its sector name |
//! | `GET` | `/companies/{slug}/research` | Research entries for a company |
//!
//! # Error Contract
//!
//! Not-found responses are `404` with a JSON body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "sector not found: x" } }
//! ```
//!
//! Upstream datastore failures never surface here; they are absorbed by
//! the fallback dataset inside [`CatalogService`].
//!
//! # CORS
//!
//! Cross-origin access is limited to the origins enumerated in
//! `[cors].allowed_origins`, GET only.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::models::{CompanyDetail, ResearchEntry, Sector};
use crate::service::CatalogService;

/// Shared application state; read-only after startup.
#[derive(Clone)]
struct AppState {
    service: Arc<CatalogService>,
}

/// Builds the router with all routes and the CORS layer applied.
pub fn build_router(config: &Config, service: Arc<CatalogService>) -> anyhow::Result<Router> {
    let origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_root))
        .route("/sectors", get(handle_list_sectors))
        .route("/sectors/{slug}", get(handle_get_sector))
        .route("/companies/{slug}", get(handle_get_company))
        .route("/companies/{slug}/research", get(handle_get_research))
        .layer(cors)
        .with_state(AppState { service });

    Ok(app)
}

/// Starts the HTTP server on the configured bind address and serves
/// until the process is terminated.
pub async fn run_server(config: &Config, service: Arc<CatalogService>) -> anyhow::Result<()> {
    let app = build_router(config, service)?;

    println!("Catalog API listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct RootResponse {
    message: String,
    version: String,
}

/// Service banner, served identically whether or not the remote
/// datastore is configured.
async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Crypto Market Map API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /sectors ============

async fn handle_list_sectors(State(state): State<AppState>) -> Json<Vec<Sector>> {
    Json(state.service.sectors().await)
}

// ============ GET /sectors/{slug} ============

async fn handle_get_sector(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Sector>, AppError> {
    state
        .service
        .sector_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("sector not found: {}", slug)))
}

// ============ GET /companies/{slug} ============

async fn handle_get_company(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyDetail>, AppError> {
    state
        .service
        .company_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("company not found: {}", slug)))
}

// ============ GET /companies/{slug}/research ============

/// Research for an existing company is always a list; only a missing
/// company is a 404. Zero entries yield `[]`.
async fn handle_get_research(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<ResearchEntry>>, AppError> {
    state
        .service
        .research_for_company(&slug)
        .await
        .map(Json)
        .ok_or_else(|| not_found(format!("company not found: {}", slug)))
}
