//! HTTP API for creating invoice links
//!
//! Two routes: `GET /` (liveness greeting kept for client compatibility)
//! and `POST /create-invoice-link`. Every failure produces the same JSON
//! shape `{"success": false, "error": ..., "details": ...}`; validation
//! problems are the client's fault and come back as 400, gateway failures
//! as 500 with the platform's message preserved.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::invoice::{normalize, GatewayError, InvoiceDraft, InvoiceLinkGateway, ValidationError};

/// Shared state for all endpoints. The gateway is the only dependency;
/// handlers receive it through axum's `State`, never through globals.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn InvoiceLinkGateway>,
}

/// Request-level errors, mapped onto the uniform failure response shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("malformed request body: {0}")]
    Malformed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, json!({ "field": err.field() })),
            ApiError::Malformed(_) => (StatusCode::BAD_REQUEST, json!({ "field": "body" })),
            ApiError::Gateway(err) => (StatusCode::INTERNAL_SERVER_ERROR, json!(format!("{:?}", err))),
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "details": details,
        }));

        (status, body).into_response()
    }
}

/// Builds the API router with CORS restricted to the configured origins.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(hello_world))
        .route("/create-invoice-link", post(create_invoice_link))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Runs the API server until the shutdown future resolves.
pub async fn run_server(
    port: u16,
    allowed_origins: Vec<String>,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(state, &allowed_origins);

    let addr = format!("0.0.0.0:{}", port);
    log::info!("Starting invoice API server on http://{}", addr);
    log::info!("Available endpoints:");
    log::info!("- GET  http://localhost:{}/", port);
    log::info!("- POST http://localhost:{}/create-invoice-link", port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Skipping invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

async fn hello_world() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn create_invoice_link(
    State(state): State<AppState>,
    body: Result<Json<InvoiceDraft>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(draft) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;

    // Validation happens before any network call; a bad draft never
    // reaches Telegram.
    let invoice = normalize(draft)?;
    let link = state.gateway.create_link(&invoice).await?;

    Ok(Json(json!({ "success": true, "invoiceLink": link })))
}
