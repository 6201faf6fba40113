//! Demo web server
//!
//! A small axum app: one page (embedded), a classify endpoint taking raw image
//! bytes, and a labels endpoint for the UI's label selector.

use crate::assembler::{PresentationAssembler, ViewModel};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_embed::Embed;
use serde::Deserialize;
use snaplens_classifier::{decode_image, ClassifierGateway};
use snaplens_core::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Uploads larger than this are rejected outright.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ClassifierGateway>,
    pub assembler: Arc<PresentationAssembler>,
}

/// Build the axum application
pub fn build_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/labels", get(labels))
        .route("/classify", post(classify))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .fallback(serve_static)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Run the server until shutdown
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "demo server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn labels(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.gateway.labels().await?))
}

#[derive(Debug, Deserialize)]
struct ClassifyParams {
    /// Show the content panel for this label instead of the prediction
    label: Option<String>,
}

async fn classify(
    State(state): State<AppState>,
    Query(params): Query<ClassifyParams>,
    body: Bytes,
) -> Result<Json<ViewModel>, ApiError> {
    let image = decode_image(&body)?;
    let view = state
        .assembler
        .assemble(&state.gateway, &image, params.label.as_deref())
        .await?;
    Ok(Json(view))
}

/// Error wrapper mapping the core taxonomy onto HTTP statuses.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::DecodeFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Embed)]
#[folder = "static"]
struct WebAssets;

/// Serve the embedded single-page UI
async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    (StatusCode::NOT_FOUND, "not found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_mapping() {
        let cases = [
            (
                Error::decode_failure("bad"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                Error::model_unavailable("gone"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (Error::invalid_input("len"), StatusCode::BAD_REQUEST),
            (Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn embedded_page_offers_both_input_sources() {
        let page = <WebAssets as Embed>::get("index.html").expect("index.html is embedded");
        let html = String::from_utf8_lossy(&page.data);

        // Two input paths feed the same classify endpoint: live camera
        // capture and file upload.
        assert!(html.contains("getUserMedia"));
        assert!(html.contains("type=\"file\""));
        assert!(html.contains("/api/classify"));
    }
}
