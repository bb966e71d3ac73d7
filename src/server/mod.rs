//! HTTP server for the debate proxy.
//!
//! One real endpoint: `POST /api/debate-continue` takes a
//! [`ContinueRequest`] and answers with an SSE stream of
//! [`DebateEvent`]s. Validation failures are plain JSON errors before
//! any streaming; once the stream is open, failures travel in-stream.
//! CORS is wide open — the browser client is served from elsewhere.

pub mod config;

use std::convert::Infallible;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Json, State};
use axum::http::{Method, StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use futures_util::StreamExt;
use serde::Serialize;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::debate::{ContinueRequest, continue_debate};
use crate::error::{AlthingError, Result};
use crate::providers::CompletionProvider;
use crate::types::MAX_TRANSCRIPT_LEN;

pub use config::{Config, Secrets};

/// Shared state for request handlers.
///
/// Holds the upstream provider handle and nothing else; the proxy keeps
/// no cross-request state.
#[derive(Clone)]
pub struct AppState {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// State with no upstream configured; requests answer 500.
    pub fn without_provider() -> Self {
        Self { provider: None }
    }
}

/// JSON error body for non-streaming failures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_messages: Option<usize>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            max_messages: None,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/api/debate-continue",
            post(debate_continue).options(preflight),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// CORS preflight; the layer attaches the headers.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
        .into_response()
}

/// Continue a debate, answering with an SSE stream of [`DebateEvent`]s.
#[instrument(name = "server.debate_continue", skip(state, request), fields(topic = %request.topic_id))]
async fn debate_continue(
    State(state): State<AppState>,
    Json(request): Json<ContinueRequest>,
) -> Response {
    let Some(provider) = state.provider.clone() else {
        warn!("no completion provider configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(AlthingError::NoProvider.to_string())),
        )
            .into_response();
    };

    match continue_debate(provider, request).await {
        Ok(stream) => {
            let events = stream.map(|event| -> std::result::Result<Event, Infallible> {
                // DebateEvent serialization cannot fail.
                Ok(Event::default().json_data(&event).unwrap_or_default())
            });
            Sse::new(events).into_response()
        }
        Err(e @ AlthingError::TranscriptFull { max }) => {
            let body = ErrorBody {
                error: e.to_string(),
                max_messages: Some(max),
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        Err(e @ AlthingError::InvalidInput(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(e.to_string())),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "debate continuation setup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Serve the router until shutdown is signalled.
pub async fn serve(state: AppState, config: &Config) -> Result<()> {
    let addr: std::net::SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| AlthingError::Configuration(format!("Invalid address: {e}")))?;

    let app = router(state, config.server.limits.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AlthingError::Configuration(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, max_messages = MAX_TRANSCRIPT_LEN, "althingd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AlthingError::Http(e.to_string()))?;

    info!("server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
