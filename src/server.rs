//! HTTP transport: axum glue around the request router.
//!
//! Requests are handled one at a time; the API sits behind a single lock so a
//! watch-list read-modify-write never interleaves with another request from
//! this process.

use crate::api::WatchApi;
use crate::error::ApiError;
use crate::router::{self, Reply, ReplyBody};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for request handlers
pub struct ServerState {
    api: Mutex<WatchApi>,
}

impl ServerState {
    pub fn new(api: WatchApi) -> Self {
        Self {
            api: Mutex::new(api),
        }
    }
}

/// Build the axum router. Every request goes through the substring router.
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_request(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let reply = {
        let api = state.api.lock();
        router::handle(&api, method.as_str(), uri.path(), &body)
    };
    into_response(reply)
}

fn into_response(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = reply.content_type();
    let is_json = matches!(reply.body, ReplyBody::Json(_));

    let mut response = (
        status,
        [(header::CONTENT_TYPE, content_type)],
        reply.body_string(),
    )
        .into_response();

    if is_json {
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }
    response
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, api: WatchApi) -> Result<(), ApiError> {
    let app = build_router(Arc::new(ServerState::new(api)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::ServerError(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr().unwrap_or(addr);
    info!(%local_addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::ServerError(e.to_string()))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
