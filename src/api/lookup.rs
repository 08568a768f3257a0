//! WebSocket lookup boundary
//!
//! `GET /ws?isbn=…` upgrades to a WebSocket, runs the extraction pipeline
//! once, sends one result frame, and closes. The ISBN is validated before
//! the upgrade, so a malformed request is refused with a plain 400 and no
//! stream is ever established.
//!
//! Wire contract: on success one JSON text frame
//! `{"lexile": <int>, "atos": <float>, "ar": <float>}`; on resource
//! failure one text frame prefixed `error:`. Extraction degradation is
//! not an error at this layer; the caller always gets three fields.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::extract_metrics;
use crate::isbn::{self, Isbn};
use crate::AppState;

/// Query parameters for the lookup endpoint
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub isbn: Option<String>,
}

/// GET /ws?isbn=… — validate, upgrade, extract, stream one result frame.
pub async fn lookup_socket(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let raw = params
        .isbn
        .ok_or_else(|| ApiError::BadRequest("missing isbn query parameter".to_string()))?;
    let isbn = isbn::normalize(&raw).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(%isbn, "Lookup requested");
    Ok(ws.on_upgrade(move |socket| handle_lookup(state, isbn, socket)))
}

/// Drive one extraction while watching the socket for a disconnect.
///
/// If the caller goes away mid-extraction the pipeline future is dropped;
/// its page guard closes the borrowed tab in the background, so an
/// abandoned connection never runs the remaining steps or leaks a page.
async fn handle_lookup(state: AppState, isbn: Isbn, mut socket: WebSocket) {
    let extraction = extract_metrics(&state.pool, &isbn, &state.config);
    tokio::pin!(extraction);

    let result = loop {
        tokio::select! {
            result = &mut extraction => break result,
            msg = socket.recv() => {
                match msg {
                    // Ignore any client chatter; only one result goes out.
                    Some(Ok(_)) => continue,
                    Some(Err(_)) | None => {
                        info!(%isbn, "Client disconnected mid-extraction");
                        return;
                    }
                }
            }
        }
    };

    match result {
        Ok(metrics) => match serde_json::to_string(&metrics) {
            Ok(frame) => {
                if socket.send(Message::Text(frame)).await.is_err() {
                    info!(%isbn, "Client went away before the result frame");
                }
            }
            Err(e) => warn!(%isbn, error = %e, "Failed to serialize result"),
        },
        Err(e) => {
            warn!(%isbn, error = %e, "Extraction failed");
            let _ = socket.send(Message::Text(format!("error:{e}"))).await;
        }
    }

    let _ = socket.close().await;
}

/// Build lookup routes
pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/ws", get(lookup_socket))
}
