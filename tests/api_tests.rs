//! Router-level tests
//!
//! Exercise the HTTP boundary in-process with tower's oneshot, using an
//! offline browser pool so no Chromium install is needed. The WebSocket
//! requests carry real handshake headers so rejection happens in our
//! pre-upgrade validation, not in axum's upgrade extractor.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use lexos::browser::BrowserPool;
use lexos::config::Config;
use lexos::{build_router, AppState};

fn test_state() -> AppState {
    AppState::new(Arc::new(BrowserPool::offline()), Arc::new(Config::default()))
}

/// GET request carrying a well-formed WebSocket handshake.
fn ws_request(uri: &str) -> Request<Body> {
    let mut request = Request::builder()
        .uri(uri)
        .header(header::CONNECTION, "upgrade")
        .header(header::UPGRADE, "websocket")
        .header(header::SEC_WEBSOCKET_VERSION, "13")
        .header(header::SEC_WEBSOCKET_KEY, "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap();
    // A request served over a real connection carries hyper's OnUpgrade
    // extension; axum's upgrade extractor requires it, so attach the
    // placeholder one so rejection happens in our pre-upgrade validation.
    let on_upgrade = hyper::upgrade::on(&mut request);
    request.extensions_mut().insert(on_upgrade);
    request
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_router(test_state());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "lexos");
}

#[tokio::test]
async fn root_serves_the_lookup_page() {
    let app = build_router(test_state());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("lexos"));
    assert!(body.contains("WebSocket"));
}

#[tokio::test]
async fn lookup_without_isbn_is_rejected_before_upgrade() {
    let app = build_router(test_state());

    let response = app.oneshot(ws_request("/ws")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("missing isbn"));
}

#[tokio::test]
async fn lookup_with_bad_checksum_is_rejected_before_upgrade() {
    let app = build_router(test_state());

    let response = app.oneshot(ws_request("/ws?isbn=1234567890")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("invalid isbn"));
}

#[tokio::test]
async fn lookup_with_garbage_isbn_is_rejected_before_upgrade() {
    let app = build_router(test_state());

    let response = app
        .oneshot(ws_request("/ws?isbn=hello-world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
