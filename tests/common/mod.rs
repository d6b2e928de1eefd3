#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use cashcard_service::{AppState, seed, store::MemoryStore};
use tower::ServiceExt;

pub const SARAH: (&str, &str) = ("sarah1", "abc123");
pub const KUMAR: (&str, &str) = ("kumar2", "xyz789");
pub const HANK: (&str, &str) = ("hank-owns-no-cards", "qrs456");

/// Router over a fresh in-memory store loaded with the demo data.
pub async fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    store.seed(seed::demo_principals(), seed::demo_cards()).await;
    cashcard_service::app(AppState::from_store(store))
}

pub fn basic(credentials: (&str, &str)) -> String {
    let (user, password) = credentials;
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

pub fn get(uri: &str, credentials: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(credentials) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic(credentials));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn with_json(
    method: &str,
    uri: &str,
    credentials: (&str, &str),
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic(credentials))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
