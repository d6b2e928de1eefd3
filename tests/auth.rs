mod common;

use axum::http::{StatusCode, header};
use common::{HANK, SARAH, get, send, with_json};
use serde_json::json;

#[tokio::test]
async fn missing_credentials_are_unauthorized() {
    let app = common::app().await;

    for uri in [
        "/cashcards",
        "/cashcards/99",
        "/cashcards/paged?page=0&size=1",
        "/cashcards/99/extra",
        "/cashcards/a/b/c",
    ] {
        let response = send(&app, get(uri, None)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri {uri}");
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"cashcards\""
        );
    }
}

#[tokio::test]
async fn bad_username_or_password_is_unauthorized() {
    let app = common::app().await;

    let response = send(&app, get("/cashcards/99", Some(("BAD-USER", "abc123")))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, get("/cashcards/99", Some(("sarah1", "BAD-PASSWORD")))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_basic_authorization_is_unauthorized() {
    let app = common::app().await;

    let request = axum::http::Request::get("/cashcards/99")
        .header(header::AUTHORIZATION, "Bearer abc123")
        .body(axum::body::Body::empty())
        .unwrap();

    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn principals_without_card_owner_role_are_forbidden() {
    let app = common::app().await;

    let response = send(&app, get("/cashcards/99", Some(HANK))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, get("/cashcards", Some(HANK))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        with_json("POST", "/cashcards", HANK, json!({ "amount": 1.00 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn writes_require_credentials() {
    let app = common::app().await;

    let request = axum::http::Request::post("/cashcards")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(json!({ "amount": 1.00 }).to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::put("/cashcards/99")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(json!({ "amount": 1.00 }).to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);

    // Still untouched
    let response = send(&app, get("/cashcards/99", Some(SARAH))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_subpaths_still_check_the_role() {
    let app = common::app().await;

    let response = send(&app, get("/cashcards/99/extra", Some(HANK))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
