//! Router-level tests for the API surface.
//!
//! These exercise the request/response contract for paths that are decided
//! before any store call happens (routing, body validation, error shape),
//! so they run without a Firestore instance. The state points at an
//! unroutable endpoint to guarantee nothing escapes to the network.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;

use clementine_api::config::{ApiConfig, FirestoreConfig};
use clementine_api::routes;
use clementine_api::state::AppState;

fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        firestore: FirestoreConfig {
            api_key: SecretString::from("AIzaSyTestKey123"),
            auth_domain: "test-shop.firebaseapp.com".to_string(),
            database_url: "https://test-shop.firebaseio.com".to_string(),
            project_id: "test-shop".to_string(),
            storage_bucket: "test-shop.appspot.com".to_string(),
            messaging_sender_id: "123456789".to_string(),
            app_id: "1:123456789:web:abcdef".to_string(),
            measurement_id: None,
            // Unroutable: any accidental store call fails fast
            endpoint: Some(
                "http://127.0.0.1:1/v1/projects/test-shop/databases/(default)/documents"
                    .to_string(),
            ),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

fn app() -> Router {
    routes::routes().with_state(AppState::new(test_config()))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[tokio::test]
async fn newsletter_rejects_malformed_email_with_json_error() {
    let response = app()
        .oneshot(
            Request::post("/newsletter")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email": "not-an-email"}"#))
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn newsletter_rejects_missing_email_field() {
    // An absent email deserializes to the empty string and fails validation
    let response = app()
        .oneshot(
            Request::post("/newsletter")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "email cannot be empty");
}

#[tokio::test]
async fn newsletter_rejects_non_json_body() {
    let response = app()
        .oneshot(
            Request::post("/newsletter")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("email=user@example.com"))
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app()
        .oneshot(
            Request::get("/checkout")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn promo_route_requires_post() {
    let response = app()
        .oneshot(
            Request::get("/promotional-code")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn store_failure_maps_to_generic_500() {
    // The listing handler reaches for the store; the unroutable endpoint
    // turns that into a transport error, which must surface as a generic
    // JSON 500 with no internal detail.
    let response = app()
        .oneshot(
            Request::get("/products")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Internal server error");
}
