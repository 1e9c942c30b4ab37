//! HTTP rendering through axum (needs the `axum` feature)

use apierr::{ApiError, ApiResult, ValidationErrors};
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{Value, json};

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn response_uses_status_and_payload() {
    let resp = ApiError::not_found()
        .with_context(json!({ "table": "users" }))
        .with_meta(json!({ "id": 9 }))
        .into_response();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let ct = resp
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(ct, "application/json");

    assert_eq!(
        body_json(resp).await,
        json!({
            "error": { "id": "not_found", "message": "Requested object not found." },
            "meta": { "id": 9 }
        })
    );
}

#[tokio::test]
async fn handler_result_renders_the_raised_error() {
    async fn handler() -> ApiResult<&'static str> {
        ValidationErrors::new().with("email", "required").into_result()?;
        Ok("created")
    }

    let resp = handler().await.into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["id"], "validation_failed");
    assert_eq!(body["meta"]["errors"][0]["field"], "email");
}

#[tokio::test]
async fn internal_server_error_hides_context() {
    let resp = ApiError::internal_server_error()
        .with_context(json!({ "panic": "index out of bounds" }))
        .into_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body.get("meta").is_none());
    assert!(!body.to_string().contains("index out of bounds"));
}
