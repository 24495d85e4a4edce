//! Integration tests for the delete-product endpoint's request
//! validation.
//!
//! The workflow endpoint is unreachable under test, so a body that
//! clears validation surfaces as UPSTREAM_ERROR.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, send_json_authed};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: body field validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_product_id_returns_400() {
    let app = common::build_test_app().await;
    let response = send_json_authed(
        app,
        Method::DELETE,
        "/api/v1/delete-product",
        json!({
            "productId": "",
            "productName": "Red Hoodie",
            "category": "clothes",
            "fileIds": ["f1"]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["error"].as_str().unwrap().contains("productId"),
        "error should name the field: {}",
        json["error"]
    );
}

#[tokio::test]
async fn empty_product_name_returns_400() {
    let app = common::build_test_app().await;
    let response = send_json_authed(
        app,
        Method::DELETE,
        "/api/v1/delete-product",
        json!({
            "productId": "p1",
            "productName": "",
            "category": "clothes"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["error"].as_str().unwrap().contains("productName"),
        "error should name the field: {}",
        json["error"]
    );
}

#[tokio::test]
async fn unknown_category_returns_400() {
    let app = common::build_test_app().await;
    let response = send_json_authed(
        app,
        Method::DELETE,
        "/api/v1/delete-product",
        json!({
            "productId": "p1",
            "productName": "Red Hoodie",
            "category": "hats"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_required_field_returns_422() {
    let app = common::build_test_app().await;

    // No productName at all; serde rejects before the handler runs.
    let response = send_json_authed(
        app,
        Method::DELETE,
        "/api/v1/delete-product",
        json!({
            "productId": "p1",
            "category": "clothes"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: fileIds is optional
// ---------------------------------------------------------------------------

#[tokio::test]
async fn file_ids_default_to_empty() {
    let app = common::build_test_app().await;
    let response = send_json_authed(
        app,
        Method::DELETE,
        "/api/v1/delete-product",
        json!({
            "productId": "p1",
            "productName": "Red Hoodie",
            "category": "clothes"
        }),
    )
    .await;

    // Validation passed without fileIds; the failure is the unreachable
    // workflow, not the body.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}
