// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

async fn get(uri: &str) -> (StatusCode, Bytes) {
    let response = create_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let (status, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn version_matches_crate() {
    let (status, body) = get("/v1/version").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], env!("CARGO_PKG_VERSION").as_bytes());
}

#[tokio::test]
async fn tag_catalogue_is_listed() {
    let (status, body) = get("/v1/tags").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let penn = json["data"]["penn"].as_array().unwrap();
    let universal = json["data"]["universal"].as_array().unwrap();
    assert_eq!(penn.len(), 45);
    assert_eq!(universal.len(), 12);

    let nn = penn.iter().find(|t| t["code"] == "NN").unwrap();
    assert_eq!(nn["description"], "Noun, singular");
    assert_eq!(nn["universal"], "NOUN");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get("/v1/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
