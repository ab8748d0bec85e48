// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use newspos::config::settings::Settings;
use newspos::presentation::handlers::analyze_handler::AnalysisState;
use newspos::presentation::routes;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

/// 允许访问本机地址的测试应用（wiremock 监听在 127.0.0.1）
pub fn create_test_app() -> Router {
    let mut settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .expect("default settings");
    settings.fetch.block_private_hosts = false;
    settings.fetch.timeout_secs = 5;
    create_app_with(&settings)
}

pub fn create_app_with(settings: &Settings) -> Router {
    let state = AnalysisState::from_settings(settings).expect("pipeline components build");
    routes::routes(Arc::new(state))
}

/// 发送 JSON 请求并解析 JSON 响应
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Council approves budget</title>
    <style>body { font-family: serif; }</style>
    <script>window.analytics = [];</script>
</head>
<body>
    <header><a href="/">The Daily Example</a></header>
    <nav><ul><li>World</li><li>Business</li><li>Sport</li></ul></nav>
    <div class="article-content">
        <h1>Council approves budget</h1>
        <p>The city council approved a new budget on Tuesday after a long debate.</p>
        <p>Officials said the plan would fund three new schools and repair old roads.</p>
        <p>"We are proud of this result," the mayor told reporters.</p>
    </div>
    <footer>Copyright 2025 The Daily Example</footer>
</body>
</html>"#;
