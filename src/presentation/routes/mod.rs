// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::analyze_handler::{self, AnalysisState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `state` - 分析用例和默认分析参数
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: Arc<AnalysisState>) -> Router {
    let text_body_limit = text_body_limit(state.defaults.max_text_chars);

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/tags", get(analyze_handler::list_tags));

    let analysis_routes = Router::new()
        .route("/v1/analyze", post(analyze_handler::analyze))
        .route(
            "/v1/analyze/text",
            post(analyze_handler::analyze_text).layer(DefaultBodyLimit::max(text_body_limit)),
        )
        .layer(Extension(state));

    Router::new()
        .merge(public_routes)
        .merge(analysis_routes)
        .layer(TraceLayer::new_for_http())
}

/// 文本接口的请求体上限
///
/// 按每个字符最坏 12 字节（`\uXXXX` 转义的代理对）再加 64 KiB 的 JSON 外壳，
/// 保证不超过 `max_text_chars` 的文本总能到达标注阶段。
pub fn text_body_limit(max_text_chars: usize) -> usize {
    max_text_chars.saturating_mul(12).saturating_add(64 * 1024)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
