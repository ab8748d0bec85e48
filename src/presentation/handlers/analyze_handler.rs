// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::{
    application::dto::analyze_request::{AnalyzeRequestDto, AnalyzeTextRequestDto},
    application::usecases::analyze_article::AnalyzeArticleUseCase,
    config::settings::{AnalysisSettings, Settings},
    domain::models::token::{PennTag, TagLabel, UniversalTag},
    domain::services::extraction_service::ExtractionService,
    domain::services::tagging_service::LexiconTagger,
    engines::reqwest_engine::ReqwestFetcher,
    presentation::errors::AppError,
};

/// 分析处理器共享的只读状态
pub struct AnalysisState {
    pub use_case: AnalyzeArticleUseCase,
    pub defaults: AnalysisSettings,
}

impl AnalysisState {
    /// 按配置装配抓取器、提取器和标注器
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let fetcher = ReqwestFetcher::new(&settings.fetch)?;
        let extractor = ExtractionService::from_settings(&settings.extraction)?;
        let tagger = LexiconTagger::new(settings.analysis.max_text_chars)?;

        Ok(Self {
            use_case: AnalyzeArticleUseCase::new(
                Arc::new(fetcher),
                Arc::new(extractor),
                Arc::new(tagger),
            ),
            defaults: settings.analysis.clone(),
        })
    }
}

/// 分析一篇在线文章
pub async fn analyze(
    Extension(state): Extension<Arc<AnalysisState>>,
    payload: Result<Json<AnalyzeRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let options = request.options(&state.defaults);
    info!(url = %request.url, tagset = options.tagset.as_str(), "Analyze request received");

    let report = state.use_case.execute(&request.url, options).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": report,
        })),
    ))
}

/// 分析请求体中给出的文本
pub async fn analyze_text(
    Extension(state): Extension<Arc<AnalysisState>>,
    payload: Result<Json<AnalyzeTextRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let options = request.options(&state.defaults);
    let report = state.use_case.analyze_text(request.text, options).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": report,
        })),
    ))
}

/// 标签目录
pub async fn list_tags() -> impl IntoResponse {
    let penn: Vec<_> = PennTag::ALL
        .iter()
        .map(|tag| {
            json!({
                "code": tag.code(),
                "description": tag.description(),
                "universal": tag.universal().code(),
            })
        })
        .collect();

    let universal: Vec<_> = UniversalTag::ALL
        .iter()
        .map(|tag| {
            json!({
                "code": tag.code(),
                "description": tag.description(),
            })
        })
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "penn": penn,
            "universal": universal,
        }
    }))
}
