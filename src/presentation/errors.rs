// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::services::tagging_service::TaggingError;
use crate::engines::traits::FetchError;
use crate::utils::errors::AnalysisError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub enum AppError {
    /// 请求体校验失败
    Validation(String),
    /// 请求体无法读取或解析为 JSON，保留 axum 给出的状态码（400/413/415/422）
    Rejected(JsonRejection),
    /// 分析流水线失败
    Analysis(AnalysisError),
}

impl AppError {
    /// HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(rejection) => rejection.status(),
            AppError::Analysis(AnalysisError::Fetch(e)) => match e {
                _ if e.is_client_error() => StatusCode::BAD_REQUEST,
                FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::Analysis(AnalysisError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Analysis(AnalysisError::Tagging(TaggingError::InputTooLarge { .. })) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(message) => json!({
                "success": false,
                "stage": "validation",
                "error": message,
            }),
            AppError::Rejected(rejection) => json!({
                "success": false,
                "stage": "validation",
                "error": rejection.body_text(),
            }),
            AppError::Analysis(e) => {
                if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
                    error!(stage = %e.stage(), error = ?e, "Analysis failed with internal error");
                }
                json!({
                    "success": false,
                    "stage": e.stage(),
                    "error": e.to_string(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation error: {}", errors))
    }
}
