// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::extraction_service::ExtractionError;
use crate::domain::services::tagging_service::TaggingError;
use crate::engines::traits::FetchError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Fetching,
    Extracting,
    Tagging,
    Summarizing,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Fetching => "fetching",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Tagging => "tagging",
            PipelineStage::Summarizing => "summarizing",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分析流水线错误
///
/// 任一阶段失败即中止，不产出部分结果
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Tagging(#[from] TaggingError),

    /// 后台任务异常退出
    #[error("Worker task failed during {stage}: {message}")]
    Worker {
        stage: PipelineStage,
        message: String,
    },
}

impl AnalysisError {
    /// 出错的阶段
    pub fn stage(&self) -> PipelineStage {
        match self {
            AnalysisError::Fetch(_) => PipelineStage::Fetching,
            AnalysisError::Extraction(_) => PipelineStage::Extracting,
            AnalysisError::Tagging(_) => PipelineStage::Tagging,
            AnalysisError::Worker { stage, .. } => *stage,
        }
    }
}
