// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::analysis_report::ReportOptions;
use crate::config::settings::AnalysisSettings;
use crate::domain::models::token::Tagset;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 文章分析请求数据传输对象
///
/// URL 的语法校验交给抓取器，这里只限制长度
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AnalyzeRequestDto {
    /// 新闻文章 URL
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    /// 标签集，缺省使用配置值
    pub tagset: Option<Tagset>,
    /// 展示的高频标签数
    #[validate(range(min = 1, max = 50))]
    pub top_n: Option<usize>,
    /// 是否返回完整正文
    pub include_text: Option<bool>,
    /// 是否返回逐词标注
    pub include_tokens: Option<bool>,
}

impl AnalyzeRequestDto {
    pub fn options(&self, defaults: &AnalysisSettings) -> ReportOptions {
        ReportOptions {
            tagset: self.tagset.unwrap_or(defaults.tagset),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            samples_per_tag: defaults.samples_per_tag,
            preview_chars: defaults.preview_chars,
            include_text: self.include_text.unwrap_or(false),
            include_tokens: self.include_tokens.unwrap_or(false),
        }
    }
}

/// 文本分析请求数据传输对象
///
/// 跳过抓取和提取，直接标注给定文本
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AnalyzeTextRequestDto {
    /// 待分析文本；可配置的 `max_text_chars` 在标注阶段另行检查
    #[validate(length(max = 10_000_000))]
    pub text: String,
    pub tagset: Option<Tagset>,
    #[validate(range(min = 1, max = 50))]
    pub top_n: Option<usize>,
    pub include_tokens: Option<bool>,
}

impl AnalyzeTextRequestDto {
    pub fn options(&self, defaults: &AnalysisSettings) -> ReportOptions {
        ReportOptions {
            tagset: self.tagset.unwrap_or(defaults.tagset),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            samples_per_tag: defaults.samples_per_tag,
            preview_chars: defaults.preview_chars,
            include_text: false,
            include_tokens: self.include_tokens.unwrap_or(false),
        }
    }
}
