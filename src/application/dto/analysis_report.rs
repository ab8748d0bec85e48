// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::AnalysisSettings;
use crate::domain::models::article::preview;
use crate::domain::models::tag_summary::TagCount;
use crate::domain::models::token::{PennTag, TagLabel, Tagset, Token};
use crate::domain::services::aggregation_service::{collect_samples, summarize_by};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 报告生成选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub tagset: Tagset,
    pub top_n: usize,
    pub samples_per_tag: usize,
    pub preview_chars: usize,
    pub include_text: bool,
    pub include_tokens: bool,
}

impl ReportOptions {
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self {
            tagset: settings.tagset,
            top_n: settings.top_n,
            samples_per_tag: settings.samples_per_tag,
            preview_chars: settings.preview_chars,
            include_text: false,
            include_tokens: false,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_settings(&AnalysisSettings::default())
    }
}

/// 分析报告
///
/// 展示层渲染表格、柱状图和示例词所需的全部数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    /// 文章地址，直接分析文本时为空
    pub url: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub tagset: Tagset,
    /// 正文字符数
    pub total_characters: usize,
    pub text_preview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub metrics: ReportMetrics,
    /// 全部标签，按计数降序
    pub tags: Vec<TagRow>,
    /// 前 N 个标签
    pub top: Vec<TagRow>,
    /// 前 N 个标签的示例词
    pub samples: Vec<TagSampleRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

/// 汇总指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub total_tokens: usize,
    pub unique_tags: usize,
    pub most_common_tag: Option<String>,
}

/// 标签表格的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRow {
    pub tag: String,
    pub description: String,
    pub count: usize,
    /// 占比（百分数，保留两位小数）
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSampleRow {
    pub tag: String,
    pub description: String,
    pub words: Vec<String>,
}

/// 根据正文和标注结果生成报告
///
/// # 参数
///
/// * `url` - 文章地址
/// * `text` - 提取出的正文
/// * `tokens` - 标注结果
/// * `options` - 标签集、前 N 数量、预览长度等
pub fn build_report(
    url: Option<&str>,
    text: &str,
    tokens: Vec<Token>,
    options: &ReportOptions,
) -> AnalysisReport {
    match options.tagset {
        Tagset::Penn => assemble(url, text, tokens, options, |tag| tag),
        Tagset::Universal => assemble(url, text, tokens, options, |tag| tag.universal()),
    }
}

fn assemble<T, F>(
    url: Option<&str>,
    text: &str,
    tokens: Vec<Token>,
    options: &ReportOptions,
    project: F,
) -> AnalysisReport
where
    T: TagLabel,
    F: Fn(PennTag) -> T + Copy,
{
    let summary = summarize_by(&tokens, project);
    let samples = collect_samples(&tokens, options.samples_per_tag, project);
    let total = summary.total();

    let row = |c: &TagCount<T>| TagRow {
        tag: c.tag.code().to_string(),
        description: c.tag.description().to_string(),
        count: c.count,
        percentage: round2(summary.percentage(c.tag)),
    };

    let ranked = summary.ranked();
    let top_counts = &ranked[..options.top_n.min(ranked.len())];

    AnalysisReport {
        id: Uuid::new_v4(),
        url: url.map(str::to_string),
        analyzed_at: Utc::now(),
        tagset: options.tagset,
        total_characters: text.chars().count(),
        text_preview: preview(text, options.preview_chars),
        text: options.include_text.then(|| text.to_string()),
        metrics: ReportMetrics {
            total_tokens: total,
            unique_tags: summary.unique_tags(),
            most_common_tag: summary.most_common().map(|c| c.tag.code().to_string()),
        },
        tags: ranked.iter().map(row).collect(),
        top: top_counts.iter().map(row).collect(),
        samples: top_counts
            .iter()
            .map(|c| TagSampleRow {
                tag: c.tag.code().to_string(),
                description: c.tag.description().to_string(),
                words: samples.get(c.tag).to_vec(),
            })
            .collect(),
        tokens: options.include_tokens.then_some(tokens),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
