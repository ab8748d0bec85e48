// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 文章实体
///
/// 由抓取器和提取器共同产出，创建后不可变，请求结束即丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// 文章地址（跟随重定向之后的最终地址）
    pub url: String,
    /// 原始HTML
    #[serde(skip_serializing, default)]
    pub raw_html: String,
    /// 提取出的正文
    pub text: String,
}

impl Article {
    pub fn new(url: impl Into<String>, raw_html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            raw_html: raw_html.into(),
            text: text.into(),
        }
    }

    /// 正文字符数（按 Unicode 标量计数）
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// 正文预览
    ///
    /// 取前 `max_chars` 个字符；被截断时追加 `...`。
    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.text, max_chars)
    }
}

/// 取文本前 `max_chars` 个字符，被截断时追加 `...`
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
