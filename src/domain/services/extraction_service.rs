// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ExtractionSettings;
use crate::domain::models::article::Article;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// 默认的正文候选选择器，按优先级排列
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article-content",
    ".story-content",
    "[class*=\"article\"]",
    "[class*=\"content\"]",
];

/// 默认忽略的样板元素
pub const DEFAULT_IGNORED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "noscript", "template",
];

/// 正文提取错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// 页面中没有可读文本（空页面、付费墙等）
    #[error("No readable text found in page")]
    NoReadableText,

    /// 配置的选择器无法解析
    #[error("Invalid content selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// 提取服务
///
/// 负责从 HTML 内容中剥离脚本、样式和导航等样板内容，提取文章正文。
/// 纯函数，无副作用。
#[derive(Debug)]
pub struct ExtractionService {
    content_selectors: Vec<(String, Selector)>,
    paragraph_selector: Selector,
    ignored_tags: HashSet<String>,
}

impl ExtractionService {
    /// 使用默认选择器和忽略列表创建
    pub fn new() -> Result<Self, ExtractionError> {
        Self::with_rules(DEFAULT_CONTENT_SELECTORS, DEFAULT_IGNORED_TAGS)
    }

    /// 从配置创建
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self, ExtractionError> {
        Self::with_rules(&settings.content_selectors, &settings.ignored_tags)
    }

    /// 使用自定义选择器和忽略列表创建
    pub fn with_rules<S, T>(content_selectors: &[S], ignored_tags: &[T]) -> Result<Self, ExtractionError>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let content_selectors = content_selectors
            .iter()
            .map(|s| Ok((s.as_ref().to_string(), parse_selector(s.as_ref())?)))
            .collect::<Result<Vec<_>, ExtractionError>>()?;

        Ok(Self {
            content_selectors,
            paragraph_selector: parse_selector("p")?,
            ignored_tags: ignored_tags
                .iter()
                .map(|t| t.as_ref().to_ascii_lowercase())
                .collect(),
        })
    }

    /// 提取正文
    ///
    /// 先按候选选择器寻找文章根元素；未命中或根元素无文本时，
    /// 退而拼接所有段落文本。结果为空时返回 [`ExtractionError::NoReadableText`]。
    pub fn extract(&self, raw_html: &str) -> Result<String, ExtractionError> {
        let document = Html::parse_document(raw_html);
        let mut text = String::new();

        for (source, selector) in &self.content_selectors {
            if let Some(root) = document
                .select(selector)
                .find(|el| !self.is_boilerplate(el))
            {
                text = self.collect_text(&root);
                debug!(selector = %source, chars = text.len(), "Article root matched");
                break;
            }
        }

        if text.is_empty() {
            text = document
                .select(&self.paragraph_selector)
                .filter(|el| !self.is_boilerplate(el))
                .map(|el| self.collect_text(&el))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            debug!(chars = text.len(), "Fell back to paragraph text");
        }

        if text.is_empty() {
            return Err(ExtractionError::NoReadableText);
        }
        Ok(text)
    }

    /// 提取正文并构建文章实体
    pub fn extract_article(&self, url: &str, raw_html: String) -> Result<Article, ExtractionError> {
        let text = self.extract(&raw_html)?;
        Ok(Article::new(url, raw_html, text))
    }

    fn is_ignored(&self, node: &Node) -> bool {
        node.as_element()
            .is_some_and(|e| self.ignored_tags.contains(e.name()))
    }

    /// 元素本身或其祖先是样板元素
    fn is_boilerplate(&self, element: &ElementRef<'_>) -> bool {
        self.ignored_tags.contains(element.value().name())
            || element.ancestors().any(|a| self.is_ignored(a.value()))
    }

    /// 拼接元素下的可读文本：逐段去除首尾空白，丢弃空段，以单个空格连接
    fn collect_text(&self, root: &ElementRef<'_>) -> String {
        let mut parts: Vec<String> = Vec::new();

        for node in root.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .ancestors()
                .take_while(|a| a.id() != root.id())
                .any(|a| self.is_ignored(a.value()));
            if hidden {
                continue;
            }

            let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !normalized.is_empty() {
                parts.push(normalized);
            }
        }

        parts.join(" ")
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
