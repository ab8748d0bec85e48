// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tag_summary::TagSummary;
use crate::domain::models::token::{PennTag, TagLabel, Token, UniversalTag};
use std::collections::HashMap;

/// 按 Penn Treebank 标签统计
pub fn summarize(tokens: &[Token]) -> TagSummary<PennTag> {
    summarize_by(tokens, |tag| tag)
}

/// 按通用标签统计
pub fn summarize_universal(tokens: &[Token]) -> TagSummary<UniversalTag> {
    summarize_by(tokens, |tag| tag.universal())
}

/// 按任意标签投影统计
pub fn summarize_by<T, F>(tokens: &[Token], project: F) -> TagSummary<T>
where
    T: TagLabel,
    F: Fn(PennTag) -> T,
{
    tokens.iter().map(|t| project(t.pos_tag)).collect()
}

/// 每个标签的示例词
///
/// 按原文顺序保留每个标签最先出现的 `per_tag` 个词（不去重）。
#[derive(Debug, Clone)]
pub struct TagSamples<T: TagLabel> {
    samples: HashMap<T, Vec<String>>,
}

impl<T: TagLabel> TagSamples<T> {
    pub fn get(&self, tag: T) -> &[String] {
        self.samples.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// 收集示例词
pub fn collect_samples<T, F>(tokens: &[Token], per_tag: usize, project: F) -> TagSamples<T>
where
    T: TagLabel,
    F: Fn(PennTag) -> T,
{
    let mut samples: HashMap<T, Vec<String>> = HashMap::new();
    for token in tokens {
        let words = samples.entry(project(token.pos_tag)).or_default();
        if words.len() < per_tag {
            words.push(token.surface_form.clone());
        }
    }
    TagSamples { samples }
}
