// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::TagLabel;
use std::collections::HashMap;

/// 单个标签的计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCount<T> {
    pub tag: T,
    pub count: usize,
}

/// 词性频次汇总
///
/// 条目按首次出现顺序保存，排序时以此作为并列的决胜依据。
/// 所有计数之和恒等于输入词元序列的长度。
#[derive(Debug, Clone)]
pub struct TagSummary<T: TagLabel> {
    entries: Vec<TagCount<T>>,
    index: HashMap<T, usize>,
    total: usize,
}

impl<T: TagLabel> Default for TagSummary<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }
}

impl<T: TagLabel> PartialEq for TagSummary<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: TagLabel> Eq for TagSummary<T> {}

impl<T: TagLabel> TagSummary<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次出现
    pub fn record(&mut self, tag: T) {
        match self.index.get(&tag) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.index.insert(tag, self.entries.len());
                self.entries.push(TagCount { tag, count: 1 });
            }
        }
        self.total += 1;
    }

    /// 某标签的计数，未出现时为0
    pub fn count(&self, tag: T) -> usize {
        self.index
            .get(&tag)
            .map(|&idx| self.entries[idx].count)
            .unwrap_or(0)
    }

    /// 计数总和
    pub fn total(&self) -> usize {
        self.total
    }

    /// 不同标签的数量
    pub fn unique_tags(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按首次出现顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &TagCount<T>> {
        self.entries.iter()
    }

    /// 按计数降序排列，并列时保持首次出现顺序
    pub fn ranked(&self) -> Vec<TagCount<T>> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, so ties keep first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// 排名前 `n` 的标签
    pub fn top(&self, n: usize) -> Vec<TagCount<T>> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// 出现次数最多的标签
    pub fn most_common(&self) -> Option<TagCount<T>> {
        self.ranked().into_iter().next()
    }

    /// 某标签占总数的百分比
    pub fn percentage(&self, tag: T) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(tag) as f64 * 100.0 / self.total as f64
    }
}

impl<T: TagLabel> FromIterator<T> for TagSummary<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut summary = Self::new();
        for tag in iter {
            summary.record(tag);
        }
        summary
    }
}
