// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::{PennTag, UnknownTagError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// 随程序一起分发的词典资源
const BUNDLED_LEXICON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/lexicon.txt"
));

static BUNDLED: Lazy<Result<Lexicon, LexiconError>> = Lazy::new(|| {
    let lexicon = Lexicon::parse(BUNDLED_LEXICON)?;
    info!(entries = lexicon.len(), "Tagger lexicon loaded");
    Ok(lexicon)
});

/// 词典解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    #[error("line {line}: no tags given for '{word}'")]
    MissingTags { line: usize, word: String },

    #[error("line {line}: {source}")]
    UnknownTag {
        line: usize,
        #[source]
        source: UnknownTagError,
    },
}

/// 词性词典
///
/// 小写词形 → 可能的标签列表，首个标签为最常见的读法。
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<PennTag>>,
}

impl Lexicon {
    /// 解析词典文本
    ///
    /// 每行 `词 标签 [标签...]`，`#` 开头为注释。重复的词以首次出现为准。
    pub fn parse(source: &str) -> Result<Self, LexiconError> {
        let mut entries = HashMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };

            let tags = fields
                .map(|code| {
                    code.parse::<PennTag>()
                        .map_err(|source| LexiconError::UnknownTag {
                            line: idx + 1,
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if tags.is_empty() {
                return Err(LexiconError::MissingTags {
                    line: idx + 1,
                    word: word.to_string(),
                });
            }

            entries.entry(word.to_lowercase()).or_insert(tags);
        }

        Ok(Self { entries })
    }

    /// 进程级共享的内置词典，首次使用时加载
    pub fn bundled() -> Result<&'static Lexicon, &'static LexiconError> {
        Lazy::force(&BUNDLED).as_ref()
    }

    /// 查询小写词形
    pub fn lookup(&self, lower: &str) -> Option<&[PennTag]> {
        self.entries.get(lower).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
