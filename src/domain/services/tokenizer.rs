// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 句子与单词切分
//!
//! 采用 Treebank 风格的切分约定：标点独立成词，缩写形式拆分
//! （`don't` → `do` + `n't`），带点缩写（`U.S.`、`Mr.`）保持完整。

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
          (?:\p{L}\.){2,}                                   # dotted abbreviations: U.S., a.m.
        | \p{N}+(?:[.,:/]\p{N}+)*                           # 3.5, 1,000, 10:30, 24/7
        | \p{L}[\p{L}\p{M}\p{N}]*(?:[-'’][\p{L}\p{N}][\p{L}\p{M}\p{N}]*)*
        | \.\.\.
        | --
        | \S
        ",
    )
    .expect("word pattern is valid")
});

/// 称谓缩写，后面总是跟着人名，句点从不结束句子
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "gov", "sen", "rep", "col", "lt", "sgt", "capt",
];

/// 也可能出现在句末的缩写：只有下一个词不是大写开头时才合并句点
const ABBREVIATIONS: &[&str] = &[
    "sr", "jr", "st", "mt", "gen", "inc", "ltd", "co", "corp", "vs", "etc", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "no", "fig", "approx", "dept",
];

/// 可从单词尾部拆分出来的附着形式（撇号之后的部分）
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

/// 句末标点
const TERMINATORS: &[&str] = &[".", "!", "?"];

/// 句末标点之后仍属于当前句子的闭合符号
const TRAILING_CLOSERS: &[&str] = &["\"", "”", "'", "’", ")", "]", "}"];

/// 单个词
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// 原文切片
    pub text: &'a str,
    /// 前面是否紧跟空白（或位于文本开头）
    pub space_before: bool,
}

/// 将文本切分为单词序列
pub fn tokenize_words(text: &str) -> Vec<WordToken<'_>> {
    let matches: Vec<(usize, usize)> = WORD_PATTERN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for (i, &(start, end)) in matches.iter().enumerate() {
        // Fold "Mr" + "." into a single abbreviation token.
        if &text[start..end] == "." {
            if let Some(last) = spans.last_mut() {
                let prev = text[last.0..last.1].to_lowercase();
                let continues_lowercase = matches
                    .get(i + 1)
                    .is_some_and(|&(s, e)| !text[s..e].starts_with(char::is_uppercase));
                let fold = TITLES.contains(&prev.as_str())
                    || (ABBREVIATIONS.contains(&prev.as_str()) && continues_lowercase);
                if last.1 == start && fold {
                    last.1 = end;
                    continue;
                }
            }
        }

        match split_clitic(&text[start..end]) {
            Some(split) => {
                spans.push((start, start + split));
                spans.push((start + split, end));
            }
            None => spans.push((start, end)),
        }
    }

    spans
        .into_iter()
        .map(|(start, end)| WordToken {
            text: &text[start..end],
            space_before: start == 0
                || text[..start]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_whitespace),
        })
        .collect()
}

/// 将文本切分为句子，每个句子是一个单词序列
///
/// 空文本返回空序列。
pub fn split_sentences(text: &str) -> Vec<Vec<WordToken<'_>>> {
    let mut sentences = Vec::new();
    let mut current: Vec<WordToken<'_>> = Vec::new();
    let mut closing = false;

    for token in tokenize_words(text) {
        if closing {
            if TRAILING_CLOSERS.contains(&token.text) && !token.space_before {
                current.push(token);
                continue;
            }
            sentences.push(std::mem::take(&mut current));
            closing = false;
        }

        let is_terminator = TERMINATORS.contains(&token.text);
        current.push(token);
        if is_terminator {
            closing = true;
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// 返回附着形式在单词中的拆分位置（字节偏移）
fn split_clitic(word: &str) -> Option<usize> {
    let (apos, apos_char) = word.char_indices().rfind(|(_, c)| *c == '\'' || *c == '’')?;
    if apos == 0 {
        return None;
    }
    let suffix = word[apos + apos_char.len_utf8()..].to_lowercase();

    if suffix == "t" {
        // n't: split before the "n"
        let (n_idx, n_char) = word[..apos].char_indices().next_back()?;
        if n_idx > 0 && n_char.eq_ignore_ascii_case(&'n') {
            return Some(n_idx);
        }
        return None;
    }

    CLITICS.contains(&suffix.as_str()).then_some(apos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        tokenize_words(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_punctuation_is_split() {
        assert_eq!(words("The cat sat."), vec!["The", "cat", "sat", "."]);
        assert_eq!(
            words("Wait, what?!"),
            vec!["Wait", ",", "what", "?", "!"]
        );
    }

    #[test]
    fn test_contractions_are_split() {
        assert_eq!(words("don't"), vec!["do", "n't"]);
        assert_eq!(words("Can't"), vec!["Ca", "n't"]);
        assert_eq!(words("John's"), vec!["John", "'s"]);
        assert_eq!(words("they’re"), vec!["they", "’re"]);
        assert_eq!(words("O'Brien"), vec!["O'Brien"]);
    }

    #[test]
    fn test_numbers_and_abbreviations_stay_whole() {
        assert_eq!(
            words("Mr. Smith paid $1,200.50 in the U.S. yesterday."),
            vec!["Mr.", "Smith", "paid", "$", "1,200.50", "in", "the", "U.S.", "yesterday", "."]
        );
        assert_eq!(words("H-1B visas"), vec!["H-1B", "visas"]);
    }

    #[test]
    fn test_ambiguous_abbreviation_keeps_sentence_end() {
        assert_eq!(
            words("The answer was no. Then he left."),
            vec!["The", "answer", "was", "no", ".", "Then", "he", "left", "."]
        );
        assert_eq!(split_sentences("The answer was no. Then he left.").len(), 2);
        assert_eq!(split_sentences("Shares of Acme Co. Fell sharply.").len(), 2);
    }

    #[test]
    fn test_ambiguous_abbreviation_folds_mid_sentence() {
        assert_eq!(
            words("Acme Co. said no. 5 was sold"),
            vec!["Acme", "Co.", "said", "no.", "5", "was", "sold"]
        );
        assert_eq!(words("Dr. Who"), vec!["Dr.", "Who"]);
        // nothing follows, so the period ends the text
        assert_eq!(words("and so on etc."), vec!["and", "so", "on", "etc", "."]);
    }

    #[test]
    fn test_space_before_is_tracked() {
        let tokens = tokenize_words("say \"hi\"");
        assert!(tokens[0].space_before);
        assert!(tokens[1].space_before);
        assert!(!tokens[2].space_before);
        assert!(!tokens[3].space_before);
    }

    #[test]
    fn test_sentence_split() {
        let sentences = split_sentences("He left. \"Why?\" she asked. Mr. Lee stayed");
        let texts: Vec<Vec<&str>> = sentences
            .iter()
            .map(|s| s.iter().map(|t| t.text).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                vec!["He", "left", "."],
                vec!["\"", "Why", "?", "\""],
                vec!["she", "asked", "."],
                vec!["Mr.", "Lee", "stayed"],
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }
}
