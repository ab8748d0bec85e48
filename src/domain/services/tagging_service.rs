// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::{PennTag, Token, UnknownTagError};
use crate::domain::services::lexicon::Lexicon;
use crate::domain::services::tokenizer::{split_sentences, WordToken};
use thiserror::Error;
use tracing::debug;

/// 词性标注错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    /// 输入超过允许的长度
    #[error("Input too large for tagging: {chars} characters (max {max})")]
    InputTooLarge { chars: usize, max: usize },

    /// 外部传入的标签代码无法识别
    #[error(transparent)]
    UnknownTag(#[from] UnknownTagError),

    /// 标注模型不可用
    #[error("Tagger model unavailable: {0}")]
    ModelUnavailable(String),
}

/// 词性标注器特质
///
/// 相同模型、相同输入必须产出相同结果。空文本返回空序列。
pub trait PosTagger: Send + Sync {
    /// 对文本进行分句、分词和词性标注
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError>;

    /// 标注器名称
    fn name(&self) -> &'static str;
}

/// 把外部标注器产出的 (词, 标签代码) 对转换为词元
///
/// 标签代码在此处校验，未知代码返回 [`TaggingError::UnknownTag`]。
pub fn tokens_from_pairs<W, C, I>(pairs: I) -> Result<Vec<Token>, TaggingError>
where
    W: Into<String>,
    C: AsRef<str>,
    I: IntoIterator<Item = (W, C)>,
{
    pairs
        .into_iter()
        .map(|(word, code)| Ok(Token::new(word, code.as_ref().parse::<PennTag>()?)))
        .collect()
}

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve", "’ve"];
const BE_FORMS: &[&str] = &[
    "be", "is", "are", "was", "were", "been", "being", "am", "'re", "’re", "'m", "’m",
];
const DO_FORMS: &[&str] = &["do", "does", "did"];
const THIRD_PERSON: &[&str] = &["he", "she", "it"];

const NOUN_SUFFIXES: &[&str] = &[
    "ness", "ment", "tion", "sion", "ity", "ship", "ance", "ence", "ism", "ist", "hood", "dom",
    "ery", "er", "or",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "ical", "ic", "less", "ish", "ary", "ant", "ent", "al",
    "ian",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify"];

/// 基于词典与规则的词性标注器
///
/// 处理流程：
/// 1. 分句、分词
/// 2. 词典查询，未登录词按大小写和后缀猜测候选标签
/// 3. 在候选范围内应用上下文修正规则
pub struct LexiconTagger {
    lexicon: &'static Lexicon,
    max_text_chars: usize,
}

/// 句内单个位置的标注状态
struct Slot<'a> {
    word: &'a str,
    lower: String,
    allowed: Vec<PennTag>,
    tag: PennTag,
    known: bool,
}

impl<'a> Slot<'a> {
    fn allows(&self, tag: PennTag) -> bool {
        self.allowed.contains(&tag)
    }
}

impl LexiconTagger {
    /// 使用内置词典创建标注器
    pub fn new(max_text_chars: usize) -> Result<Self, TaggingError> {
        let lexicon =
            Lexicon::bundled().map_err(|e| TaggingError::ModelUnavailable(e.to_string()))?;
        Ok(Self::with_lexicon(lexicon, max_text_chars))
    }

    /// 使用指定词典创建标注器
    pub fn with_lexicon(lexicon: &'static Lexicon, max_text_chars: usize) -> Self {
        Self {
            lexicon,
            max_text_chars,
        }
    }

    fn tag_sentence(&self, words: &[WordToken<'_>], out: &mut Vec<Token>) {
        let mut slots: Vec<Slot<'_>> = Vec::with_capacity(words.len());
        let mut at_start = true;

        for word in words {
            let slot = self.initial_slot(word, at_start);
            if !slot.tag.is_punctuation() {
                at_start = false;
            }
            slots.push(slot);
        }

        apply_context_rules(&mut slots);

        out.extend(slots.into_iter().map(|s| Token::new(s.word, s.tag)));
    }

    fn initial_slot<'a>(&self, word: &WordToken<'a>, sentence_start: bool) -> Slot<'a> {
        let text = word.text;
        let lower = text.to_lowercase();

        let (allowed, known) = if !text.chars().any(char::is_alphanumeric) {
            (vec![punctuation_tag(text, word.space_before)], true)
        } else if let Some(tags) = clitic_tags(&lower) {
            (tags, true)
        } else if text.starts_with(|c: char| c.is_numeric()) {
            (vec![PennTag::Cd], true)
        } else if let Some(tags) = self.lexicon.lookup(&lower) {
            let capitalized = text.starts_with(char::is_uppercase);
            if capitalized
                && !sentence_start
                && is_open_class(tags[0])
                && !matches!(tags[0], PennTag::Nnp | PennTag::Nnps)
            {
                (vec![PennTag::Nnp], true)
            } else {
                (tags.to_vec(), true)
            }
        } else {
            (guess_unknown(text, &lower, sentence_start), false)
        };

        Slot {
            word: text,
            lower,
            tag: allowed[0],
            allowed,
            known,
        }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<Token>, TaggingError> {
        let chars = text.chars().count();
        if chars > self.max_text_chars {
            return Err(TaggingError::InputTooLarge {
                chars,
                max: self.max_text_chars,
            });
        }

        let sentences = split_sentences(text);
        let mut tokens = Vec::new();
        for sentence in &sentences {
            self.tag_sentence(sentence, &mut tokens);
        }

        debug!(
            sentences = sentences.len(),
            tokens = tokens.len(),
            "Text tagged"
        );
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

fn punctuation_tag(text: &str, space_before: bool) -> PennTag {
    match text {
        "." | "!" | "?" => PennTag::Period,
        "," => PennTag::Comma,
        ":" | ";" | "..." | "…" | "--" | "-" | "–" | "—" => PennTag::Colon,
        "(" | "[" | "{" => PennTag::OpenParen,
        ")" | "]" | "}" => PennTag::CloseParen,
        "$" | "€" | "£" | "¥" => PennTag::Dollar,
        "#" => PennTag::Hash,
        "``" | "“" | "‘" => PennTag::OpenQuote,
        "''" | "”" | "’" => PennTag::CloseQuote,
        "\"" | "'" if space_before => PennTag::OpenQuote,
        "\"" | "'" => PennTag::CloseQuote,
        _ => PennTag::Sym,
    }
}

fn clitic_tags(lower: &str) -> Option<Vec<PennTag>> {
    let normalized = lower.replace('’', "'");
    let tags = match normalized.as_str() {
        "n't" => vec![PennTag::Rb],
        "'s" => vec![PennTag::Pos, PennTag::Vbz],
        "'re" | "'m" | "'ve" => vec![PennTag::Vbp],
        "'ll" => vec![PennTag::Md],
        "'d" => vec![PennTag::Md, PennTag::Vbd],
        _ => return None,
    };
    Some(tags)
}

fn is_open_class(tag: PennTag) -> bool {
    tag.is_noun()
        || tag.is_verb()
        || matches!(
            tag,
            PennTag::Jj | PennTag::Jjr | PennTag::Jjs | PennTag::Rb
        )
}

/// 未登录词的候选标签
fn guess_unknown(text: &str, lower: &str, sentence_start: bool) -> Vec<PennTag> {
    let capitalized = text.starts_with(char::is_uppercase);
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();

    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return vec![PennTag::Nnp];
    }
    if capitalized && !sentence_start {
        return vec![PennTag::Nnp];
    }
    if text.chars().any(|c| c.is_numeric()) {
        return vec![if capitalized { PennTag::Nnp } else { PennTag::Nn }];
    }

    match suffix_guess(lower) {
        Some(tags) => tags,
        None if capitalized => vec![PennTag::Nnp],
        None => vec![PennTag::Nn, PennTag::Vb, PennTag::Vbp],
    }
}

fn suffix_guess(lower: &str) -> Option<Vec<PennTag>> {
    let len = lower.chars().count();

    if lower.contains('-') {
        return Some(vec![PennTag::Jj, PennTag::Nn]);
    }
    if len > 4 && lower.ends_with("ly") {
        return Some(vec![PennTag::Rb, PennTag::Jj]);
    }
    if len > 5 && lower.ends_with("ing") {
        return Some(vec![PennTag::Vbg, PennTag::Nn, PennTag::Jj]);
    }
    if len > 4 && lower.ends_with("ed") {
        return Some(vec![PennTag::Vbd, PennTag::Vbn, PennTag::Jj]);
    }
    if len > 5 && lower.ends_with("est") {
        return Some(vec![PennTag::Jjs]);
    }
    if len > 3
        && lower.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    {
        return Some(vec![PennTag::Nns, PennTag::Vbz]);
    }
    if NOUN_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return Some(vec![PennTag::Nn]);
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return Some(vec![PennTag::Jj]);
    }
    if VERB_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return Some(vec![PennTag::Vb, PennTag::Vbp]);
    }
    None
}

/// 在候选范围内按上下文修正标签，从左到右，左侧使用已修正的标签
fn apply_context_rules(slots: &mut [Slot<'_>]) {
    for i in 0..slots.len() {
        let prev = i.checked_sub(1).map(|j| slots[j].tag);
        let prev2 = i.checked_sub(2).map(|j| slots[j].tag);
        let prev_lower = i.checked_sub(1).map(|j| slots[j].lower.as_str());
        let next = slots.get(i + 1).map(|s| s.tag);
        let have_or_be_before = auxiliary_before(slots, i);

        let after_infinitive_marker = matches!(prev, Some(PennTag::To | PennTag::Md))
            || (prev == Some(PennTag::Rb) && matches!(prev2, Some(PennTag::To | PennTag::Md)))
            || prev_lower.is_some_and(|w| DO_FORMS.contains(&w) || w == "n't" || w == "not");
        let third_person = prev_lower.is_some_and(|w| THIRD_PERSON.contains(&w));

        let slot = &mut slots[i];

        match slot.lower.as_str() {
            "that" => {
                slot.tag = if prev.is_some_and(|t| t.is_noun())
                    && next.is_some_and(|t| t.is_verb() || t == PennTag::Md)
                {
                    PennTag::Wdt
                } else if next.is_some_and(|t| t.is_noun() || t == PennTag::Jj)
                    && !prev.is_some_and(|t| t.is_verb())
                {
                    PennTag::Dt
                } else {
                    PennTag::In
                };
                continue;
            }
            "'s" | "’s" => {
                slot.tag = if matches!(
                    prev,
                    Some(PennTag::Prp | PennTag::Ex | PennTag::Wp | PennTag::Wdt)
                ) || matches!(
                    next,
                    Some(PennTag::Vbg | PennTag::Vbn | PennTag::Rb | PennTag::Dt)
                ) {
                    PennTag::Vbz
                } else {
                    PennTag::Pos
                };
                continue;
            }
            "there" => {
                slot.tag = if next.is_some_and(|t| t.is_verb() || t == PennTag::Md) {
                    PennTag::Ex
                } else {
                    PennTag::Rb
                };
                continue;
            }
            _ => {}
        }

        // to / modal / do-support + base form
        if after_infinitive_marker && slot.allows(PennTag::Vb) {
            slot.tag = PennTag::Vb;
            continue;
        }

        // perfect and passive participles
        if slot.tag == PennTag::Vbd && slot.allows(PennTag::Vbn) && have_or_be_before {
            slot.tag = PennTag::Vbn;
            continue;
        }

        // a verb reading right after a determiner or modifier is a noun or adjective
        if slot.tag.is_verb()
            && matches!(
                prev,
                Some(
                    PennTag::Dt
                        | PennTag::PrpS
                        | PennTag::Jj
                        | PennTag::Jjr
                        | PennTag::Jjs
                        | PennTag::Pos
                        | PennTag::Cd
                        | PennTag::WpS
                        | PennTag::Pdt
                )
            )
        {
            if slot.allows(PennTag::Nn) {
                slot.tag = PennTag::Nn;
            } else if slot.allows(PennTag::Nns) {
                slot.tag = PennTag::Nns;
            } else if !slot.known && matches!(slot.tag, PennTag::Vbd | PennTag::Vbn) {
                slot.tag = PennTag::Jj;
            } else if !slot.known && slot.tag == PennTag::Vbg {
                slot.tag = if next.is_some_and(|t| t.is_noun()) {
                    PennTag::Jj
                } else {
                    PennTag::Nn
                };
            }
            continue;
        }

        // subject pronoun + present tense
        if prev == Some(PennTag::Prp) && slot.tag != PennTag::Vbd {
            if third_person && slot.allows(PennTag::Vbz) {
                slot.tag = PennTag::Vbz;
                continue;
            }
            if !third_person && slot.allows(PennTag::Vbp) {
                slot.tag = PennTag::Vbp;
                continue;
            }
        }

        // noun subject + present tense verb followed by an object or complement
        let object_follows = matches!(
            next,
            Some(
                PennTag::To
                    | PennTag::Dt
                    | PennTag::PrpS
                    | PennTag::Prp
                    | PennTag::In
                    | PennTag::Cd
                    | PennTag::Rb
            )
        );
        if object_follows {
            if matches!(prev, Some(PennTag::Nnp | PennTag::Nn | PennTag::Wdt | PennTag::Wp))
                && slot.tag == PennTag::Nns
                && slot.allows(PennTag::Vbz)
            {
                slot.tag = PennTag::Vbz;
                continue;
            }
            if matches!(prev, Some(PennTag::Nns | PennTag::Nnps | PennTag::Wdt | PennTag::Wp))
                && matches!(slot.tag, PennTag::Nn | PennTag::Vb)
                && slot.allows(PennTag::Vbp)
            {
                slot.tag = PennTag::Vbp;
                continue;
            }
        }

        // bare base form outside infinitive context reads as present tense
        if slot.tag == PennTag::Vb && i > 0 && slot.allows(PennTag::Vbp) {
            slot.tag = PennTag::Vbp;
            continue;
        }

        // verb particle at the end of a clause
        if slot.tag == PennTag::In
            && slot.allows(PennTag::Rp)
            && prev.is_some_and(|t| t.is_verb())
            && next.map_or(true, |t| t.is_punctuation())
        {
            slot.tag = PennTag::Rp;
        }
    }
}

/// 向左跳过副词，检查是否紧跟在 have/be 形式之后
fn auxiliary_before(slots: &[Slot<'_>], i: usize) -> bool {
    slots[..i]
        .iter()
        .rev()
        .take(4)
        .find(|s| s.tag != PennTag::Rb)
        .is_some_and(|s| {
            HAVE_FORMS.contains(&s.lower.as_str())
                || BE_FORMS.contains(&s.lower.as_str())
                || (matches!(s.lower.as_str(), "'s" | "’s") && s.tag == PennTag::Vbz)
        })
}

#[cfg(test)]
#[path = "tagging_service_test.rs"]
mod tests;
