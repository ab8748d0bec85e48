// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

/// 未知的词性标签代码
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown POS tag code: {0}")]
pub struct UnknownTagError(pub String);

/// 词性标签的公共行为
///
/// 汇总和展示层只依赖这个特质，因此同一套统计逻辑可以同时服务于
/// Penn Treebank 细粒度标签和通用粗粒度标签。
pub trait TagLabel: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// 标签代码，例如 `NN`、`NOUN`
    fn code(&self) -> &'static str;

    /// 人类可读的描述
    fn description(&self) -> &'static str;
}

macro_rules! penn_tags {
    ($($variant:ident => $code:literal, $desc:literal, $universal:ident;)+) => {
        /// Penn Treebank 词性标签
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PennTag {
            $($variant,)+
        }

        impl PennTag {
            /// 所有标签，按定义顺序
            pub const ALL: &'static [PennTag] = &[$(PennTag::$variant,)+];

            /// 标签代码
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(PennTag::$variant => $code,)+
                }
            }

            /// 标签描述
            pub fn describe(&self) -> &'static str {
                match self {
                    $(PennTag::$variant => $desc,)+
                }
            }

            /// 映射到通用标签集
            pub fn universal(&self) -> UniversalTag {
                match self {
                    $(PennTag::$variant => UniversalTag::$universal,)+
                }
            }
        }

        impl FromStr for PennTag {
            type Err = UnknownTagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(PennTag::$variant),)+
                    other => Err(UnknownTagError(other.to_string())),
                }
            }
        }
    };
}

penn_tags! {
    Cc => "CC", "Coordinating conjunction", Conj;
    Cd => "CD", "Cardinal number", Num;
    Dt => "DT", "Determiner", Det;
    Ex => "EX", "Existential there", Det;
    Fw => "FW", "Foreign word", X;
    In => "IN", "Preposition/subordinating conjunction", Adp;
    Jj => "JJ", "Adjective", Adj;
    Jjr => "JJR", "Adjective, comparative", Adj;
    Jjs => "JJS", "Adjective, superlative", Adj;
    Ls => "LS", "List item marker", X;
    Md => "MD", "Modal", Verb;
    Nn => "NN", "Noun, singular", Noun;
    Nns => "NNS", "Noun, plural", Noun;
    Nnp => "NNP", "Proper noun, singular", Noun;
    Nnps => "NNPS", "Proper noun, plural", Noun;
    Pdt => "PDT", "Predeterminer", Det;
    Pos => "POS", "Possessive ending", Prt;
    Prp => "PRP", "Personal pronoun", Pron;
    PrpS => "PRP$", "Possessive pronoun", Pron;
    Rb => "RB", "Adverb", Adv;
    Rbr => "RBR", "Adverb, comparative", Adv;
    Rbs => "RBS", "Adverb, superlative", Adv;
    Rp => "RP", "Particle", Prt;
    Sym => "SYM", "Symbol", X;
    To => "TO", "to", Prt;
    Uh => "UH", "Interjection", X;
    Vb => "VB", "Verb, base form", Verb;
    Vbd => "VBD", "Verb, past tense", Verb;
    Vbg => "VBG", "Verb, gerund/present participle", Verb;
    Vbn => "VBN", "Verb, past participle", Verb;
    Vbp => "VBP", "Verb, non-3rd person singular present", Verb;
    Vbz => "VBZ", "Verb, 3rd person singular present", Verb;
    Wdt => "WDT", "Wh-determiner", Det;
    Wp => "WP", "Wh-pronoun", Pron;
    WpS => "WP$", "Possessive wh-pronoun", Pron;
    Wrb => "WRB", "Wh-adverb", Adv;
    Dollar => "$", "Currency symbol", Punct;
    Hash => "#", "Pound sign", Punct;
    OpenQuote => "``", "Opening quotation mark", Punct;
    CloseQuote => "''", "Closing quotation mark", Punct;
    OpenParen => "(", "Opening bracket", Punct;
    CloseParen => ")", "Closing bracket", Punct;
    Comma => ",", "Comma", Punct;
    Period => ".", "Sentence-final punctuation", Punct;
    Colon => ":", "Colon, semicolon or dash", Punct;
}

impl PennTag {
    /// 是否为标点类标签
    pub fn is_punctuation(&self) -> bool {
        self.universal() == UniversalTag::Punct
    }

    /// 是否为名词类标签
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PennTag::Nn | PennTag::Nns | PennTag::Nnp | PennTag::Nnps
        )
    }

    /// 是否为动词类标签（不含情态动词）
    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            PennTag::Vb
                | PennTag::Vbd
                | PennTag::Vbg
                | PennTag::Vbn
                | PennTag::Vbp
                | PennTag::Vbz
        )
    }
}

impl TagLabel for PennTag {
    fn code(&self) -> &'static str {
        self.as_str()
    }

    fn description(&self) -> &'static str {
        self.describe()
    }
}

impl fmt::Display for PennTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PennTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PennTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// 通用（粗粒度）词性标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UniversalTag {
    Adj,
    Adp,
    Adv,
    Conj,
    Det,
    Noun,
    Num,
    Prt,
    Pron,
    Verb,
    Punct,
    X,
}

impl UniversalTag {
    pub const ALL: &'static [UniversalTag] = &[
        UniversalTag::Adj,
        UniversalTag::Adp,
        UniversalTag::Adv,
        UniversalTag::Conj,
        UniversalTag::Det,
        UniversalTag::Noun,
        UniversalTag::Num,
        UniversalTag::Prt,
        UniversalTag::Pron,
        UniversalTag::Verb,
        UniversalTag::Punct,
        UniversalTag::X,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UniversalTag::Adj => "ADJ",
            UniversalTag::Adp => "ADP",
            UniversalTag::Adv => "ADV",
            UniversalTag::Conj => "CONJ",
            UniversalTag::Det => "DET",
            UniversalTag::Noun => "NOUN",
            UniversalTag::Num => "NUM",
            UniversalTag::Prt => "PRT",
            UniversalTag::Pron => "PRON",
            UniversalTag::Verb => "VERB",
            UniversalTag::Punct => "PUNCT",
            UniversalTag::X => "X",
        }
    }
}

impl TagLabel for UniversalTag {
    fn code(&self) -> &'static str {
        self.as_str()
    }

    fn description(&self) -> &'static str {
        match self {
            UniversalTag::Adj => "Adjective",
            UniversalTag::Adp => "Adposition",
            UniversalTag::Adv => "Adverb",
            UniversalTag::Conj => "Conjunction",
            UniversalTag::Det => "Determiner or article",
            UniversalTag::Noun => "Noun",
            UniversalTag::Num => "Numeral",
            UniversalTag::Prt => "Particle",
            UniversalTag::Pron => "Pronoun",
            UniversalTag::Verb => "Verb",
            UniversalTag::Punct => "Punctuation",
            UniversalTag::X => "Other",
        }
    }
}

impl fmt::Display for UniversalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 标签集粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tagset {
    /// Penn Treebank 细粒度标签
    #[default]
    Penn,
    /// 通用粗粒度标签
    Universal,
}

impl Tagset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tagset::Penn => "penn",
            Tagset::Universal => "universal",
        }
    }
}

/// 词元
///
/// 分词器产出的单个词及其词性标签，按原文顺序排列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// 原文中的表面形式
    pub surface_form: String,
    /// 词性标签
    pub pos_tag: PennTag,
}

impl Token {
    pub fn new(surface_form: impl Into<String>, pos_tag: PennTag) -> Self {
        Self {
            surface_form: surface_form.into(),
            pos_tag,
        }
    }
}
