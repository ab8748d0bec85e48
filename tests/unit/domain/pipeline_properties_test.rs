// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newspos::domain::models::token::{PennTag, UniversalTag};
use newspos::domain::services::aggregation_service::{summarize, summarize_universal};
use newspos::domain::services::extraction_service::ExtractionService;
use newspos::domain::services::tagging_service::{LexiconTagger, PosTagger};

const WIRE_STORY: &str = r#"
<html><body>
  <nav>Top stories</nav>
  <article>
    <p>WASHINGTON (Reuters) - The U.S. Senate on Friday passed a $1.2 trillion spending bill, averting a partial government shutdown.</p>
    <p>Lawmakers voted 74-24 after days of talks. The measure now goes to President Biden, who is expected to sign it.</p>
    <p>"This is a good deal for the American people," Senate Majority Leader Chuck Schumer said. Critics weren't convinced.</p>
  </article>
</body></html>
"#;

fn tagger() -> LexiconTagger {
    LexiconTagger::new(1_000_000).unwrap()
}

#[test]
fn test_summary_counts_sum_to_token_count() {
    let text = ExtractionService::new().unwrap().extract(WIRE_STORY).unwrap();
    let tokens = tagger().tag(&text).unwrap();

    assert!(!tokens.is_empty());
    assert_eq!(summarize(&tokens).total(), tokens.len());
    assert_eq!(
        summarize_universal(&tokens)
            .iter()
            .map(|c| c.count)
            .sum::<usize>(),
        tokens.len()
    );
}

#[test]
fn test_tokens_preserve_text_order() {
    let text = ExtractionService::new().unwrap().extract(WIRE_STORY).unwrap();
    let tokens = tagger().tag(&text).unwrap();

    assert_eq!(tokens[0].surface_form, "WASHINGTON");
    let mut cursor = 0;
    for token in &tokens {
        let found = text[cursor..]
            .find(token.surface_form.as_str())
            .unwrap_or_else(|| panic!("token {:?} out of order", token.surface_form));
        cursor += found + token.surface_form.len();
    }
}

#[test]
fn test_newswire_conventions() {
    let tokens = tagger().tag("The U.S. Senate passed a $1.2 trillion bill.").unwrap();
    let pairs: Vec<(&str, PennTag)> = tokens
        .iter()
        .map(|t| (t.surface_form.as_str(), t.pos_tag))
        .collect();

    assert!(pairs.contains(&("U.S.", PennTag::Nnp)));
    assert!(pairs.contains(&("$", PennTag::Dollar)));
    assert!(pairs.contains(&("1.2", PennTag::Cd)));
    assert_eq!(pairs.last(), Some(&(".", PennTag::Period)));
}

#[test]
fn test_every_tag_is_from_the_closed_set() {
    let text = ExtractionService::new().unwrap().extract(WIRE_STORY).unwrap();
    let tokens = tagger().tag(&text).unwrap();

    for token in &tokens {
        assert!(PennTag::ALL.contains(&token.pos_tag));
        assert!(UniversalTag::ALL.contains(&token.pos_tag.universal()));
    }
}
