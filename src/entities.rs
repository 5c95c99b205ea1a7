//! Entity tagging collaborators.

use crate::model::EntityMention;

pub const PROPER_NOUN: &str = "PROPN";
pub const DATE: &str = "DATE";
pub const CARDINAL: &str = "CARDINAL";

/// Finds named entities in (already filtered) text.
pub trait EntityTagger {
    fn tag(&self, text: &str) -> Vec<EntityMention>;
}

/// Capitalized runs become proper nouns, four-digit years dates, and other
/// numbers cardinals.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEntityTagger;

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn numeric_category(word: &str) -> Option<&'static str> {
    if word.is_empty() || !word.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let looks_like_year = word.len() == 4 && matches!(word.as_bytes()[0], b'1' | b'2');
    Some(if looks_like_year { DATE } else { CARDINAL })
}

impl EntityTagger for HeuristicEntityTagger {
    fn tag(&self, text: &str) -> Vec<EntityMention> {
        fn flush(run: &mut Vec<&str>, entities: &mut Vec<EntityMention>) {
            if !run.is_empty() {
                entities.push(EntityMention::new(run.join(" "), PROPER_NOUN));
                run.clear();
            }
        }

        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for word in text.split_whitespace() {
            if let Some(category) = numeric_category(word) {
                flush(&mut run, &mut entities);
                entities.push(EntityMention::new(word, category));
            } else if is_capitalized(word) {
                run.push(word);
            } else {
                flush(&mut run, &mut entities);
            }
        }
        flush(&mut run, &mut entities);

        entities
    }
}
