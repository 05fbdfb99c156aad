//! Word list import
//!
//! Accepts the quick-entry format `woord, mot; huis, maison`: pairs are
//! separated by semicolons, the two sides by a comma.

use crate::types::{ItemId, PracticeItem};

/// Parse quick-entry text into `(prompt, answer)` pairs. Pairs with fewer
/// than two sides are skipped; extra sides are ignored.
pub fn parse_vocab_text(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let parts: Vec<&str> = pair.split(',').map(str::trim).collect();
            match parts.as_slice() {
                [prompt, answer, ..] => Some((prompt.to_string(), answer.to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Parse quick-entry text into items numbered from `first_id`
pub fn parse_items(text: &str, first_id: ItemId) -> Vec<PracticeItem> {
    parse_vocab_text(text)
        .into_iter()
        .zip(first_id..)
        .map(|((prompt, answer), id)| PracticeItem::new(id, prompt, answer))
        .collect()
}
