use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use woordjes_algo::{parse_items, PracticeItem};

/// Word pairs from inline quick-entry text or a file in the same format
pub fn load_words(inline: Option<&str>, file: Option<&Path>) -> Result<Vec<PracticeItem>> {
    let text = match (inline, file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?,
        (Some(_), Some(_)) => bail!("pass either a word list or --file, not both"),
        (None, None) => bail!("no words given; pass `huis, maison; kat, chat` or --file"),
    };

    let items = parse_items(&text, 1);
    if items.is_empty() {
        bail!("the word list contains no `prompt, answer` pairs");
    }
    Ok(items)
}
