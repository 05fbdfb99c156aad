//! Multiple Choice Questions
//!
//! One correct answer plus up to three distractors. A frequently given
//! wrong answer is mixed in now and then; the rest are other answers from
//! the same set.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, PracticeItem};

/// Distractors shown next to the correct answer
pub const DISTRACTOR_COUNT: usize = 3;

/// Chance that the most common wrong answer is offered
pub const COMMON_MISTAKE_PROBABILITY: f64 = 0.4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub item_id: ItemId,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    /// Distractors, in display order
    pub fn distractors(&self) -> impl Iterator<Item = &String> {
        self.options.iter().filter(move |o| **o != self.correct_answer)
    }
}

/// Build a question for `item`.
///
/// `common_mistakes` are wrong answers given for this item before, most
/// frequent first; only the first one is ever used.
pub fn build_question<R: Rng + ?Sized>(
    item: &PracticeItem,
    pool: &[PracticeItem],
    common_mistakes: &[String],
    rng: &mut R,
) -> ChoiceQuestion {
    let correct = &item.answer;
    let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);

    if let Some(mistake) = common_mistakes.first() {
        if mistake != correct && rng.gen_bool(COMMON_MISTAKE_PROBABILITY) {
            distractors.push(mistake.clone());
        }
    }

    let mut others: Vec<&String> = pool
        .iter()
        .filter(|w| w.id != item.id && w.answer != *correct)
        .map(|w| &w.answer)
        .collect();
    others.shuffle(rng);

    for answer in others {
        if distractors.len() >= DISTRACTOR_COUNT {
            break;
        }
        if !distractors.contains(answer) {
            distractors.push(answer.clone());
        }
    }

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.clone());
    options.extend(distractors);
    options.shuffle(rng);

    ChoiceQuestion {
        item_id: item.id,
        prompt: item.prompt.clone(),
        correct_answer: correct.clone(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pool() -> Vec<PracticeItem> {
        vec![
            PracticeItem::new(1, "hond", "chien"),
            PracticeItem::new(2, "kat", "chat"),
            PracticeItem::new(3, "vis", "poisson"),
            PracticeItem::new(4, "paard", "cheval"),
            PracticeItem::new(5, "poes", "chat"),
        ]
    }

    #[test]
    fn test_four_unique_options() {
        let words = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let q = build_question(&words[0], &words, &[], &mut rng);
        assert_eq!(q.options.len(), 4);
        assert!(q.options.contains(&"chien".to_string()));
        let mut sorted = q.options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
        assert!(q.is_correct("chien"));
        assert!(!q.is_correct("chat"));
    }

    #[test]
    fn test_same_answer_is_not_a_distractor() {
        let words = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let q = build_question(&words[1], &words, &[], &mut rng);
            assert_eq!(q.options.iter().filter(|o| *o == "chat").count(), 1);
            assert_eq!(q.options.len(), 4);
        }
    }

    #[test]
    fn test_small_set_has_fewer_options() {
        let words = vec![PracticeItem::new(1, "ja", "oui"), PracticeItem::new(2, "nee", "non")];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let q = build_question(&words[0], &words, &[], &mut rng);
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.distractors().count(), 1);
    }

    #[test]
    fn test_common_mistake_shows_up_sometimes() {
        let words = pool();
        let mistakes = vec!["chienne".to_string(), "cheval".to_string()];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let shown = (0..200)
            .filter(|_| {
                build_question(&words[0], &words, &mistakes, &mut rng)
                    .options
                    .contains(&"chienne".to_string())
            })
            .count();
        assert!(shown > 40 && shown < 120, "shown {shown} of 200");
    }
}
