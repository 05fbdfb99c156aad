//! Answer Checking
//!
//! Typed answers are compared after normalization:
//! - surrounding whitespace is trimmed and inner runs collapse to one space
//! - case is folded unless the session is case sensitive
//! - combining marks are stripped (NFD) unless the session is accent sensitive

use unicode_normalization::UnicodeNormalization;

use crate::types::HINT_RATIO;

/// Normalize an answer for comparison
pub fn normalize(s: &str, case_sensitive: bool, accent_sensitive: bool) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cased = if case_sensitive {
        collapsed
    } else {
        collapsed.to_lowercase()
    };
    if accent_sensitive {
        cased
    } else {
        remove_accents(&cased)
    }
}

fn remove_accents(s: &str) -> String {
    s.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}

/// Whether `given` matches `expected`. Blank input never matches.
pub fn check_answer(
    given: &str,
    expected: &str,
    case_sensitive: bool,
    accent_sensitive: bool,
) -> bool {
    let given = normalize(given, case_sensitive, accent_sensitive);
    if given.is_empty() {
        return false;
    }
    given == normalize(expected, case_sensitive, accent_sensitive)
}

/// Edit distance in characters
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// How close a typed answer is to the expected one, in percent
pub fn similarity(given: &str, expected: &str) -> u8 {
    let a = given.trim().to_lowercase();
    let b = expected.trim().to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let distance = levenshtein(&a, &b);
    ((1.0 - distance as f64 / max_len as f64) * 100.0).round() as u8
}

/// Leading part of the answer followed by an ellipsis
pub fn hint(answer: &str) -> String {
    let len = answer.chars().count();
    let shown = (len as f64 * HINT_RATIO).ceil() as usize;
    let prefix: String = answer.chars().take(shown).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_folding() {
        assert!(check_answer("Maison", "maison", false, true));
        assert!(!check_answer("Maison", "maison", true, true));
    }

    #[test]
    fn test_accent_folding() {
        assert!(check_answer("ecole", "école", false, false));
        assert!(!check_answer("ecole", "école", false, true));
        assert!(check_answer("école", "école", false, true));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert!(check_answer("  la   maison ", "la maison", false, true));
    }

    #[test]
    fn test_blank_never_matches() {
        assert!(!check_answer("   ", "", false, true));
        assert!(!check_answer("", "chat", false, false));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("été", "ete"), 2);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("chat", "chat"), 100);
        assert_eq!(similarity("chot", "chat"), 75);
        assert_eq!(similarity("", ""), 100);
        assert_eq!(similarity("xyz", "chat"), 0);
    }

    #[test]
    fn test_hint() {
        assert_eq!(hint("maison"), "ma...");
        assert_eq!(hint("a"), "a...");
        assert_eq!(hint(""), "...");
        assert_eq!(hint("éléphant"), "élé...");
    }
}
