//! The matcher contract and the phrase matcher.

use std::collections::BTreeMap;
use std::fmt;

use crate::utterance::Utterance;

/// Named captures extracted by a matcher.
pub type Captures = BTreeMap<String, String>;

/// Decides whether an utterance has a given shape.
///
/// `Some` means accepted, carrying whatever the matcher captured (possibly
/// nothing). The matching technique is private to each implementation;
/// the grammar only sees this contract.
pub trait UtteranceMatcher: Send + Sync + fmt::Debug {
    fn matches(&self, utterance: &Utterance) -> Option<Captures>;

    /// Names of the captures this matcher can produce.
    fn capture_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Phrases shorter than this (in characters) are only matched exactly.
const FUZZY_MIN_CHARS: usize = 6;

/// Whole-utterance phrase matcher with optional edit-distance tolerance.
///
/// Exact matches against any alternative are tried before fuzzy ones, so
/// a tolerant phrase never shadows an exact sibling in the same pattern.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    phrases: Vec<String>,
    max_distance: usize,
}

impl PhraseMatcher {
    /// Build from spoken phrases; they are normalized like utterances.
    pub fn new<S: AsRef<str>>(phrases: &[S], max_distance: usize) -> Self {
        let phrases = phrases
            .iter()
            .map(|p| Utterance::new(p.as_ref()).folded_text())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            phrases,
            max_distance,
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl UtteranceMatcher for PhraseMatcher {
    fn matches(&self, utterance: &Utterance) -> Option<Captures> {
        let spoken = utterance.folded_text();
        if spoken.is_empty() {
            return None;
        }
        if self.phrases.iter().any(|p| *p == spoken) {
            return Some(Captures::new());
        }
        if self.max_distance == 0 {
            return None;
        }
        self.phrases
            .iter()
            .filter(|p| p.chars().count() >= FUZZY_MIN_CHARS)
            .any(|p| levenshtein_distance(&spoken, p) <= self.max_distance)
            .then(Captures::new)
    }
}

/// Levenshtein (edit) distance between two strings, by characters.
///
/// Two-row dynamic programming. Used to tolerate small transcription
/// errors in static phrases.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_phrase_matches() {
        let m = PhraseMatcher::new(&["ajutor", "cum folosesc"], 0);
        assert!(m.matches(&Utterance::new("Ajutor")).is_some());
        assert!(m.matches(&Utterance::new("cum folosesc?")).is_some());
        assert!(m.matches(&Utterance::new("ajutor acum")).is_none());
    }

    #[test]
    fn phrase_ignores_diacritics() {
        let m = PhraseMatcher::new(&["du-mă la facturi"], 0);
        assert!(m.matches(&Utterance::new("du-ma la facturi")).is_some());
    }

    #[test]
    fn fuzzy_within_distance() {
        let m = PhraseMatcher::new(&["factură nouă"], 1);
        assert!(m.matches(&Utterance::new("factura noua")).is_some());
        assert!(m.matches(&Utterance::new("factura nou")).is_some());
        assert!(m.matches(&Utterance::new("factura n")).is_none());
    }

    #[test]
    fn short_phrases_are_never_fuzzy() {
        let m = PhraseMatcher::new(&["stop"], 2);
        assert!(m.matches(&Utterance::new("stop")).is_some());
        assert!(m.matches(&Utterance::new("stol")).is_none());
    }

    #[test]
    fn empty_utterance_never_matches() {
        let m = PhraseMatcher::new(&["ajutor"], 3);
        assert!(m.matches(&Utterance::new("   ")).is_none());
    }

    #[test]
    fn levenshtein_identical_strings() {
        assert_eq!(levenshtein_distance("facturi", "facturi"), 0);
    }

    #[test]
    fn levenshtein_single_edits() {
        assert_eq!(levenshtein_distance("rapoarte", "rapoart"), 1);
        assert_eq!(levenshtein_distance("plati", "plata"), 1);
        assert_eq!(levenshtein_distance("tva", "tvaa"), 1);
    }

    #[test]
    fn levenshtein_counts_characters_not_bytes() {
        assert_eq!(levenshtein_distance("plăți", "plati"), 2);
    }

    #[test]
    fn levenshtein_empty_strings() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }
}
