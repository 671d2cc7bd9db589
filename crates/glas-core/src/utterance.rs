//! Utterance normalization.
//!
//! A finalized transcript chunk becomes an [`Utterance`]: lowercased,
//! tokenized, stripped of trailing punctuation and politeness fillers.
//! Every token is kept twice -- as spoken (lowercase, diacritics intact)
//! and folded (diacritics removed). Matchers compare folded tokens and
//! capture the spoken ones, so `"caută școala"` and `"cauta scoala"`
//! match the same template while the captured text keeps its diacritics.

/// Characters stripped from the end of every token.
const TRAILING_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

/// A normalized, tokenized utterance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Utterance {
    tokens: Vec<String>,
    folded: Vec<String>,
}

impl Utterance {
    /// Normalize `raw` without filler removal.
    pub fn new(raw: &str) -> Self {
        Self::with_fillers(raw, &[])
    }

    /// Normalize `raw`, dropping every whole-token occurrence of the given
    /// fillers. Fillers are token sequences in folded form (see [`FillerSet`]).
    pub fn with_fillers(raw: &str, fillers: &[Vec<String>]) -> Self {
        let lowered = raw.to_lowercase();
        let spoken: Vec<String> = lowered
            .split_whitespace()
            .map(|t| t.trim_end_matches(TRAILING_PUNCTUATION))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let folded: Vec<String> = spoken.iter().map(|t| fold_diacritics(t)).collect();

        let mut out = Self::default();
        let mut i = 0;
        while i < spoken.len() {
            let filler_len = fillers
                .iter()
                .find(|f| !f.is_empty() && folded[i..].starts_with(f))
                .map(Vec::len);
            match filler_len {
                Some(len) => i += len,
                None => {
                    out.tokens.push(spoken[i].clone());
                    out.folded.push(folded[i].clone());
                    i += 1;
                }
            }
        }
        out
    }

    /// Lowercase tokens with diacritics intact.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Diacritic-folded tokens, index-aligned with [`tokens`](Self::tokens).
    pub fn folded(&self) -> &[String] {
        &self.folded
    }

    /// Tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Folded tokens joined by single spaces.
    pub fn folded_text(&self) -> String {
        self.folded.join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Filler phrases, pre-tokenized and folded, longest first.
#[derive(Debug, Clone, Default)]
pub struct FillerSet {
    phrases: Vec<Vec<String>>,
}

impl FillerSet {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        let mut phrases: Vec<Vec<String>> = phrases
            .iter()
            .map(|p| Utterance::new(p.as_ref()).folded)
            .filter(|p| !p.is_empty())
            .collect();
        // "te rog frumos" must win over "te rog"
        phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
        Self { phrases }
    }

    /// Normalize `raw` against this filler set.
    pub fn normalize(&self, raw: &str) -> Utterance {
        Utterance::with_fillers(raw, &self.phrases)
    }
}

/// Remove Romanian diacritics (both comma-below and legacy cedilla forms).
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ă' | 'â' => 'a',
            'î' => 'i',
            'ș' | 'ş' => 's',
            'ț' | 'ţ' => 't',
            other => other,
        })
        .collect()
}
