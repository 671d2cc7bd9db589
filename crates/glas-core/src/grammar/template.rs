//! Structured token templates.
//!
//! A template is a whitespace-separated sequence of segments:
//!
//! | Segment | Accepts |
//! |---------|---------|
//! | `word` | that word (diacritics ignored) |
//! | `{name}` | one or more remaining tokens; must be the last segment |
//! | `{name:number}` | one numeral token, `25`, `25,50`, `3.75` |
//! | `{name:currency}` | one currency word, `lei`, `euro`, `usd`, ... |
//!
//! A `?` after a capture, outside or inside the braces (`{currency:currency}?`,
//! `{currency:currency?}`), makes it optional.
//! Templates are anchored at both ends.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use glas_types::binding::currency_code;
use glas_types::{GlasError, Result};
use regex::Regex;

use super::matcher::{Captures, UtteranceMatcher};
use crate::utterance::{Utterance, fold_diacritics};

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:[.,][0-9]+)?$").expect("numeral regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    Text,
    Number,
    Currency,
}

impl CaptureKind {
    fn accepts(&self, folded: &str) -> bool {
        match self {
            Self::Text => true,
            Self::Number => NUMERAL.is_match(folded),
            Self::Currency => currency_code(folded).is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Word(String),
    Capture {
        name: String,
        kind: CaptureKind,
        optional: bool,
    },
}

/// One compiled template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a template, rejecting malformed captures.
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: String| GlasError::TemplateInvalid {
            pattern: source.to_string(),
            reason,
        };

        let lowered = source.to_lowercase();
        let raw_segments: Vec<&str> = lowered.split_whitespace().collect();
        if raw_segments.is_empty() {
            return Err(invalid("template is empty".into()));
        }

        let mut segments = Vec::with_capacity(raw_segments.len());
        let mut names = BTreeSet::new();
        for (idx, raw) in raw_segments.iter().enumerate() {
            if !raw.starts_with('{') {
                if raw.contains(['{', '}']) {
                    return Err(invalid(format!("stray brace in `{raw}`")));
                }
                segments.push(Segment::Word(fold_diacritics(raw)));
                continue;
            }

            let (body, optional) = if let Some(body) = raw.strip_suffix("}?") {
                (body, true)
            } else if let Some(body) = raw.strip_suffix('}') {
                (body, false)
            } else {
                return Err(invalid(format!("unclosed capture `{raw}`")));
            };
            let body = &body[1..];
            let (body, optional) = match body.strip_suffix('?') {
                Some(inner) => (inner, true),
                None => (body, optional),
            };

            let (name, kind) = match body.split_once(':') {
                None => (body, CaptureKind::Text),
                Some((name, "text")) => (name, CaptureKind::Text),
                Some((name, "number")) => (name, CaptureKind::Number),
                Some((name, "currency")) => (name, CaptureKind::Currency),
                Some((_, other)) => {
                    return Err(invalid(format!("unknown capture kind `{other}`")));
                }
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid(format!("bad capture name `{name}`")));
            }
            if kind == CaptureKind::Text && idx + 1 != raw_segments.len() {
                return Err(invalid(format!("text capture `{name}` must be last")));
            }
            if !names.insert(name.to_string()) {
                return Err(invalid(format!("capture `{name}` declared twice")));
            }

            segments.push(Segment::Capture {
                name: name.to_string(),
                kind,
                optional,
            });
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of all captures, in declaration order.
    pub fn capture_names(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Capture { name, .. } => Some(name.clone()),
                Segment::Word(_) => None,
            })
            .collect()
    }

    fn matches(&self, utterance: &Utterance) -> Option<Captures> {
        let mut captures = Captures::new();
        self.match_from(0, 0, utterance, &mut captures)
            .then_some(captures)
    }

    fn match_from(
        &self,
        seg: usize,
        pos: usize,
        utterance: &Utterance,
        captures: &mut Captures,
    ) -> bool {
        let tokens = utterance.tokens();
        let folded = utterance.folded();

        let Some(segment) = self.segments.get(seg) else {
            return pos == folded.len();
        };

        match segment {
            Segment::Word(word) => {
                pos < folded.len()
                    && folded[pos] == *word
                    && self.match_from(seg + 1, pos + 1, utterance, captures)
            }
            Segment::Capture {
                name,
                kind: CaptureKind::Text,
                optional,
            } => {
                if pos < tokens.len() {
                    captures.insert(name.clone(), tokens[pos..].join(" "));
                    true
                } else {
                    *optional
                }
            }
            Segment::Capture {
                name,
                kind,
                optional,
            } => {
                if pos < folded.len() && kind.accepts(&folded[pos]) {
                    let value = match kind {
                        CaptureKind::Currency => folded[pos].clone(),
                        _ => tokens[pos].clone(),
                    };
                    captures.insert(name.clone(), value);
                    if self.match_from(seg + 1, pos + 1, utterance, captures) {
                        return true;
                    }
                    captures.remove(name);
                }
                *optional && self.match_from(seg + 1, pos, utterance, captures)
            }
        }
    }
}

/// Matcher over one or more templates; the first accepting template wins.
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    templates: Vec<Template>,
}

impl TemplateMatcher {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Compile every source string.
    pub fn parse<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let templates = sources
            .iter()
            .map(|s| Template::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(templates))
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}

impl UtteranceMatcher for TemplateMatcher {
    fn matches(&self, utterance: &Utterance) -> Option<Captures> {
        self.templates.iter().find_map(|t| t.matches(utterance))
    }

    fn capture_names(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .templates
            .iter()
            .flat_map(Template::capture_names)
            .collect();
        names.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(sources: &[&str]) -> TemplateMatcher {
        TemplateMatcher::parse(sources).unwrap()
    }

    #[test]
    fn literal_template_is_anchored() {
        let m = matcher(&["raport tva"]);
        assert!(m.matches(&Utterance::new("raport TVA")).is_some());
        assert!(m.matches(&Utterance::new("raport tva lunar")).is_none());
        assert!(m.matches(&Utterance::new("un raport tva")).is_none());
    }

    #[test]
    fn text_capture_takes_the_rest_as_spoken() {
        let m = matcher(&["caută {query}"]);
        let caps = m.matches(&Utterance::new("Caută factura 123")).unwrap();
        assert_eq!(caps["query"], "factura 123");

        let caps = m.matches(&Utterance::new("cauta școala nouă")).unwrap();
        assert_eq!(caps["query"], "școala nouă");
    }

    #[test]
    fn text_capture_needs_a_token() {
        let m = matcher(&["caută {query}"]);
        assert!(m.matches(&Utterance::new("caută")).is_none());
    }

    #[test]
    fn optional_text_capture_may_be_empty() {
        let m = matcher(&["ajutor {topic}?"]);
        assert!(m.matches(&Utterance::new("ajutor")).unwrap().is_empty());
        assert_eq!(m.matches(&Utterance::new("ajutor facturi")).unwrap()["topic"], "facturi");
    }

    #[test]
    fn number_and_optional_currency() {
        let m = matcher(&["{value:number} {currency:currency}?"]);

        let caps = m.matches(&Utterance::new("25,50 lei")).unwrap();
        assert_eq!(caps["value"], "25,50");
        assert_eq!(caps["currency"], "lei");

        let caps = m.matches(&Utterance::new("1000")).unwrap();
        assert_eq!(caps["value"], "1000");
        assert!(!caps.contains_key("currency"));

        assert!(m.matches(&Utterance::new("douăzeci lei")).is_none());
        assert!(m.matches(&Utterance::new("25 mere")).is_none());
    }

    #[test]
    fn optional_marker_inside_braces() {
        let m = matcher(&["{value:number} {currency:currency?}"]);
        assert!(m.matches(&Utterance::new("40")).is_some());
        assert_eq!(m.matches(&Utterance::new("40 euro")).unwrap()["currency"], "euro");
    }

    #[test]
    fn optional_capture_backtracks_into_following_word() {
        let m = matcher(&["plată {amount:number}? acum"]);
        assert!(m.matches(&Utterance::new("plată acum")).is_some());
        assert_eq!(m.matches(&Utterance::new("plată 40 acum")).unwrap()["amount"], "40");
    }

    #[test]
    fn first_accepting_template_wins() {
        let m = matcher(&["tva pentru {amount:number}", "tva {what}"]);
        let caps = m.matches(&Utterance::new("tva pentru 100")).unwrap();
        assert_eq!(caps["amount"], "100");
        assert!(!caps.contains_key("what"));
    }

    #[test]
    fn capture_names_are_collected() {
        let m = matcher(&["tva pentru {amount:number} {currency:currency}?", "tva {what}"]);
        assert_eq!(m.capture_names(), vec!["amount", "currency", "what"]);
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for bad in [
            "",
            "caută {query",
            "caută {}",
            "caută {query:date}",
            "{rest} la facturi",
            "{a:number} {a:number}",
            "tva}",
            "{na me}",
        ] {
            assert!(Template::parse(bad).is_err(), "accepted `{bad}`");
        }
    }
}
