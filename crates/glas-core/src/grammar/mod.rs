//! Command grammar: an ordered list of command patterns.
//!
//! [`CommandGrammar::match_command`] normalizes an utterance and returns
//! the command of the first pattern that accepts it. Declaration order is
//! the only tie-break. Two patterns that accept the same utterance are
//! not reported; the earlier one silently wins.

pub mod builtin;
pub mod custom;
pub mod matcher;
pub mod template;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use glas_types::{
    ActionType, GlasError, GrammarConfig, ParamBinding, ResolvedCommand, Result, SUPPORTED_LOCALE,
};
use tracing::{debug, trace, warn};

pub use matcher::{Captures, PhraseMatcher, UtteranceMatcher, levenshtein_distance};
pub use template::{Template, TemplateMatcher};

use crate::utterance::{FillerSet, Utterance};

/// One pattern-to-action rule.
pub struct CommandPattern {
    id: String,
    matcher: Box<dyn UtteranceMatcher>,
    action: ActionType,
    static_params: BTreeMap<String, String>,
    bindings: Vec<ParamBinding>,
    description: String,
}

impl CommandPattern {
    pub fn new(id: &str, action: ActionType, matcher: impl UtteranceMatcher + 'static) -> Self {
        Self {
            id: id.to_string(),
            matcher: Box::new(matcher),
            action,
            static_params: BTreeMap::new(),
            bindings: Vec::new(),
            description: String::new(),
        }
    }

    /// Attach a parameter set on every match.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.static_params.insert(key.to_string(), value.to_string());
        self
    }

    /// Route a capture into a parameter.
    pub fn with_binding(mut self, binding: ParamBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn action(&self) -> ActionType {
        self.action
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn static_params(&self) -> &BTreeMap<String, String> {
        &self.static_params
    }

    pub fn bindings(&self) -> &[ParamBinding] {
        &self.bindings
    }

    pub fn matcher(&self) -> &dyn UtteranceMatcher {
        self.matcher.as_ref()
    }

    /// Build the command for an accepted utterance.
    ///
    /// Static params come first; bound captures override keys of the same
    /// name. Captures without a binding are dropped, so the result only
    /// carries keys this pattern declares.
    pub fn resolve(&self, captures: &Captures) -> ResolvedCommand {
        let mut params = self.static_params.clone();
        for binding in &self.bindings {
            if let Some(raw) = captures.get(&binding.capture) {
                params.insert(binding.param.clone(), binding.normalize.apply(raw));
            }
        }
        ResolvedCommand::new(&self.id, self.action, params)
    }

    fn check_bindings(&self) -> Result<()> {
        let names = self.matcher.capture_names();
        for binding in &self.bindings {
            if !names.contains(&binding.capture) {
                return Err(GlasError::ConfigInvalid {
                    reason: format!(
                        "pattern `{}` binds unknown capture `{}`",
                        self.id, binding.capture
                    ),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPattern")
            .field("id", &self.id)
            .field("action", &self.action)
            .field("static_params", &self.static_params)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable collection of command patterns for one locale.
///
/// Stateless once built; share it between controllers behind an `Arc`.
#[derive(Debug)]
pub struct CommandGrammar {
    locale: String,
    fillers: FillerSet,
    patterns: Vec<CommandPattern>,
}

impl CommandGrammar {
    pub fn builder() -> CommandGrammarBuilder {
        CommandGrammarBuilder::default()
    }

    /// The built-in grammar with default settings.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&GrammarConfig::default())
    }

    /// Assemble the grammar described by `config`: the built-in patterns
    /// (minus disabled ids), then custom patterns in declared order.
    pub fn from_config(config: &GrammarConfig) -> Result<Self> {
        let mut builder = Self::builder().fillers(&config.fillers);

        if config.builtins {
            let patterns = builtin::patterns(config.fuzzy_distance)?;
            let known: HashSet<String> = patterns.iter().map(|p| p.id.clone()).collect();
            for id in &config.disabled {
                if !known.contains(id) {
                    warn!(pattern = %id, "disabled pattern id is not a built-in");
                }
            }
            for pattern in patterns {
                if config.disabled.contains(&pattern.id) {
                    debug!(pattern = %pattern.id, "built-in pattern disabled");
                    continue;
                }
                builder = builder.pattern(pattern);
            }
        }

        for command in &config.custom {
            builder = builder.pattern(custom::compile(command)?);
        }

        builder.build()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn patterns(&self) -> &[CommandPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Normalize raw text the way matching sees it.
    pub fn normalize(&self, raw: &str) -> Utterance {
        self.fillers.normalize(raw)
    }

    /// Classify an utterance. `None` is an ordinary outcome.
    pub fn match_command(&self, utterance: &str) -> Option<ResolvedCommand> {
        self.match_utterance(&self.normalize(utterance))
    }

    /// Classify an already normalized utterance.
    pub fn match_utterance(&self, utterance: &Utterance) -> Option<ResolvedCommand> {
        if utterance.is_empty() {
            return None;
        }
        let found = self.patterns.iter().find_map(|pattern| {
            pattern
                .matcher
                .matches(utterance)
                .map(|captures| pattern.resolve(&captures))
        });
        match &found {
            Some(cmd) => debug!(
                pattern = %cmd.pattern_id(),
                action = %cmd.action(),
                "utterance matched"
            ),
            None => trace!(utterance = %utterance.text(), "no pattern matched"),
        }
        found
    }
}

/// Collects patterns in declaration order and validates them on `build`.
#[derive(Debug, Default)]
pub struct CommandGrammarBuilder {
    locale: Option<String>,
    fillers: FillerSet,
    patterns: Vec<CommandPattern>,
}

impl CommandGrammarBuilder {
    /// Defaults to the supported locale.
    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn fillers<S: AsRef<str>>(mut self, fillers: &[S]) -> Self {
        self.fillers = FillerSet::new(fillers);
        self
    }

    /// Append a pattern; it is tried after every pattern added before it.
    pub fn pattern(mut self, pattern: CommandPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Reject duplicate ids and bindings to captures no template declares.
    pub fn build(self) -> Result<CommandGrammar> {
        let mut seen = HashSet::new();
        for pattern in &self.patterns {
            if !seen.insert(pattern.id.as_str()) {
                return Err(GlasError::ConfigInvalid {
                    reason: format!("duplicate pattern id `{}`", pattern.id),
                });
            }
            pattern.check_bindings()?;
        }

        Ok(CommandGrammar {
            locale: self.locale.unwrap_or_else(|| SUPPORTED_LOCALE.to_string()),
            fillers: self.fillers,
            patterns: self.patterns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glas_types::ValueNormalizer;

    fn phrase(p: &[&str]) -> PhraseMatcher {
        PhraseMatcher::new(p, 0)
    }

    #[test]
    fn earlier_pattern_wins_on_overlap() {
        let grammar = CommandGrammar::builder()
            .pattern(
                CommandPattern::new("first", ActionType::Navigate, phrase(&["rapoarte"]))
                    .with_param("path", "/reports"),
            )
            .pattern(
                CommandPattern::new("second", ActionType::Report, phrase(&["rapoarte"]))
                    .with_param("reportType", "all"),
            )
            .build()
            .unwrap();

        let cmd = grammar.match_command("rapoarte").unwrap();
        assert_eq!(cmd.pattern_id(), "first");
        assert_eq!(cmd.param("path"), Some("/reports"));
        assert!(cmd.param("reportType").is_none());
    }

    #[test]
    fn dynamic_params_override_static() {
        let matcher = TemplateMatcher::parse(&["raport {kind}"]).unwrap();
        let grammar = CommandGrammar::builder()
            .pattern(
                CommandPattern::new("r", ActionType::Report, matcher)
                    .with_param("reportType", "general")
                    .with_param("format", "pdf")
                    .with_binding(ParamBinding::new("kind", "reportType", ValueNormalizer::Verbatim)),
            )
            .build()
            .unwrap();

        let cmd = grammar.match_command("raport lunar").unwrap();
        assert_eq!(cmd.param("reportType"), Some("lunar"));
        assert_eq!(cmd.param("format"), Some("pdf"));
    }

    #[test]
    fn unbound_captures_do_not_leak() {
        let matcher = TemplateMatcher::parse(&["trimite {what}"]).unwrap();
        let grammar = CommandGrammar::builder()
            .pattern(CommandPattern::new("send", ActionType::Control, matcher))
            .build()
            .unwrap();
        let cmd = grammar.match_command("trimite factura").unwrap();
        assert!(cmd.params().is_empty());
    }

    #[test]
    fn no_match_is_none() {
        let grammar = CommandGrammar::builder()
            .pattern(CommandPattern::new("h", ActionType::Help, phrase(&["ajutor"])))
            .build()
            .unwrap();
        assert!(grammar.match_command("vreme frumoasă").is_none());
        assert!(grammar.match_command("").is_none());
    }

    #[test]
    fn fillers_are_removed_before_matching() {
        let grammar = CommandGrammar::builder()
            .fillers(&["te rog"])
            .pattern(CommandPattern::new("h", ActionType::Help, phrase(&["ajutor"])))
            .build()
            .unwrap();
        assert!(grammar.match_command("Ajutor, te rog!").is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CommandGrammar::builder()
            .pattern(CommandPattern::new("x", ActionType::Help, phrase(&["a"])))
            .pattern(CommandPattern::new("x", ActionType::Help, phrase(&["b"])))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate pattern id"));
    }

    #[test]
    fn binding_to_unknown_capture_is_rejected() {
        let err = CommandGrammar::builder()
            .pattern(
                CommandPattern::new("h", ActionType::Help, phrase(&["ajutor"]))
                    .with_binding(ParamBinding::verbatim("topic")),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, GlasError::ConfigInvalid { .. }));
    }

    #[test]
    fn matching_is_repeatable() {
        let grammar = CommandGrammar::builtin().unwrap();
        let a = grammar.match_command("caută factura 123");
        let b = grammar.match_command("caută factura 123");
        assert_eq!(a, b);
    }

    #[test]
    fn disabled_builtin_is_skipped() {
        let config = GrammarConfig {
            disabled: vec!["search".into()],
            ..GrammarConfig::default()
        };
        let grammar = CommandGrammar::from_config(&config).unwrap();
        assert!(grammar.patterns().iter().all(|p| p.id() != "search"));
        assert!(grammar.match_command("caută factura 123").is_none());
    }

    #[test]
    fn builtins_can_be_turned_off() {
        let config = GrammarConfig {
            builtins: false,
            ..GrammarConfig::default()
        };
        let grammar = CommandGrammar::from_config(&config).unwrap();
        assert!(grammar.is_empty());
        assert_eq!(grammar.locale(), SUPPORTED_LOCALE);
    }
}
