//! Config-declared command patterns.

use glas_types::{CustomCommand, ParamBinding, Result};

use super::CommandPattern;
use super::matcher::UtteranceMatcher;
use super::template::TemplateMatcher;

/// Compile a [`CustomCommand`] into a pattern.
///
/// With no explicit bindings every capture is bound verbatim to a
/// parameter of the same name.
pub fn compile(command: &CustomCommand) -> Result<CommandPattern> {
    let matcher = TemplateMatcher::parse(&command.templates)?;

    let bindings: Vec<ParamBinding> = if command.bindings.is_empty() {
        matcher
            .capture_names()
            .iter()
            .map(|name| ParamBinding::verbatim(name))
            .collect()
    } else {
        command.bindings.clone()
    };

    let mut pattern = CommandPattern::new(&command.id, command.action, matcher)
        .with_description(&command.description);
    for (key, value) in &command.params {
        pattern = pattern.with_param(key, value);
    }
    for binding in bindings {
        pattern = pattern.with_binding(binding);
    }
    Ok(pattern)
}
