//! `glas grammar` -- list the active command patterns.
//!
//! Patterns are shown in evaluation order; the first one that accepts an
//! utterance wins.

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use glas_core::CommandGrammar;
use glas_types::Config;

use super::build_grammar;

/// Arguments for `glas grammar`.
#[derive(Args)]
pub struct GrammarArgs {
    /// Only list patterns resolving to this action (e.g. "navigate").
    #[arg(long)]
    pub action: Option<String>,
}

pub fn run(args: GrammarArgs, config: &Config) -> anyhow::Result<()> {
    let grammar = build_grammar(config)?;
    println!("{}", grammar_table(&grammar, args.action.as_deref()));
    Ok(())
}

fn grammar_table(grammar: &CommandGrammar, action: Option<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["#", "ID", "ACTION", "PARAMS", "DESCRIPTION"]);

    for (idx, pattern) in grammar.patterns().iter().enumerate() {
        if action.is_some_and(|a| a != pattern.action().as_str()) {
            continue;
        }
        let mut params: Vec<String> = pattern
            .static_params()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        params.extend(pattern.bindings().iter().map(|b| format!("{}=<{}>", b.param, b.capture)));

        table.add_row([
            (idx + 1).to_string(),
            pattern.id().to_string(),
            pattern.action().to_string(),
            params.join(", "),
            pattern.description().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_builtins_in_order() {
        let grammar = CommandGrammar::builtin().unwrap();
        let rendered = grammar_table(&grammar, None).to_string();
        let help = rendered.find("help").unwrap();
        let amount = rendered.find("Dictare sumă").unwrap();
        assert!(help < amount);
        assert!(rendered.contains("path=/invoices"));
        assert!(rendered.contains("query=<query>"));
    }

    #[test]
    fn action_filter() {
        let grammar = CommandGrammar::builtin().unwrap();
        let rendered = grammar_table(&grammar, Some("search")).to_string();
        assert!(rendered.contains("query=<query>"));
        assert!(!rendered.contains("/invoices"));
    }
}
