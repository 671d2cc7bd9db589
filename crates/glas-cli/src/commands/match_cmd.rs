//! `glas match` -- classify one utterance.
//!
//! # Example
//!
//! ```text
//! glas match du-mă la facturi
//! {"actionType":"navigate","params":{"path":"/invoices"},"patternId":"nav-invoices"}
//! ```

use clap::Args;
use glas_types::{Config, ResolvedCommand};

use super::build_grammar;

/// Arguments for `glas match`.
#[derive(Args)]
pub struct MatchArgs {
    /// The utterance, as spoken. Multiple words are joined by spaces.
    #[arg(required = true, num_args = 1..)]
    pub utterance: Vec<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: MatchArgs, config: &Config) -> anyhow::Result<()> {
    let grammar = build_grammar(config)?;
    let utterance = args.utterance.join(" ");
    let resolved = grammar.match_command(&utterance);
    println!("{}", render(resolved.as_ref(), args.pretty)?);
    Ok(())
}

fn render(resolved: Option<&ResolvedCommand>, pretty: bool) -> anyhow::Result<String> {
    let Some(cmd) = resolved else {
        return Ok("no match".into());
    };
    let out = if pretty {
        serde_json::to_string_pretty(cmd)?
    } else {
        serde_json::to_string(cmd)?
    };
    Ok(out)
}
