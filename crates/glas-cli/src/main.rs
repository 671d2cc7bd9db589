//! `glas` -- CLI binary for the glas voice command engine.
//!
//! Provides the following subcommands:
//!
//! - `glas match` -- Classify one utterance and print the resolved command.
//! - `glas grammar` -- List the active command patterns.
//! - `glas simulate` -- Replay a recorded event script through a session controller.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// glas voice command CLI.
#[derive(Parser)]
#[command(name = "glas", about = "glas voice command CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Classify an utterance against the command grammar.
    Match(commands::match_cmd::MatchArgs),

    /// List the command patterns in evaluation order.
    Grammar(commands::grammar_cmd::GrammarArgs),

    /// Replay a JSON-lines event script through a session controller.
    Simulate(commands::simulate::SimulateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Match(args) => commands::match_cmd::run(args, &config)?,
        Commands::Grammar(args) => commands::grammar_cmd::run(args, &config)?,
        Commands::Simulate(args) => commands::simulate::run(args, &config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["glas", "grammar", "--verbose", "--config", "/tmp/g.json"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.json")));
        assert!(matches!(cli.command, Commands::Grammar(_)));
    }

    #[test]
    fn match_takes_the_rest_of_the_line() {
        let cli = Cli::try_parse_from(["glas", "match", "caută", "factura", "123"]).unwrap();
        match cli.command {
            Commands::Match(args) => assert_eq!(args.utterance, vec!["caută", "factura", "123"]),
            _ => panic!("expected match subcommand"),
        }
    }

    #[test]
    fn match_flags_after_the_words_are_parsed() {
        let cli = Cli::try_parse_from([
            "glas", "match", "du-mă", "la", "facturi", "--pretty", "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Match(args) => {
                assert_eq!(args.utterance, vec!["du-mă", "la", "facturi"]);
                assert!(args.pretty);
            }
            _ => panic!("expected match subcommand"),
        }
    }
}
