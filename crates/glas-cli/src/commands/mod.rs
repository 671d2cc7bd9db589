//! CLI command implementations for `glas`.
//!
//! - [`match_cmd`] -- One-shot utterance classification.
//! - [`grammar_cmd`] -- Pattern listing.
//! - [`simulate`] -- Event script replay.

pub mod grammar_cmd;
pub mod match_cmd;
pub mod simulate;

use std::path::Path;
use std::sync::Arc;

use glas_core::CommandGrammar;
use glas_platform::NativeEnvironment;
use glas_types::Config;

/// Load configuration from the given path override or via auto-discovery
/// (`GLAS_CONFIG`, then `~/.glas/config.json`, else defaults).
pub async fn load_config(config_override: Option<&Path>) -> anyhow::Result<Config> {
    glas_platform::config_loader::load_config(&NativeEnvironment, config_override)
        .await
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))
}

/// Build the grammar described by the configuration.
pub fn build_grammar(config: &Config) -> anyhow::Result<Arc<CommandGrammar>> {
    let grammar = CommandGrammar::from_config(&config.grammar)
        .map_err(|e| anyhow::anyhow!("failed to build grammar: {e}"))?;
    tracing::debug!(patterns = grammar.len(), "grammar ready");
    Ok(Arc::new(grammar))
}
