//! `glas simulate` -- replay an event script through a session controller.
//!
//! The script is JSON lines. Each line is a control (`start`, `stop`,
//! `abort`, `reset`) or an engine notification (`result`, `error`,
//! `end`), tagged by `type`. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! {"type":"start"}
//! {"type":"result","chunks":[{"text":"du-mă la","is_final":false}]}
//! {"type":"result","chunks":[{"text":"du-mă la facturi","is_final":true,"confidence":0.92}]}
//! {"type":"stop"}
//! {"type":"end"}
//! ```
//!
//! Every dispatched command is printed as one JSON line, followed by the
//! final snapshot.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use glas_core::{ChannelDispatcher, SpeechSessionController};
use glas_platform::{EngineSettings, ScriptedEngine};
use glas_types::{Config, RecognitionChunk, RecognitionEvent, ResolvedCommand, SessionSnapshot};
use serde::Deserialize;
use tokio::sync::mpsc;

use super::build_grammar;

/// Arguments for `glas simulate`.
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the JSON-lines script.
    pub script: PathBuf,
}

/// One line of a simulation script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    Start,
    Stop,
    Abort,
    Reset,
    Result {
        chunks: Vec<RecognitionChunk>,
    },
    Error {
        code: String,
        #[serde(default)]
        message: Option<String>,
    },
    End,
}

/// Parse a script, reporting the 1-based line of the first bad step.
pub fn parse_script(contents: &str) -> anyhow::Result<Vec<ScriptStep>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("script line {}", idx + 1))
        })
        .collect()
}

/// What a replay produced.
#[derive(Debug)]
pub struct Replay {
    pub commands: Vec<ResolvedCommand>,
    pub snapshot: SessionSnapshot,
}

/// Drive a fresh controller through `steps`.
pub fn replay(steps: &[ScriptStep], config: &Config) -> anyhow::Result<Replay> {
    let grammar = build_grammar(config)?;
    let engine = ScriptedEngine::new(EngineSettings::from(&config.speech));
    let (dispatcher, mut rx) = ChannelDispatcher::channel();
    let mut controller = SpeechSessionController::new(Some(Box::new(engine)), grammar)
        .with_dispatcher(dispatcher)
        .with_min_confidence(config.speech.min_confidence);

    let mut commands = Vec::new();
    for step in steps {
        apply(&mut controller, step);
        drain(&mut rx, &mut commands);
    }

    let snapshot = controller.snapshot();
    tracing::info!(
        steps = steps.len(),
        commands = commands.len(),
        state = %snapshot.state,
        "replay finished"
    );
    Ok(Replay { commands, snapshot })
}

fn apply(controller: &mut SpeechSessionController, step: &ScriptStep) {
    match step {
        ScriptStep::Start => controller.start(),
        ScriptStep::Stop => controller.stop(),
        ScriptStep::Abort => controller.abort(),
        ScriptStep::Reset => controller.reset(),
        ScriptStep::Result { chunks } => controller.handle_event(&RecognitionEvent::Result {
            chunks: chunks.clone(),
        }),
        ScriptStep::Error { code, message } => {
            controller.on_error_with_message(code, message.as_deref())
        }
        ScriptStep::End => controller.on_end(),
    }
}

fn drain(rx: &mut mpsc::Receiver<ResolvedCommand>, out: &mut Vec<ResolvedCommand>) {
    while let Ok(cmd) = rx.try_recv() {
        out.push(cmd);
    }
}

pub async fn run(args: SimulateArgs, config: &Config) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let steps = parse_script(&contents)?;
    let result = replay(&steps, config)?;

    for cmd in &result.commands {
        println!("{}", serde_json::to_string(cmd)?);
    }
    println!("{}", serde_json::to_string_pretty(&result.snapshot)?);
    Ok(())
}
