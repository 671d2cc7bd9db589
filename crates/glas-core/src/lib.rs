//! # glas-core
//!
//! Voice command engine for glas.
//!
//! Contains the session state machine, the transcript buffer, utterance
//! normalization, the command grammar with its matchers and built-in
//! ro-RO command set, and the dispatcher seam through which resolved
//! commands leave the engine.

pub mod dispatch;
pub mod grammar;
pub mod session;
pub mod transcript;
pub mod utterance;

pub use dispatch::{ChannelDispatcher, CommandDispatcher};
pub use grammar::{CommandGrammar, CommandGrammarBuilder, CommandPattern};
pub use session::SpeechSessionController;
pub use transcript::TranscriptAccumulator;
pub use utterance::{FillerSet, Utterance};
