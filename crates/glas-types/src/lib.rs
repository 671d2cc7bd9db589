//! # glas-types
//!
//! Core type definitions for the glas voice command engine.
//!
//! This crate is the foundation of the dependency graph -- all other
//! glas crates depend on it. It contains:
//!
//! - **[`error`]** -- [`GlasError`] and the closed [`ErrorKind`] taxonomy
//! - **[`config`]** -- Configuration schema (speech session + grammar)
//! - **[`session`]** -- Session state, recognition chunks and the state snapshot
//! - **[`command`]** -- Action types and resolved commands
//! - **[`binding`]** -- Capture-to-parameter bindings and value normalizers
//! - **[`event`]** -- Notifications delivered by a platform speech engine

pub mod binding;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod session;

pub use binding::{ParamBinding, ValueNormalizer};
pub use command::{ActionType, ResolvedCommand};
pub use config::{Config, CustomCommand, GrammarConfig, SpeechConfig, SUPPORTED_LOCALE};
pub use error::{ErrorKind, GlasError, Result};
pub use event::RecognitionEvent;
pub use session::{RecognitionChunk, SessionSnapshot, SessionState, clamp_confidence};
