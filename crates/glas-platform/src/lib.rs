//! Platform abstraction layer for glas.
//!
//! The session controller never looks up a speech-capture capability
//! from an ambient location. It is handed a [`PlatformSpeechEngine`] at
//! construction (or `None` when the host has no capture support), and
//! everything platform-specific stays behind that trait.
//!
//! # Modules
//!
//! - [`engine`] -- The [`PlatformSpeechEngine`] trait, [`EngineSettings`], [`EngineError`]
//! - [`scripted`] -- [`ScriptedEngine`], a capture-free engine for tests and replays
//! - [`env`] -- Environment variable access
//! - [`config_loader`] -- Config file discovery and loading
//!
//! # Example
//!
//! ```rust
//! use glas_platform::{EngineSettings, PlatformSpeechEngine, ScriptedEngine};
//!
//! let engine = ScriptedEngine::new(EngineSettings::default());
//! let calls = engine.calls();
//! let mut boxed: Box<dyn PlatformSpeechEngine> = Box::new(engine);
//! boxed.begin().unwrap();
//! assert_eq!(calls.begins(), 1);
//! ```

pub mod config_loader;
pub mod engine;
pub mod env;
pub mod scripted;

pub use engine::{EngineError, EngineSettings, PlatformSpeechEngine};
pub use env::{Environment, MapEnvironment, NativeEnvironment};
pub use scripted::{EngineCalls, ScriptedEngine};
