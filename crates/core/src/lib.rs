#![deny(warnings)]

pub mod config;
pub mod plugin;
pub mod tts;

pub use config::{ConfigError, PollyTtsConfig};
pub use plugin::{Plugin, TtsPlugin};
pub use tts::{PollyTts, SynthResult, SynthesisOptions, TtsError};
