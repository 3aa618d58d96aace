//! Capability interface the host uses to register synthesis back ends.
//!
//! The host keys implementations by `(category, id)`; it never needs to know
//! the concrete type behind a [`TtsPlugin`].

use crate::tts::{SynthResult, SynthesisOptions, TtsError};
use futures::future::BoxFuture;

pub trait Plugin: Send + Sync {
    /// Capability name, e.g. `"tts"`.
    fn category(&self) -> &'static str;

    /// Identifier unique within the category.
    fn id(&self) -> &'static str;
}

pub trait TtsPlugin: Plugin {
    /// Synthesizes `text` to a file and reports where it went.
    fn synthesize(
        &self,
        text: String,
        options: SynthesisOptions,
    ) -> BoxFuture<'_, Result<SynthResult, TtsError>>;
}
