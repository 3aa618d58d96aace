mod adapter;
mod filename;
mod polly;
mod sink;
mod voice;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use adapter::{PollyTts, PLUGIN_CATEGORY, PLUGIN_ID};
pub use filename::compute_filename;
pub use polly::PollySpeechClient;
pub use sink::write_stream_to_file;
pub use voice::{
    Engine, LanguageCode, SynthesisOptions, TextType, VoiceId, VoiceParamError, VoiceParams,
    DEFAULT_LANGUAGE_CODE, DEFAULT_VOICE_ID,
};

/// Raw 16-bit little-endian PCM, mono.
pub const OUTPUT_FORMAT: &str = "pcm";
pub const SAMPLE_RATE_HZ: &str = "16000";
/// Extension for the written files: signed linear 16 kHz.
pub const FILE_FORMAT_TAG: &str = "sln16";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub voice_id: VoiceId,
    pub engine: Engine,
    pub text_type: TextType,
    pub language_code: LanguageCode,
    pub text: String,
    pub output_format: &'static str,
    pub sample_rate: &'static str,
}

impl SynthesisRequest {
    pub fn new(voice: VoiceParams, text: String) -> Self {
        Self {
            voice_id: voice.voice_id,
            engine: voice.engine,
            text_type: voice.text_type,
            language_code: voice.language_code,
            text,
            output_format: OUTPUT_FORMAT,
            sample_rate: SAMPLE_RATE_HZ,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SynthResult {
    pub filename: String,
    pub path_to_file: PathBuf,
}

pub type AudioStream = BoxStream<'static, Result<Bytes, TtsError>>;

#[derive(thiserror::Error, Debug)]
pub enum TtsError {
    #[error("speech provider request failed: {0}")]
    Provider(String),
    #[error("audio stream failed: {0}")]
    Stream(String),
    #[error("failed to write audio to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Vendor-side synthesis call. One request, one audio stream back.
pub trait SpeechClient: Send + Sync {
    fn synthesize_speech(
        &self,
        request: SynthesisRequest,
    ) -> BoxFuture<'_, Result<AudioStream, TtsError>>;
}
