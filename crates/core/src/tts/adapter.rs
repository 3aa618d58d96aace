use crate::config::{ConfigError, PollyTtsConfig, ResolvedConfig};
use crate::plugin::{Plugin, TtsPlugin};
use crate::tts::{
    compute_filename, write_stream_to_file, PollySpeechClient, SpeechClient, SynthResult,
    SynthesisOptions, SynthesisRequest, TtsError, VoiceParams, FILE_FORMAT_TAG,
};
use futures::future::BoxFuture;
use futures::FutureExt;

pub const PLUGIN_CATEGORY: &str = "tts";
pub const PLUGIN_ID: &str = "pollytts";

const LOG_TARGET: &str = "tts::pollytts";

/// Amazon Polly synthesis plugin. Each call writes one file named after its
/// inputs into the configured output directory.
pub struct PollyTts<C = PollySpeechClient> {
    config: ResolvedConfig,
    default_voice: VoiceParams,
    client: C,
}

impl PollyTts<PollySpeechClient> {
    pub fn new(config: PollyTtsConfig) -> Result<Self, ConfigError> {
        let config = config.resolve()?;
        let client = PollySpeechClient::new(&config);
        Ok(Self::from_parts(config, client))
    }
}

impl<C: SpeechClient> PollyTts<C> {
    pub fn with_client(config: PollyTtsConfig, client: C) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(config.resolve()?, client))
    }

    fn from_parts(config: ResolvedConfig, client: C) -> Self {
        Self {
            config,
            default_voice: VoiceParams::default(),
            client,
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn default_voice(&self) -> &VoiceParams {
        &self.default_voice
    }

    pub async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthResult, TtsError> {
        let filename = compute_filename(text, options, FILE_FORMAT_TAG);
        let path_to_file = self.config.output_dir.join(&filename);

        tracing::info!(target: LOG_TARGET, text, ?options, "synthesize");

        let voice = options.merge_over(&self.default_voice);
        let request = SynthesisRequest::new(voice, text.to_owned());

        let audio = self.client.synthesize_speech(request).await?;
        let written = write_stream_to_file(&path_to_file, audio).await?;

        tracing::debug!(
            target: LOG_TARGET,
            path = %path_to_file.display(),
            bytes = written,
            "audio written"
        );

        Ok(SynthResult {
            filename,
            path_to_file,
        })
    }
}

impl<C: SpeechClient> Plugin for PollyTts<C> {
    fn category(&self) -> &'static str {
        PLUGIN_CATEGORY
    }

    fn id(&self) -> &'static str {
        PLUGIN_ID
    }
}

impl<C: SpeechClient> TtsPlugin for PollyTts<C> {
    fn synthesize(
        &self,
        text: String,
        options: SynthesisOptions,
    ) -> BoxFuture<'_, Result<SynthResult, TtsError>> {
        async move { PollyTts::synthesize(self, &text, &options).await }.boxed()
    }
}
