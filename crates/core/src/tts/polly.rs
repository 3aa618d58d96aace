use crate::config::{ResolvedConfig, StaticCredentials};
use crate::tts::{AudioStream, SpeechClient, SynthesisRequest, TtsError};
use aws_config::BehaviorVersion;
use aws_sdk_polly::config::{Credentials, Region};
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::operation::synthesize_speech::builders::SynthesizeSpeechFluentBuilder;
use aws_sdk_polly::primitives::ByteStream;
use aws_sdk_polly::types::{self as polly, OutputFormat};
use aws_sdk_polly::Client;
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use tokio::sync::OnceCell;

const LOG_TARGET: &str = "tts::polly";
const CREDENTIALS_PROVIDER_NAME: &str = "pollytts";

/// Amazon Polly backed [`SpeechClient`].
///
/// The SDK client is built on first use so that construction stays
/// synchronous and never touches the network.
pub struct PollySpeechClient {
    region: Region,
    credentials: Option<Credentials>,
    endpoint_url: Option<String>,
    client: OnceCell<Client>,
}

impl PollySpeechClient {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            region: Region::new(config.region.as_str().to_owned()),
            credentials: config.credentials.as_ref().map(static_credentials),
            endpoint_url: config.endpoint_url.clone(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async move {
                let mut loader =
                    aws_config::defaults(BehaviorVersion::latest()).region(self.region.clone());
                if let Some(creds) = &self.credentials {
                    loader = loader.credentials_provider(creds.clone());
                }
                if let Some(url) = &self.endpoint_url {
                    loader = loader.endpoint_url(url.clone());
                }
                let sdk_config = loader.load().await;
                tracing::debug!(
                    target: LOG_TARGET,
                    region = %self.region,
                    explicit_credentials = self.credentials.is_some(),
                    "polly client initialized"
                );
                Client::new(&sdk_config)
            })
            .await
    }
}

fn static_credentials(creds: &StaticCredentials) -> Credentials {
    Credentials::new(
        creds.access_key_id.clone(),
        creds.secret_access_key.expose().to_owned(),
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    )
}

/// Copies every field of `request` onto the SDK call.
fn populate(
    builder: SynthesizeSpeechFluentBuilder,
    request: SynthesisRequest,
) -> SynthesizeSpeechFluentBuilder {
    builder
        .voice_id(polly::VoiceId::from(request.voice_id.as_str()))
        .engine(polly::Engine::from(request.engine.as_str()))
        .text_type(polly::TextType::from(request.text_type.as_str()))
        .language_code(polly::LanguageCode::from(request.language_code.as_str()))
        .text(request.text)
        .output_format(OutputFormat::from(request.output_format))
        .sample_rate(request.sample_rate)
}

fn into_audio_stream(body: ByteStream) -> AudioStream {
    futures::stream::unfold(body, |mut body| async move {
        let chunk = body.next().await?;
        Some((chunk.map_err(|e| TtsError::Stream(e.to_string())), body))
    })
    .boxed()
}

impl SpeechClient for PollySpeechClient {
    fn synthesize_speech(
        &self,
        request: SynthesisRequest,
    ) -> BoxFuture<'_, Result<AudioStream, TtsError>> {
        async move {
            let client = self.client().await;
            let output = populate(client.synthesize_speech(), request)
                .send()
                .await
                .map_err(|e| TtsError::Provider(DisplayErrorContext(&e).to_string()))?;

            Ok(into_audio_stream(output.audio_stream))
        }
        .boxed()
    }
}
