#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use pollytts_core::config::{
    resolve_optional_path, resolve_optional_string, Env, PollyTtsConfig, StdEnv, ENV_AWS_REGION,
    ENV_POLLYTTS_KEY_FILE, ENV_POLLYTTS_OUTPUT_DIR, ENV_POLLYTTS_REGION,
};
use pollytts_core::tts::{Engine, LanguageCode, PollyTts, SynthesisOptions, TextType, VoiceId};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pollytts")]
#[command(about = "Synthesize text with Amazon Polly into a 16 kHz PCM file")]
struct Args {
    /// Text (or SSML with --text-type ssml) to synthesize.
    text: String,

    #[arg(long)]
    voice_id: Option<String>,

    #[arg(long)]
    language_code: Option<String>,

    #[arg(long)]
    engine: Option<Engine>,

    #[arg(long)]
    text_type: Option<TextType>,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long)]
    region: Option<String>,

    /// JSON file with accessKeyId and secretAccessKey.
    #[arg(long)]
    key_file: Option<PathBuf>,

    #[arg(long)]
    endpoint_url: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let options = build_options(&args);
    let text = args.text.clone();
    let cfg = build_config(args, &env);

    tracing::info!(
        output_dir = ?cfg.path,
        region = ?cfg.region,
        key_file = ?cfg.key_filename,
        "config loaded"
    );

    let tts = PollyTts::new(cfg).context("invalid pollytts configuration")?;
    let result = tts
        .synthesize(&text, &options)
        .await
        .context("speech synthesis failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_options(args: &Args) -> SynthesisOptions {
    SynthesisOptions {
        voice_id: args.voice_id.clone().map(VoiceId),
        language_code: args.language_code.clone().map(LanguageCode),
        engine: args.engine,
        text_type: args.text_type,
    }
}

fn build_config(args: Args, env: &impl Env) -> PollyTtsConfig {
    PollyTtsConfig {
        path: resolve_optional_path(args.output_dir, ENV_POLLYTTS_OUTPUT_DIR, env),
        region: resolve_optional_string(
            args.region,
            &[ENV_POLLYTTS_REGION, ENV_AWS_REGION],
            env,
        ),
        key_filename: resolve_optional_path(args.key_file, ENV_POLLYTTS_KEY_FILE, env),
        endpoint_url: args.endpoint_url,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollytts_core::config::MapEnv;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn flags_become_options() {
        let args = parse(&[
            "pollytts",
            "hello",
            "--voice-id",
            "Nicole",
            "--engine",
            "neural",
            "--text-type",
            "ssml",
        ]);
        let opts = build_options(&args);
        assert_eq!(opts.voice_id, Some(VoiceId("Nicole".into())));
        assert_eq!(opts.engine, Some(Engine::Neural));
        assert_eq!(opts.text_type, Some(TextType::Ssml));
        assert_eq!(opts.language_code, None);
    }

    #[test]
    fn unknown_engine_rejected() {
        assert!(Args::try_parse_from(["pollytts", "hi", "--engine", "turbo"]).is_err());
    }

    #[test]
    fn env_fills_unset_flags() {
        let env = MapEnv::default()
            .with_var(ENV_AWS_REGION, "eu-central-1")
            .with_var(ENV_POLLYTTS_OUTPUT_DIR, "/srv/audio")
            .with_var(ENV_POLLYTTS_KEY_FILE, "/etc/pollytts/credentials.json");
        let cfg = build_config(parse(&["pollytts", "hi"]), &env);
        assert_eq!(cfg.region.as_deref(), Some("eu-central-1"));
        assert_eq!(cfg.path, Some(PathBuf::from("/srv/audio")));
        assert_eq!(
            cfg.key_filename,
            Some(PathBuf::from("/etc/pollytts/credentials.json"))
        );
    }

    #[test]
    fn flags_beat_env() {
        let env = MapEnv::default().with_var(ENV_AWS_REGION, "eu-central-1");
        let cfg = build_config(parse(&["pollytts", "hi", "--region", "us-west-2"]), &env);
        assert_eq!(cfg.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn nothing_set_leaves_library_defaults() {
        let cfg = build_config(parse(&["pollytts", "hi"]), &MapEnv::default());
        assert_eq!(cfg, PollyTtsConfig::default());
    }
}
