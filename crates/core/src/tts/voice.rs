use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_VOICE_ID: &str = "Joanna";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Any Polly voice name; not checked against a fixed list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VoiceId(pub String);

impl VoiceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VoiceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LanguageCode(pub String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    #[default]
    Standard,
    Neural,
    LongForm,
    Generative,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Standard => "standard",
            Engine::Neural => "neural",
            Engine::LongForm => "long-form",
            Engine::Generative => "generative",
        }
    }
}

impl FromStr for Engine {
    type Err = VoiceParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Engine::Standard),
            "neural" => Ok(Engine::Neural),
            "long-form" => Ok(Engine::LongForm),
            "generative" => Ok(Engine::Generative),
            other => Err(VoiceParamError::UnknownEngine(other.to_owned())),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Text,
    Ssml,
}

impl TextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextType::Text => "text",
            TextType::Ssml => "ssml",
        }
    }
}

impl FromStr for TextType {
    type Err = VoiceParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(TextType::Text),
            "ssml" => Ok(TextType::Ssml),
            other => Err(VoiceParamError::UnknownTextType(other.to_owned())),
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceParamError {
    #[error("unknown engine {0:?} (expected standard, neural, long-form or generative)")]
    UnknownEngine(String),
    #[error("unknown text type {0:?} (expected text or ssml)")]
    UnknownTextType(String),
}

/// Fully specified voice parameters sent with every request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceParams {
    pub voice_id: VoiceId,
    pub language_code: LanguageCode,
    pub engine: Engine,
    pub text_type: TextType,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice_id: VoiceId(DEFAULT_VOICE_ID.to_owned()),
            language_code: LanguageCode(DEFAULT_LANGUAGE_CODE.to_owned()),
            engine: Engine::Standard,
            text_type: TextType::Text,
        }
    }
}

/// Per-call overrides. Unset fields fall back to the defaults and are left
/// out of the serialized form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOptions {
    #[serde(alias = "voice", skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<VoiceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_type: Option<TextType>,
}

impl SynthesisOptions {
    pub fn with_voice_id(mut self, voice_id: impl Into<VoiceId>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<LanguageCode>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = Some(text_type);
        self
    }

    /// Overlay these options on `defaults`; set fields win.
    pub fn merge_over(&self, defaults: &VoiceParams) -> VoiceParams {
        VoiceParams {
            voice_id: self
                .voice_id
                .clone()
                .unwrap_or_else(|| defaults.voice_id.clone()),
            language_code: self
                .language_code
                .clone()
                .unwrap_or_else(|| defaults.language_code.clone()),
            engine: self.engine.unwrap_or(defaults.engine),
            text_type: self.text_type.unwrap_or(defaults.text_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_yield_defaults() {
        let merged = SynthesisOptions::default().merge_over(&VoiceParams::default());
        assert_eq!(merged, VoiceParams::default());
    }

    #[test]
    fn language_only_keeps_default_voice_and_engine() {
        let merged = SynthesisOptions::default()
            .with_language_code("es-ES")
            .merge_over(&VoiceParams::default());
        assert_eq!(merged.language_code.as_str(), "es-ES");
        assert_eq!(merged.voice_id.as_str(), DEFAULT_VOICE_ID);
        assert_eq!(merged.engine, Engine::Standard);
        assert_eq!(merged.text_type, TextType::Text);
    }

    #[test]
    fn caller_wins_on_every_field() {
        let opts = SynthesisOptions::default()
            .with_voice_id("Nicole")
            .with_language_code("en-AU")
            .with_engine(Engine::Neural)
            .with_text_type(TextType::Ssml);
        let merged = opts.merge_over(&VoiceParams::default());
        assert_eq!(merged.voice_id.as_str(), "Nicole");
        assert_eq!(merged.language_code.as_str(), "en-AU");
        assert_eq!(merged.engine, Engine::Neural);
        assert_eq!(merged.text_type, TextType::Ssml);
    }

    #[test]
    fn options_accept_voice_alias() {
        let opts: SynthesisOptions =
            serde_json::from_str(r#"{"voice":"Vitoria","engine":"long-form"}"#).expect("json");
        assert_eq!(opts.voice_id, Some(VoiceId::from("Vitoria")));
        assert_eq!(opts.engine, Some(Engine::LongForm));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let json = serde_json::to_string(&SynthesisOptions::default().with_voice_id("Nicole"))
            .expect("json");
        assert_eq!(json, r#"{"voiceId":"Nicole"}"#);
    }

    #[test]
    fn engine_and_text_type_parse() {
        assert_eq!("generative".parse::<Engine>(), Ok(Engine::Generative));
        assert_eq!("ssml".parse::<TextType>(), Ok(TextType::Ssml));
        assert!(matches!(
            "turbo".parse::<Engine>(),
            Err(VoiceParamError::UnknownEngine(_))
        ));
        assert!(matches!(
            "html".parse::<TextType>(),
            Err(VoiceParamError::UnknownTextType(_))
        ));
    }
}
