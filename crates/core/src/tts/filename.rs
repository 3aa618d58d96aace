use crate::tts::SynthesisOptions;
use sha2::{Digest, Sha256};

/// Content-addressed name for the audio produced from `text` and `options`.
///
/// The digest covers the text and every option the caller set, each length
/// prefixed, so identical requests always land on the same file and no text
/// can be mistaken for an option value.
pub fn compute_filename(text: &str, options: &SynthesisOptions, format_tag: &str) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, b't', Some(text));
    update_field(&mut hasher, b'v', options.voice_id.as_ref().map(|v| v.as_str()));
    update_field(
        &mut hasher,
        b'l',
        options.language_code.as_ref().map(|l| l.as_str()),
    );
    update_field(&mut hasher, b'e', options.engine.map(|e| e.as_str()));
    update_field(&mut hasher, b'x', options.text_type.map(|t| t.as_str()));
    format!("{}.{format_tag}", hex::encode(hasher.finalize()))
}

// Unset options leave no trace in the digest.
fn update_field(hasher: &mut Sha256, tag: u8, value: Option<&str>) {
    if let Some(value) = value {
        hasher.update([tag]);
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }
}
