use crate::tts::{AudioStream, TtsError};
use futures::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const LOG_TARGET: &str = "tts::sink";
const PARTIAL_SUFFIX: &str = ".part";

/// Drains `audio` into `path`. Returns the number of bytes written.
///
/// Bytes go to a sibling temp file that is renamed over `path` only once the
/// stream ended and the file was flushed. On failure only the temp file is
/// removed; a file already at `path` is left as it was.
pub async fn write_stream_to_file(path: &Path, audio: AudioStream) -> Result<u64, TtsError> {
    let io_err = |source: std::io::Error| TtsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .map(|n| format!(".{}.", n.to_string_lossy()))
        .unwrap_or_else(|| ".audio.".to_owned());
    let partial = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(dir)
        .map_err(io_err)?;
    let (std_file, partial_path) = partial.into_parts();

    // Dropping `partial_path` on any early return deletes the temp file.
    let written = drain(File::from_std(std_file), audio, path).await?;

    partial_path.persist(path).map_err(|e| {
        tracing::warn!(
            target: LOG_TARGET,
            path = %path.display(),
            "could not move finished audio into place: {}",
            e.error
        );
        io_err(e.error)
    })?;
    Ok(written)
}

async fn drain(mut file: File, mut audio: AudioStream, path: &Path) -> Result<u64, TtsError> {
    let io_err = |source: std::io::Error| TtsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0u64;
    while let Some(chunk) = audio.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    Ok(written)
}
