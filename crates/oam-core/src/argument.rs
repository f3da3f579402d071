//! Oral-argument session fetchers: audio variant selection and transcript.
//!
//! A session reference resolves into an [`ArgumentRecord`]: the MPEG audio
//! variant saved as `.mp3` and the flattened transcript saved as `.txt`.
//! Missing media and fetch failures degrade to placeholders.

use crate::api::ArgumentDetail;
use crate::document::ArgumentRecord;
use crate::error::FetchError;
use crate::index::JsonArrayFile;
use crate::transcript;
use crate::transport::Transport;
use std::path::Path;

/// Placeholder recorded when no audio could be resolved or saved.
pub const NO_AUDIO: &str = "No Audio Available";

/// MIME type of the downloadable audio variant.
const AUDIO_MIME: &str = "audio/mpeg";

/// Resolve one session reference into an [`ArgumentRecord`] and append it
/// to the shared `arguments.json` index. `title` must already be sanitized.
///
/// Returns `Ok(None)` when the session document itself could not be fetched
/// or decoded. Only index persistence failures surface as errors.
pub async fn fetch_argument(
    transport: &Transport,
    href: &str,
    title: &str,
    dir: &Path,
    index: &JsonArrayFile,
    append_transcripts: bool,
) -> Result<Option<ArgumentRecord>, FetchError> {
    let detail: ArgumentDetail = match transport.get_json(href).await {
        Ok(detail) => detail,
        Err(err) => {
            tracing::warn!(href, error = %err, "argument detail fetch failed, skipping session");
            return Ok(None);
        }
    };

    let audio = match resolve_audio_url(&detail) {
        Some(url) => save_audio(transport, &url, dir, title).await,
        None => {
            tracing::debug!(title, "no MPEG audio variant in session document");
            NO_AUDIO.to_string()
        }
    };

    let transcript = match &detail.transcript {
        Some(spoken) => transcript::write_transcript(spoken, dir, append_transcripts).await,
        None => transcript::NO_TRANSCRIPT.to_string(),
    };

    let record = ArgumentRecord {
        title: title.to_string(),
        audio,
        transcript,
    };

    index.append(&record).await?;
    Ok(Some(record))
}

/// First media entry marked as MPEG audio wins; none means no download.
fn resolve_audio_url(detail: &ArgumentDetail) -> Option<String> {
    detail
        .media_file
        .iter()
        .flatten()
        .find(|media| media.mime.as_deref() == Some(AUDIO_MIME))
        .and_then(|media| media.href.clone())
}

/// Download the audio to `{dir}/{title}.mp3`. Returns the saved path, or
/// the placeholder if the download or write failed.
async fn save_audio(transport: &Transport, url: &str, dir: &Path, title: &str) -> String {
    let path = dir.join(format!("{title}.mp3"));
    match transport.get_bytes(url).await {
        Ok(bytes) => match tokio::fs::write(&path, bytes).await {
            Ok(()) => path.to_string_lossy().into_owned(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "audio write failed");
                NO_AUDIO.to_string()
            }
        },
        Err(err) => {
            tracing::warn!(url, error = %err, "audio download failed");
            NO_AUDIO.to_string()
        }
    }
}
