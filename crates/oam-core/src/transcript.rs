//! Transcript flattening and persistence.
//!
//! Structured `sections → turns → text_blocks` data becomes a line-oriented
//! text file: one `[start] speaker: text` line per text block, in document
//! order. Only this sequential write has an ordering guarantee; everything
//! else in a case completes in arbitrary order.

use crate::api::TranscriptDetail;
use crate::sanitize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Placeholder recorded when no transcript could be fetched or written.
pub const NO_TRANSCRIPT: &str = "No transcript available";

/// Flatten a transcript into output lines, preserving section/turn/block
/// order. Missing start times become `N/A`, missing speakers become
/// `Unknown Speaker`.
pub fn flatten(detail: &TranscriptDetail) -> Vec<String> {
    let mut lines = Vec::new();
    for section in &detail.sections {
        for turn in &section.turns {
            let start = turn
                .start
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let speaker = turn
                .speaker
                .as_ref()
                .and_then(|s| s.name.as_deref())
                .unwrap_or("Unknown Speaker");
            for block in &turn.text_blocks {
                let text = block.text.as_deref().unwrap_or("");
                lines.push(format!("[{start}] {speaker}: {text}"));
            }
        }
    }
    lines
}

/// Write the flattened transcript under `dir`, named from the sanitized
/// transcript title. Truncates by default; `append` restores the historical
/// accumulate-across-runs behavior. Returns the saved path, or the
/// placeholder if the write failed.
pub async fn write_transcript(detail: &TranscriptDetail, dir: &Path, append: bool) -> String {
    let title = sanitize::component(detail.title.as_deref().unwrap_or("unknown_transcript_title"));
    let path = dir.join(format!("{title}.txt"));

    let mut body = flatten(detail).join("\n");
    if !body.is_empty() {
        body.push('\n');
    }

    let result = if append {
        match tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(mut file) => file.write_all(body.as_bytes()).await,
            Err(err) => Err(err),
        }
    } else {
        tokio::fs::write(&path, &body).await
    };

    match result {
        Ok(()) => path.to_string_lossy().into_owned(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "transcript write failed");
            NO_TRANSCRIPT.to_string()
        }
    }
}
