//! Advocate and panel-member fetchers.
//!
//! Each person reference resolves through the transport gate into a
//! [`PersonRecord`]: biography and roles from the detail document plus the
//! first usable portrait saved under the case tree. Failures degrade to the
//! documented placeholder or a skipped entry; they never reach sibling
//! fetchers or abort the owning case.

use crate::api::PersonDetail;
use crate::document::PersonRecord;
use crate::error::FetchError;
use crate::html;
use crate::index::JsonArrayFile;
use crate::transport::Transport;
use std::path::Path;

/// Placeholder recorded when no portrait could be resolved or saved.
pub const NO_IMAGE: &str = "No Image Available";

/// Extensions accepted for a portrait.
const RASTER_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Resolve one person reference into a [`PersonRecord`] and append it to
/// the category's shared index. `name` must already be sanitized.
///
/// Returns `Ok(None)` when the detail document itself could not be fetched
/// or decoded (the entry is skipped). Only index persistence failures
/// surface as errors.
pub async fn fetch_person(
    transport: &Transport,
    href: &str,
    name: &str,
    dir: &Path,
    index: &JsonArrayFile,
) -> Result<Option<PersonRecord>, FetchError> {
    let detail: PersonDetail = match transport.get_json(href).await {
        Ok(detail) => detail,
        Err(err) => {
            tracing::warn!(href, error = %err, "person detail fetch failed, skipping entry");
            return Ok(None);
        }
    };

    let image = match resolve_image_url(&detail) {
        Some(url) => save_image(transport, &url, dir, name).await,
        None => {
            tracing::debug!(name, "no usable portrait in detail document");
            NO_IMAGE.to_string()
        }
    };

    let record = PersonRecord {
        name: name.to_string(),
        image,
        roles: detail.roles,
        biography: detail.biography.as_deref().map(html::strip_tags),
        law_school: detail
            .law_school
            .as_ref()
            .and_then(|school| school.name())
            .map(str::to_string),
    };

    index.append(&record).await?;
    Ok(Some(record))
}

/// First image entry whose target ends in a recognized raster extension.
fn resolve_image_url(detail: &PersonDetail) -> Option<String> {
    detail
        .images
        .iter()
        .filter_map(|entry| entry.file.as_ref()?.href.as_deref())
        .find(|href| has_raster_extension(href))
        .map(str::to_string)
}

fn has_raster_extension(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    RASTER_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Download the portrait to `{dir}/{name}.jpg`. Returns the saved path, or
/// the placeholder if the download or write failed.
async fn save_image(transport: &Transport, url: &str, dir: &Path, name: &str) -> String {
    let path = dir.join(format!("{name}.jpg"));
    match transport.get_bytes(url).await {
        Ok(bytes) => match tokio::fs::write(&path, bytes).await {
            Ok(()) => path.to_string_lossy().into_owned(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "portrait write failed");
                NO_IMAGE.to_string()
            }
        },
        Err(err) => {
            tracing::warn!(url, error = %err, "portrait download failed");
            NO_IMAGE.to_string()
        }
    }
}
