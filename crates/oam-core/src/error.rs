//! Error taxonomy for fetching and persisting resources.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while fetching or persisting a single resource.
///
/// `Transport`, `Status` and `Decode` are scoped to the one resource that
/// was being fetched; fetchers convert them into documented fallback values
/// instead of letting them reach sibling tasks. `Persistence` and
/// `Serialize` are the classes allowed to fail a case's materialization.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("write to {} failed: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not encode record for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True for the error classes that may fail a case's materialization
    /// (everything else degrades to a fallback value at the fetcher).
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            FetchError::Persistence { .. } | FetchError::Serialize { .. }
        )
    }
}
