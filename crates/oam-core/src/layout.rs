//! Case directory layout and status placement.
//!
//! Owns the Resolved/UnResolved decision and the on-disk skeleton:
//! `{root}/{status}/{case}/{attorneys,members,argument}`. The skeleton is
//! created in full before any fetcher writes into it.

use crate::api::TimelineEvent;
use crate::error::FetchError;
use std::path::{Path, PathBuf};

/// Placement bucket for a case, derived from its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Resolved,
    UnResolved,
}

impl CaseStatus {
    /// Directory name of the bucket.
    pub fn dir_name(self) -> &'static str {
        match self {
            CaseStatus::Resolved => "Resolved",
            CaseStatus::UnResolved => "UnResolved",
        }
    }
}

/// Classify a case: any timeline event whose label contains "decided"
/// (case-insensitive substring) marks it Resolved. This is the sole branch
/// governing directory placement.
pub fn classify(timeline: &[TimelineEvent]) -> CaseStatus {
    let decided = timeline.iter().any(|event| {
        event
            .event
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains("decided")
    });
    if decided {
        CaseStatus::Resolved
    } else {
        CaseStatus::UnResolved
    }
}

/// Resolved paths of one case's output tree.
#[derive(Debug, Clone)]
pub struct CaseLayout {
    pub case_dir: PathBuf,
    pub attorneys_dir: PathBuf,
    pub members_dir: PathBuf,
    pub argument_dir: PathBuf,
    pub document_path: PathBuf,
}

impl CaseLayout {
    /// Lay out paths under `root` for an already-sanitized case name.
    pub fn new(root: &Path, status: CaseStatus, case_name: &str) -> Self {
        let case_dir = root.join(status.dir_name()).join(case_name);
        CaseLayout {
            attorneys_dir: case_dir.join("attorneys"),
            members_dir: case_dir.join("members"),
            argument_dir: case_dir.join("argument"),
            document_path: case_dir.join(format!("{case_name}.json")),
            case_dir,
        }
    }

    /// Create the full directory skeleton. Must succeed before any writes.
    pub async fn create_dirs(&self) -> Result<(), FetchError> {
        for dir in [&self.attorneys_dir, &self.members_dir, &self.argument_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| FetchError::Persistence {
                    path: dir.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
