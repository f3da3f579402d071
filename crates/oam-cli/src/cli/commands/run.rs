//! `oam run` – drive the full archive run.

use anyhow::Result;
use oam_core::config::OamConfig;
use oam_core::driver;
use std::path::PathBuf;

pub async fn run_archive_cmd(
    mut cfg: OamConfig,
    from_term: Option<u32>,
    to_term: Option<u32>,
    out: Option<PathBuf>,
    max_requests: Option<usize>,
    api_base_url: Option<String>,
    append_transcripts: bool,
) -> Result<()> {
    if let Some(term) = from_term {
        cfg.term_start = term;
    }
    if let Some(term) = to_term {
        cfg.term_end = term;
    }
    if let Some(dir) = out {
        cfg.output_root = dir;
    }
    if let Some(n) = max_requests {
        cfg.max_concurrent_requests = n;
    }
    if let Some(base) = api_base_url {
        cfg.api_base_url = base;
    }
    if append_transcripts {
        cfg.append_transcripts = true;
    }
    anyhow::ensure!(
        cfg.term_start <= cfg.term_end,
        "term range is empty: {} > {}",
        cfg.term_start,
        cfg.term_end
    );

    let summary = driver::run_archive(&cfg).await?;
    println!(
        "Archived {} case(s) across {} term(s) in {:.2}s ({} failed).",
        summary.cases_archived,
        summary.terms,
        summary.elapsed.as_secs_f64(),
        summary.cases_failed
    );
    Ok(())
}
