//! Run driver: term partitioning and case fan-out.
//!
//! Terms run concurrently; every case within a term runs concurrently. The
//! run settles only when every term and case task has finished, then totals
//! are reported. Individual failures are logged and counted, never fatal;
//! the run itself fails only when the output root cannot be created or no
//! term list could be fetched at all.

use crate::api::{self, CaseSummary};
use crate::budget::GlobalRequestBudget;
use crate::config::OamConfig;
use crate::pipeline;
use crate::transport::Transport;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Totals for one archive run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub terms: u32,
    pub cases_archived: u64,
    pub cases_failed: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, Default)]
struct TermCounts {
    archived: u64,
    failed: u64,
    list_ok: bool,
}

/// Archive every case in the configured term range.
pub async fn run_archive(cfg: &OamConfig) -> Result<RunSummary> {
    let started = Instant::now();

    url::Url::parse(&cfg.api_base_url)
        .with_context(|| format!("invalid api_base_url: {}", cfg.api_base_url))?;
    tokio::fs::create_dir_all(&cfg.output_root)
        .await
        .with_context(|| format!("create output root {}", cfg.output_root.display()))?;

    let budget = Arc::new(GlobalRequestBudget::new(cfg.max_concurrent_requests));
    let transport = Transport::new(
        Arc::clone(&budget),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;

    tracing::info!(
        term_start = cfg.term_start,
        term_end = cfg.term_end,
        max_requests = budget.max_total(),
        root = %cfg.output_root.display(),
        "archive run starting"
    );

    let mut term_tasks = JoinSet::new();
    for term in cfg.term_start..=cfg.term_end {
        let transport = transport.clone();
        let base = cfg.api_base_url.clone();
        let output_root = cfg.output_root.clone();
        let append_transcripts = cfg.append_transcripts;
        term_tasks.spawn(async move {
            archive_term(transport, base, term, output_root, append_transcripts).await
        });
    }

    let mut terms = 0u32;
    let mut archived = 0u64;
    let mut failed = 0u64;
    let mut any_list_ok = false;
    while let Some(joined) = term_tasks.join_next().await {
        match joined {
            Ok(counts) => {
                terms += 1;
                archived += counts.archived;
                failed += counts.failed;
                any_list_ok |= counts.list_ok;
            }
            Err(err) => {
                terms += 1;
                tracing::error!(error = %err, "term task panicked");
            }
        }
    }

    if !any_list_ok {
        anyhow::bail!("could not reach the API: no term case list could be fetched");
    }

    let summary = RunSummary {
        terms,
        cases_archived: archived,
        cases_failed: failed,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        terms = summary.terms,
        archived = summary.cases_archived,
        failed = summary.cases_failed,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "archive run settled"
    );
    Ok(summary)
}

/// Fetch one term's case list and run every case pipeline to completion.
async fn archive_term(
    transport: Transport,
    base: String,
    term: u32,
    output_root: PathBuf,
    append_transcripts: bool,
) -> TermCounts {
    let url = api::case_list_url(&base, term);
    let summaries: Vec<CaseSummary> = match transport.get_json(&url).await {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(term, error = %err, "case list fetch failed");
            return TermCounts::default();
        }
    };
    tracing::info!(term, cases = summaries.len(), "term case list fetched");

    let mut case_tasks = JoinSet::new();
    for summary in summaries {
        let Some(href) = summary.href else {
            continue;
        };
        case_tasks.spawn(pipeline::process_case(
            transport.clone(),
            href,
            output_root.clone(),
            append_transcripts,
        ));
    }

    let mut counts = TermCounts {
        list_ok: true,
        ..TermCounts::default()
    };
    while let Some(joined) = case_tasks.join_next().await {
        match joined {
            Ok(Ok(())) => counts.archived += 1,
            Ok(Err(err)) => {
                counts.failed += 1;
                tracing::warn!(term, error = %err, "case pipeline failed");
            }
            Err(err) => {
                counts.failed += 1;
                tracing::warn!(term, error = %err, "case task panicked");
            }
        }
    }
    counts
}
