//! Per-case pipeline: decode, classify, fan out, aggregate, persist.
//!
//! One pipeline instance exclusively owns its case document and index
//! files; the only state shared with other cases is the transport's request
//! budget. The three sub-resource fan-outs (advocates, members, argument
//! sessions) run concurrently with each other, and every item within a
//! fan-out runs concurrently too.

use crate::api::{CaseDetail, TimelineEvent};
use crate::argument;
use crate::document::CaseDocument;
use crate::error::FetchError;
use crate::html;
use crate::index::JsonArrayFile;
use crate::layout::{self, CaseLayout};
use crate::people;
use crate::sanitize;
use crate::transport::Transport;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Run the full pipeline for one case URL.
///
/// Sub-resource failures degrade to placeholders or skipped entries and the
/// remaining work continues; only the case detail fetch itself and
/// persistence failures fail the case.
pub async fn process_case(
    transport: Transport,
    case_url: String,
    output_root: PathBuf,
    append_transcripts: bool,
) -> Result<(), FetchError> {
    let detail: CaseDetail = transport.get_json(&case_url).await?;

    let case_name = sanitize::component(detail.name.as_deref().unwrap_or("unknown_case"));
    let timeline: Vec<TimelineEvent> = detail.timeline.iter().flatten().cloned().collect();
    let status = layout::classify(&timeline);
    let layout = CaseLayout::new(&output_root, status, &case_name);
    layout.create_dirs().await?;

    let advocates_index = Arc::new(JsonArrayFile::new(
        layout.attorneys_dir.join("advocates.json"),
    ));
    let members_index = Arc::new(JsonArrayFile::new(layout.members_dir.join("members.json")));
    let arguments_index = Arc::new(JsonArrayFile::new(
        layout.argument_dir.join("arguments.json"),
    ));

    let mut advocate_tasks = JoinSet::new();
    for entry in &detail.advocates {
        let Some(person) = &entry.advocate else {
            continue;
        };
        let Some(href) = person.href.clone() else {
            continue;
        };
        let name = sanitize::component(person.name.as_deref().unwrap_or("unknown_advocate"));
        let transport = transport.clone();
        let dir = layout.attorneys_dir.clone();
        let index = Arc::clone(&advocates_index);
        advocate_tasks
            .spawn(async move { people::fetch_person(&transport, &href, &name, &dir, &index).await });
    }

    let mut member_tasks = JoinSet::new();
    for court in detail.heard_by.iter().flatten() {
        for member in &court.members {
            let Some(href) = member.href.clone() else {
                continue;
            };
            let name = sanitize::component(member.name.as_deref().unwrap_or("unknown_member"));
            let transport = transport.clone();
            let dir = layout.members_dir.clone();
            let index = Arc::clone(&members_index);
            member_tasks.spawn(
                async move { people::fetch_person(&transport, &href, &name, &dir, &index).await },
            );
        }
    }

    let mut argument_tasks = JoinSet::new();
    for session in &detail.oral_argument_audio {
        let Some(href) = session.href.clone() else {
            continue;
        };
        let title =
            sanitize::component(session.title.as_deref().unwrap_or("unknown_argument_title"));
        let transport = transport.clone();
        let dir = layout.argument_dir.clone();
        let index = Arc::clone(&arguments_index);
        argument_tasks.spawn(async move {
            argument::fetch_argument(&transport, &href, &title, &dir, &index, append_transcripts)
                .await
        });
    }

    let mut document = CaseDocument {
        name: case_name.clone(),
        term: detail.term.clone(),
        timeline,
        facts_of_the_case: detail.facts_of_the_case.as_deref().map(html::strip_tags),
        conclusion: detail.conclusion.as_deref().map(html::strip_tags),
        advocates: Vec::new(),
        members: Vec::new(),
        arguments: Vec::new(),
    };

    // Drain all three fan-outs, collecting every outcome. A failed task
    // never cancels its siblings; the first persistence failure is kept and
    // fails the case only after everything has settled.
    let mut persistence_failure = None;
    drain(
        advocate_tasks,
        &mut document.advocates,
        "advocate",
        &case_name,
        &mut persistence_failure,
    )
    .await;
    drain(
        member_tasks,
        &mut document.members,
        "member",
        &case_name,
        &mut persistence_failure,
    )
    .await;
    drain(
        argument_tasks,
        &mut document.arguments,
        "argument",
        &case_name,
        &mut persistence_failure,
    )
    .await;

    if let Some(err) = persistence_failure {
        return Err(err);
    }

    let document_file = JsonArrayFile::new(layout.document_path.clone());
    document_file.append(&document).await?;

    tracing::info!(
        case = %case_name,
        status = status.dir_name(),
        advocates = document.advocates.len(),
        members = document.members.len(),
        arguments = document.arguments.len(),
        "case archived"
    );
    Ok(())
}

/// Collect a fan-out's outcomes: resolved records go into `into`, skipped
/// entries are dropped, errors are logged and the first one kept.
async fn drain<T: 'static>(
    mut tasks: JoinSet<Result<Option<T>, FetchError>>,
    into: &mut Vec<T>,
    kind: &str,
    case: &str,
    first_error: &mut Option<FetchError>,
) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(Some(record))) => into.push(record),
            Ok(Ok(None)) => {}
            Ok(Err(err)) => {
                tracing::warn!(case, kind, error = %err, "sub-resource task failed");
                if first_error.is_none() {
                    *first_error = Some(err);
                }
            }
            Err(err) => {
                tracing::warn!(case, kind, error = %err, "sub-resource task panicked");
            }
        }
    }
}
