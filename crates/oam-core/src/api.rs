//! Remote API shapes.
//!
//! Serde schemas for the case list, case detail, person detail and
//! argument detail documents. Every field the API does not guarantee is
//! `Option` or defaulted, so a sparse response decodes into named defaults
//! instead of failing the resource.

use serde::{Deserialize, Serialize};

/// One entry in a term's case-summary list.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Full case record, as returned by a case detail href.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    /// The API emits null placeholders inside the timeline array.
    #[serde(default)]
    pub timeline: Vec<Option<TimelineEvent>>,
    /// HTML; reduced to plain text before persistence.
    #[serde(default)]
    pub facts_of_the_case: Option<String>,
    /// HTML; reduced to plain text before persistence.
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub advocates: Vec<AdvocateEntry>,
    #[serde(default)]
    pub heard_by: Vec<Option<Court>>,
    #[serde(default)]
    pub oral_argument_audio: Vec<ArgumentRef>,
}

/// Dated event in a case's timeline ("Argued", "Decided", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub event: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub dates: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvocateEntry {
    #[serde(default)]
    pub advocate: Option<PersonRef>,
}

/// One sitting of the court that heard the case.
#[derive(Debug, Clone, Deserialize)]
pub struct Court {
    #[serde(default)]
    pub members: Vec<PersonRef>,
}

/// Reference to a person detail document.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Reference to an oral-argument session document.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentRef {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Person detail document (advocate or panel member).
#[derive(Debug, Clone, Deserialize)]
pub struct PersonDetail {
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    /// Role objects are passed through to the output verbatim.
    #[serde(default)]
    pub roles: Option<serde_json::Value>,
    /// HTML; reduced to plain text before persistence.
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub law_school: Option<LawSchool>,
}

/// The API serves law_school both as a bare string and as an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LawSchool {
    Name(String),
    Detail {
        #[serde(default)]
        name: Option<String>,
    },
}

impl LawSchool {
    pub fn name(&self) -> Option<&str> {
        match self {
            LawSchool::Name(name) => Some(name),
            LawSchool::Detail { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub file: Option<ImageFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageFile {
    #[serde(default)]
    pub href: Option<String>,
}

/// Oral-argument session detail document.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentDetail {
    /// Media variants; the API emits null placeholders here too.
    #[serde(default)]
    pub media_file: Vec<Option<MediaFile>>,
    #[serde(default)]
    pub transcript: Option<TranscriptDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaFile {
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Structured transcript: sections of speaker turns.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<TranscriptSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSection {
    #[serde(default)]
    pub turns: Vec<TranscriptTurn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptTurn {
    /// Offset of the turn in seconds.
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub speaker: Option<Speaker>,
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Speaker {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: Option<String>,
}

/// URL of a term's case-summary list.
pub fn case_list_url(base: &str, term: u32) -> String {
    format!(
        "{}/cases?per_page=0&filter=term:{}",
        base.trim_end_matches('/'),
        term
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_list_url_format() {
        assert_eq!(
            case_list_url("https://api.oyez.org", 1990),
            "https://api.oyez.org/cases?per_page=0&filter=term:1990"
        );
        assert_eq!(
            case_list_url("http://127.0.0.1:8080/", 2001),
            "http://127.0.0.1:8080/cases?per_page=0&filter=term:2001"
        );
    }

    #[test]
    fn case_detail_tolerates_sparse_response() {
        let detail: CaseDetail = serde_json::from_str(r#"{"name": "Doe v. Roe"}"#).unwrap();
        assert_eq!(detail.name.as_deref(), Some("Doe v. Roe"));
        assert!(detail.term.is_none());
        assert!(detail.timeline.is_empty());
        assert!(detail.advocates.is_empty());
        assert!(detail.heard_by.is_empty());
        assert!(detail.oral_argument_audio.is_empty());
    }

    #[test]
    fn case_detail_accepts_null_timeline_and_heard_by_entries() {
        let detail: CaseDetail = serde_json::from_str(
            r#"{
                "timeline": [null, {"event": "Argued", "dates": [657417600]}],
                "heard_by": [null, {"members": [{"name": "A", "href": "http://x/p/1"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(detail.timeline.len(), 2);
        assert!(detail.timeline[0].is_none());
        assert_eq!(
            detail.timeline[1].as_ref().unwrap().event.as_deref(),
            Some("Argued")
        );
        let members: Vec<_> = detail.heard_by.iter().flatten().collect();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].members[0].name.as_deref(), Some("A"));
    }

    #[test]
    fn person_detail_law_school_string_or_object() {
        let detail: PersonDetail =
            serde_json::from_str(r#"{"law_school": "Harvard Law School"}"#).unwrap();
        assert_eq!(
            detail.law_school.as_ref().and_then(LawSchool::name),
            Some("Harvard Law School")
        );

        let detail: PersonDetail =
            serde_json::from_str(r#"{"law_school": {"name": "Yale Law School"}}"#).unwrap();
        assert_eq!(
            detail.law_school.as_ref().and_then(LawSchool::name),
            Some("Yale Law School")
        );
    }

    #[test]
    fn argument_detail_accepts_null_media_entries() {
        let detail: ArgumentDetail = serde_json::from_str(
            r#"{"media_file": [null, {"mime": "audio/mpeg", "href": "http://x/a.mp3"}]}"#,
        )
        .unwrap();
        let files: Vec<_> = detail.media_file.iter().flatten().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime.as_deref(), Some("audio/mpeg"));
    }

    #[test]
    fn transcript_turn_defaults() {
        let turn: TranscriptTurn = serde_json::from_str(r#"{}"#).unwrap();
        assert!(turn.start.is_none());
        assert!(turn.speaker.is_none());
        assert!(turn.text_blocks.is_empty());
    }
}
