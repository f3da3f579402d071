//! On-disk record shapes: person, argument session and the case document.

use crate::api::TimelineEvent;
use serde::Serialize;

/// Resolved advocate or panel member, as persisted to the category's shared
/// index and into the owning case document. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRecord {
    pub name: String,
    /// Saved portrait path, or the no-image placeholder.
    pub image: String,
    pub roles: Option<serde_json::Value>,
    /// Plain text (markup stripped).
    pub biography: Option<String>,
    pub law_school: Option<String>,
}

/// Resolved oral-argument session.
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentRecord {
    pub title: String,
    /// Saved audio path, or the no-audio placeholder.
    pub audio: String,
    /// Saved transcript path, or the no-transcript placeholder.
    pub transcript: String,
}

/// The materialized per-case aggregate document. Owned exclusively by the
/// case's pipeline instance.
#[derive(Debug, Clone, Serialize)]
pub struct CaseDocument {
    pub name: String,
    pub term: Option<String>,
    /// Timeline with the API's null placeholders dropped.
    pub timeline: Vec<TimelineEvent>,
    pub facts_of_the_case: Option<String>,
    pub conclusion: Option<String>,
    pub advocates: Vec<PersonRecord>,
    pub members: Vec<PersonRecord>,
    pub arguments: Vec<ArgumentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_document_serializes_all_sections() {
        let doc = CaseDocument {
            name: "Doe_v__Roe".to_string(),
            term: Some("1990".to_string()),
            timeline: vec![TimelineEvent {
                event: Some("Decided".to_string()),
                dates: vec![660009600],
            }],
            facts_of_the_case: Some("Some facts".to_string()),
            conclusion: None,
            advocates: vec![PersonRecord {
                name: "Alice_Smith".to_string(),
                image: "Cases/Resolved/Doe_v__Roe/attorneys/Alice_Smith.jpg".to_string(),
                roles: None,
                biography: None,
                law_school: None,
            }],
            members: Vec::new(),
            arguments: Vec::new(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["name"], "Doe_v__Roe");
        assert_eq!(value["conclusion"], serde_json::Value::Null);
        assert_eq!(value["advocates"][0]["name"], "Alice_Smith");
        assert!(value["members"].as_array().unwrap().is_empty());
    }
}
