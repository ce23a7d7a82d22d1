//! Task records for the kanban board.
//!
//! Tasks serialize to the camelCase JSON layout used by the on-disk
//! documents: absent optional fields are omitted entirely rather than
//! written as empty arrays, and `createdAt` is an epoch-milliseconds
//! integer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Column a task occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    /// Board columns in display order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Column header shown on the board.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::Doing => "In Progress",
            Status::Done => "Completed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Todo
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            other => Err(Error::InvalidArgument(format!(
                "unknown status '{other}' (expected todo, doing, or done)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, high, or critical)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Feature,
    Enhancement,
    Documentation,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Feature => "feature",
            IssueType::Enhancement => "enhancement",
            IssueType::Documentation => "documentation",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(IssueType::Bug),
            "feature" => Ok(IssueType::Feature),
            "enhancement" => Ok(IssueType::Enhancement),
            "documentation" => Ok(IssueType::Documentation),
            other => Err(Error::InvalidArgument(format!(
                "unknown issue type '{other}' (expected bug, feature, enhancement, or documentation)"
            ))),
        }
    }
}

/// A single card on the board.
///
/// `tags` and `assignees` distinguish "absent" (`None`, omitted from JSON)
/// from "present but empty"; mutations collapse empty collections to absent
/// so the two states cannot drift apart on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: Status,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
}

impl Task {
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn assignee_list(&self) -> &[String] {
        self.assignees.as_deref().unwrap_or(&[])
    }

    /// First hyphen-delimited segment of the id, for compact display.
    pub fn short_id(&self) -> String {
        let full = self.id.to_string();
        full.split('-').next().unwrap_or(&full).to_string()
    }
}

/// Input for creating a task. The board fills in the id and timestamp.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub assignees: Option<Vec<String>>,
    pub comments: Option<u32>,
    pub attachments: Option<u32>,
    pub priority: Option<Priority>,
    pub issue_type: Option<IssueType>,
}

/// Trim entries, drop empties, dedupe preserving first-seen order.
/// An empty result collapses to `None` so it is omitted on disk.
pub fn normalize_labels(labels: Option<Vec<String>>) -> Option<Vec<String>> {
    let labels = labels?;
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|existing| existing == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    if seen.is_empty() {
        None
    } else {
        Some(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Write release notes".to_string(),
            description: "Summarize the changes".to_string(),
            status: Status::Doing,
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            due_date: Some("12/20".to_string()),
            tags: Some(vec!["Docs".to_string()]),
            assignees: None,
            comments: Some(2),
            attachments: None,
            priority: Some(Priority::High),
            issue_type: Some(IssueType::Documentation),
        }
    }

    #[test]
    fn serializes_to_camel_case_with_millis_timestamp() {
        let task = sample_task();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(value["dueDate"], "12/20");
        assert_eq!(value["issueType"], "documentation");
        assert_eq!(value["status"], "doing");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let task = sample_task();
        let value = serde_json::to_value(&task).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("assignees"));
        assert!(!object.contains_key("attachments"));
        assert!(object.contains_key("tags"));
    }

    #[test]
    fn round_trips_field_for_field() {
        let task = sample_task();
        let raw = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn deserializes_minimal_record() {
        let raw = r#"{
            "id": "0a0b8c5e-8d1f-4e7a-9c3b-2f6d5e4a1b0c",
            "title": "Bare card",
            "description": "",
            "status": "todo",
            "createdAt": 1700000000000
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.tags, None);
        assert_eq!(task.assignees, None);
        assert_eq!(task.tag_list(), &[] as &[String]);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("DOING".parse::<Status>().unwrap(), Status::Doing);
        assert!("blocked".parse::<Status>().is_err());
    }

    #[test]
    fn normalize_labels_trims_dedupes_and_collapses() {
        let normalized = normalize_labels(Some(vec![
            " Design ".to_string(),
            "Design".to_string(),
            "".to_string(),
            "Dev".to_string(),
        ]));
        assert_eq!(
            normalized,
            Some(vec!["Design".to_string(), "Dev".to_string()])
        );
        assert_eq!(normalize_labels(Some(vec!["  ".to_string()])), None);
        assert_eq!(normalize_labels(None), None);
    }
}
