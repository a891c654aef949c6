//! Request and response bodies exchanged with the backend.
//!
//! These mirror the backend's JSON. Optional and defaulted fields keep decoding lenient, since the
//! dashboard only displays what it receives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the two account types the dashboard can link and monitor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum Integration {
    /// Telegram groups, ingested by the backend's "background tasks".
    #[strum(to_string = "Telegram")]
    Chat,
    /// The organization's mailbox, ingested by the backend's "email tasks".
    #[strum(to_string = "Email")]
    Email,
}

impl Integration {
    pub const ALL: [Integration; 2] = [Integration::Chat, Integration::Email];

    /// Path segment under `/api/v1` for this integration's task endpoints.
    pub fn tasks_path(&self) -> &'static str {
        match self {
            Integration::Chat => "background-tasks",
            Integration::Email => "email-tasks",
        }
    }

    /// Noun used in user-facing messages ("background task", "email task").
    pub fn task_noun(&self) -> &'static str {
        match self {
            Integration::Chat => "background task",
            Integration::Email => "email task",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Integration credentials registered for the organization.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct OrganizationForm {
    pub name: String,
    pub api_id: String,
    pub api_hash: String,
    pub app_password: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct OrganizationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Answer to the first linking step.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct LinkResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub requires_code: bool,
}

/// Answer to the verification-code step.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct CodeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub participants_count: u64,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct GroupsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Body of a task start request. Chat tasks read `group_ids`, email tasks read `filters`.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct StartTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct TaskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct TaskStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    /// The label the dashboard displays. Absent when the backend knows no task.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_running: Option<bool>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
    #[serde(default)]
    pub allowed_groups: Option<Vec<i64>>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Counters reported by the `/stats` endpoints. Chat stats count `total_messages`, email stats
/// count `total_emails`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total_messages: Option<u64>,
    #[serde(default)]
    pub total_emails: Option<u64>,
    #[serde(default)]
    pub unique_senders: u64,
    #[serde(default)]
    pub replies_sent: u64,
    #[serde(default)]
    pub date_range: DateRange,
}

impl IntegrationStats {
    pub fn total(&self) -> u64 {
        self.total_messages.or(self.total_emails).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TaskList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub active_tasks: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub total_active: u64,
}

/// The file type tag the RAG pipeline expects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display, clap::ValueEnum)]
pub enum FileType {
    #[default]
    #[strum(to_string = "image")]
    Image,
    #[strum(to_string = "pdf")]
    Pdf,
}

/// A file read into memory, ready to be sent as a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub file_type: FileType,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SentimentAnalysis {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_without_label_decodes() {
        let status: TaskStatus =
            serde_json::from_str(r#"{"success": false, "message": "No task"}"#).unwrap();
        assert_eq!(status.status, None);
        assert_eq!(status.message.as_deref(), Some("No task"));
    }

    #[test]
    fn stats_total_reads_either_counter() {
        let chat: IntegrationStats = serde_json::from_str(
            r#"{"success": true, "total_messages": 12, "unique_senders": 3, "replies_sent": 2,
                "date_range": {"start": null, "end": null}}"#,
        )
        .unwrap();
        let email: IntegrationStats =
            serde_json::from_str(r#"{"success": true, "total_emails": 7}"#).unwrap();
        assert_eq!(chat.total(), 12);
        assert_eq!(email.total(), 7);
        assert_eq!(email.date_range, DateRange::default());
    }

    #[test]
    fn start_request_omits_unset_fields() {
        let body = serde_json::to_string(&StartTaskRequest::default()).unwrap();
        assert_eq!(body, "{}");

        let body = serde_json::to_value(StartTaskRequest {
            group_ids: Some(vec![-1001, 42]),
            filters: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"group_ids": [-1001, 42]}));
    }

    #[test]
    fn group_handle_is_optional() {
        let group: Group =
            serde_json::from_str(r#"{"id": -100123, "title": "Traders", "username": null}"#)
                .unwrap();
        assert_eq!(group.username, None);
        assert_eq!(group.participants_count, 0);
    }
}
