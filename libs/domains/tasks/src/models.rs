use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{TaskError, TaskResult};

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TaskPriority {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
}

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
    TS,
)]
#[ts(export)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TaskStatus {
    /// Task not started
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Task in progress
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Task completed
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Parses free text into a closed enumeration, ASCII case-insensitively.
///
/// Surrounding whitespace is not trimmed.
pub fn parse_enum<E: FromStr>(field: &'static str, value: &str) -> TaskResult<E> {
    E::from_str(value).map_err(|_| TaskError::InvalidEnumValue {
        field,
        value: value.to_string(),
    })
}

/// Persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Task {
    /// Store-assigned identifier
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Replaces every mutable field with `draft`.
    ///
    /// `id` and `created_at` are untouched; `updated_at` never moves backwards.
    pub fn apply_draft(&mut self, draft: TaskDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.status = draft.status;
        self.due_date = draft.due_date;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Request body for both create and update.
///
/// `priority` and `status` stay plain text here and are coerced once,
/// after validation, by [`TaskRequest::into_draft`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct TaskRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        length(min = 3, max = 100, message = "Title must be between 3 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[schema(example = "HIGH")]
    #[validate(required(message = "Priority is required"))]
    pub priority: Option<String>,

    #[schema(example = "PENDING")]
    #[validate(required(message = "Task status is required"))]
    pub status: Option<String>,

    #[ts(as = "Option<String>")]
    #[validate(custom(function = "due_date_not_past"))]
    pub due_date: Option<NaiveDate>,
}

impl TaskRequest {
    /// Maps a validated request to the fields of a task.
    ///
    /// Priority is coerced before status, so a request with two bad values
    /// reports the priority.
    pub fn into_draft(self) -> TaskResult<TaskDraft> {
        let priority = parse_enum("priority", self.priority.as_deref().unwrap_or_default())?;
        let status = parse_enum("status", self.status.as_deref().unwrap_or_default())?;

        Ok(TaskDraft {
            title: self.title,
            description: self.description,
            priority,
            status,
            due_date: self.due_date,
        })
    }
}

/// A `null` title is treated like a missing one, so it fails validation.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Title is mandatory")));
    }
    Ok(())
}

fn due_date_not_past(due_date: &NaiveDate) -> Result<(), ValidationError> {
    if *due_date < Utc::now().date_naive() {
        return Err(ValidationError::new("due_date_in_past")
            .with_message(Cow::Borrowed("Due date must be today or a future date")));
    }
    Ok(())
}

/// Mutable task fields, ready to be written by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// DTO for task response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct TaskResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_request() -> TaskRequest {
        TaskRequest {
            title: "Sample Task".to_string(),
            description: Some("Desc".to_string()),
            priority: Some("HIGH".to_string()),
            status: Some("PENDING".to_string()),
            due_date: Some(Utc::now().date_naive() + Duration::days(2)),
        }
    }

    fn codes(errors: &validator::ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|errs| errs.iter().map(|e| e.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_title_too_short() {
        let request = TaskRequest {
            title: "ab".to_string(),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(codes(&errors, "title"), vec!["length"]);

        let request = TaskRequest {
            title: "abc".to_string(),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_title_too_long() {
        let request = TaskRequest {
            title: "x".repeat(101),
            ..valid_request()
        };
        assert!(request.validate().is_err());

        let request = TaskRequest {
            title: "x".repeat(100),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let request = TaskRequest {
            title: "     ".to_string(),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(codes(&errors, "title"), vec!["blank"]);
    }

    #[test]
    fn test_description_limit() {
        let request = TaskRequest {
            description: Some("d".repeat(501)),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(codes(&errors, "description"), vec!["length"]);

        let request = TaskRequest {
            description: Some("d".repeat(500)),
            ..valid_request()
        };
        assert!(request.validate().is_ok());

        let request = TaskRequest {
            description: None,
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_priority_and_status() {
        let request = TaskRequest {
            priority: None,
            status: None,
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(codes(&errors, "priority"), vec!["required"]);
        assert_eq!(codes(&errors, "status"), vec!["required"]);
    }

    #[test]
    fn test_due_date_today_is_allowed() {
        let request = TaskRequest {
            due_date: Some(Utc::now().date_naive()),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_due_date_yesterday_is_rejected() {
        let request = TaskRequest {
            due_date: Some(Utc::now().date_naive() - Duration::days(1)),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(codes(&errors, "due_date"), vec!["due_date_in_past"]);
    }

    #[test]
    fn test_enum_coercion_is_case_insensitive() {
        for text in ["high", "HIGH", "High"] {
            let priority: TaskPriority = parse_enum("priority", text).unwrap();
            assert_eq!(priority, TaskPriority::High);
        }
        let status: TaskStatus = parse_enum("status", "in_progress").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let err = parse_enum::<TaskPriority>("priority", "URGENT").unwrap_err();
        assert!(matches!(
            err,
            TaskError::InvalidEnumValue { field: "priority", ref value } if value == "URGENT"
        ));

        let err = parse_enum::<TaskStatus>("status", "DONE").unwrap_err();
        assert!(matches!(err, TaskError::InvalidEnumValue { field: "status", .. }));

        assert!(parse_enum::<TaskStatus>("status", " PENDING").is_err());
    }

    #[test]
    fn test_into_draft_checks_priority_first() {
        let request = TaskRequest {
            priority: Some("urgent".to_string()),
            status: Some("done".to_string()),
            ..valid_request()
        };
        let err = request.into_draft().unwrap_err();
        assert!(matches!(err, TaskError::InvalidEnumValue { field: "priority", .. }));
    }

    #[test]
    fn test_into_draft_copies_fields() {
        let request = valid_request();
        let due = request.due_date;
        let draft = request.into_draft().unwrap();

        assert_eq!(draft.title, "Sample Task");
        assert_eq!(draft.description.as_deref(), Some("Desc"));
        assert_eq!(draft.priority, TaskPriority::High);
        assert_eq!(draft.status, TaskStatus::Pending);
        assert_eq!(draft.due_date, due);
    }

    #[test]
    fn test_canonical_form_is_screaming_snake_case() {
        assert_eq!(TaskStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(TaskPriority::Low.to_string(), "LOW");
    }

    #[test]
    fn test_apply_draft_never_moves_updated_at_back() {
        let later = Utc::now() + Duration::hours(1);
        let mut task = Task {
            id: 1,
            title: "Old title".to_string(),
            description: None,
            priority: TaskPriority::Low,
            status: TaskStatus::Pending,
            due_date: None,
            created_at: later,
            updated_at: later,
        };

        let draft = valid_request().into_draft().unwrap();
        task.apply_draft(draft, Utc::now());

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Sample Task");
        assert_eq!(task.created_at, later);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_missing_title_deserializes_to_blank() {
        let request: TaskRequest =
            serde_json::from_str(r#"{"priority":"LOW","status":"PENDING"}"#).unwrap();
        assert_eq!(request.title, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_null_title_deserializes_to_blank() {
        let request: TaskRequest =
            serde_json::from_str(r#"{"title":null,"priority":"LOW","status":"PENDING"}"#).unwrap();
        assert_eq!(request.title, "");

        let errors = request.validate().unwrap_err();
        assert!(codes(&errors, "title").contains(&"blank".to_string()));
    }
}
