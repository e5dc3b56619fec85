use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task with id {0} not found")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid value for {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// Store failure, passed through without retry
    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => AppError::NotFound(err.to_string()),
            TaskError::Validation(errors) => AppError::ValidationError(errors),
            TaskError::InvalidEnumValue { .. } => AppError::InvalidEnumValue(err.to_string()),
            TaskError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(TaskError::NotFound(42).to_string(), "Task with id 42 not found");
        assert_eq!(
            TaskError::InvalidEnumValue {
                field: "priority",
                value: "URGENT".to_string()
            }
            .to_string(),
            "Invalid value for priority: URGENT"
        );
    }

    #[test]
    fn test_maps_to_app_error() {
        assert!(matches!(
            AppError::from(TaskError::NotFound(1)),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(TaskError::Validation(ValidationErrors::new())),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            AppError::from(TaskError::from(sea_orm::DbErr::Custom("boom".to_string()))),
            AppError::Database(msg) if msg.contains("boom")
        ));
    }
}
