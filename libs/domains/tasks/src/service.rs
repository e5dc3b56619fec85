use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{TaskPriority, TaskRequest, TaskResponse, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
///
/// Every request is validated, then coerced, before the repository is touched.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, request), fields(task_title = %request.title))]
    pub async fn create_task(&self, request: TaskRequest) -> TaskResult<TaskResponse> {
        request.validate()?;
        let draft = request.into_draft()?;

        let task = self.repository.insert(draft).await?;
        Ok(task.into())
    }

    #[instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task_by_id(&self, id: i64) -> TaskResult<TaskResponse> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(TaskError::NotFound(id))
    }

    /// Full replacement of the mutable fields; `id` and `created_at` are kept.
    #[instrument(skip(self, request), fields(task_id = id))]
    pub async fn update_task(&self, id: i64, request: TaskRequest) -> TaskResult<TaskResponse> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        request.validate()?;
        let draft = request.into_draft()?;
        task.apply_draft(draft, Utc::now());

        let task = self.repository.update(task).await?;
        Ok(task.into())
    }

    /// Deleting an unknown id succeeds without touching the store.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        if !self.repository.delete_by_id(id).await? {
            tracing::debug!(task_id = id, "Delete requested for missing task");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_tasks_by_priority(
        &self,
        priority: TaskPriority,
    ) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_by_priority(priority).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tasks_by_status(&self, status: TaskStatus) -> TaskResult<Vec<TaskResponse>> {
        let tasks = self.repository.find_by_status(status).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }
}
