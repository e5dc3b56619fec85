use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{Task, TaskDraft, TaskPriority, TaskStatus},
    repository::TaskRepository,
};

/// PostgreSQL-backed repository.
///
/// List queries are ordered by id so results match the in-memory store.
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, draft: TaskDraft) -> TaskResult<Task> {
        let model = entity::new_active_model(draft, Utc::now())
            .insert(&self.db)
            .await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Priority.eq(priority))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Status.eq(status))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => TaskError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(task_id = id, "Updated task");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, priority: TaskPriority, status: TaskStatus) -> entity::Model {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .unwrap();
        entity::Model {
            id,
            title: format!("Task {id}"),
            description: Some("Desc".to_string()),
            priority,
            status,
            due_date: NaiveDate::from_ymd_opt(2030, 6, 1),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "Task 1".to_string(),
            description: Some("Desc".to_string()),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2030, 6, 1),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, TaskPriority::High, TaskStatus::Pending)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.find_by_id(1).await.unwrap().unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2030, 6, 1));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_generated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, TaskPriority::High, TaskStatus::Pending)]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.insert(draft()).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Task 1");
    }

    #[tokio::test]
    async fn test_find_by_status_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(2, TaskPriority::Low, TaskStatus::InProgress),
                model(4, TaskPriority::High, TaskStatus::InProgress),
            ]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let tasks = repo.find_by_status(TaskStatus::InProgress).await.unwrap();

        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(tasks.iter().all(|t| t.status == TaskStatus::InProgress));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task: Task = model(5, TaskPriority::Low, TaskStatus::Pending).into();
        let err = repo.update(task).await.unwrap_err();

        assert!(matches!(err, TaskError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_becomes_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, TaskError::Database(msg) if msg.contains("connection refused")));
    }
}
