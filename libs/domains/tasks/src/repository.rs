use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskDraft, TaskPriority, TaskStatus};

/// Repository trait for Task persistence
///
/// The store holds no policy: validation, coercion and not-found handling
/// for reads live in [`TaskService`](crate::TaskService).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// Persist a new task, assigning its id and both timestamps
    async fn insert(&self, draft: TaskDraft) -> TaskResult<Task>;

    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskResult<Vec<Task>>;

    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>>;

    /// Overwrite every mutable column of an existing task
    async fn update(&self, task: Task) -> TaskResult<Task>;

    /// Returns `true` when a task was removed
    async fn delete_by_id(&self, id: i64) -> TaskResult<bool>;
}

/// In-memory repository, ordered by id.
#[derive(Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<BTreeMap<i64, Task>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    async fn find_where(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks.values().filter(|t| predicate(t)).cloned().collect()
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn insert(&self, draft: TaskDraft) -> TaskResult<Task> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(id, task.clone());

        tracing::info!(task_id = id, "Created task");
        Ok(task)
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.find_where(|_| true).await)
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskResult<Vec<Task>> {
        Ok(self.find_where(|t| t.priority == priority).await)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskResult<Vec<Task>> {
        Ok(self.find_where(|t| t.status == status).await)
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        let existing = tasks.get_mut(&task.id).ok_or(TaskError::NotFound(task.id))?;

        existing.title = task.title;
        existing.description = task.description;
        existing.priority = task.priority;
        existing.status = task.status;
        existing.due_date = task.due_date;
        existing.updated_at = task.updated_at;

        tracing::info!(task_id = existing.id, "Updated task");
        Ok(existing.clone())
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<bool> {
        let removed = self.tasks.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(removed)
    }
}
