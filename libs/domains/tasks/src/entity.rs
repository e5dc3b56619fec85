use crate::models::{Task, TaskDraft, TaskPriority, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority,
            status: model.status,
            due_date: model.due_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Insert model; the id comes from the `BIGSERIAL` sequence.
pub(crate) fn new_active_model(draft: TaskDraft, now: chrono::DateTime<chrono::Utc>) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        title: Set(draft.title),
        description: Set(draft.description),
        priority: Set(draft.priority),
        status: Set(draft.status),
        due_date: Set(draft.due_date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

/// Update model; `created_at` is left out of the `UPDATE`.
impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            priority: Set(task.priority),
            status: Set(task.status),
            due_date: Set(task.due_date),
            created_at: NotSet,
            updated_at: Set(task.updated_at.into()),
        }
    }
}
