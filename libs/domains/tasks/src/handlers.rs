use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestEnumResponse, BadRequestIdResponse, BadRequestValidationResponse,
    InternalServerErrorResponse, NotFoundResponse,
};
use axum_helpers::{IdPath, JsonBody};
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{TaskPriority, TaskRequest, TaskResponse, TaskStatus, parse_enum};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        get_task,
        create_task,
        update_task,
        delete_task,
        list_tasks_by_priority,
        list_tasks_by_status,
    ),
    components(
        schemas(TaskRequest, TaskResponse, TaskPriority, TaskStatus),
        responses(
            BadRequestValidationResponse,
            BadRequestEnumResponse,
            BadRequestIdResponse,
            NotFoundResponse,
            InternalServerErrorResponse,
        )
    ),
    tags(
        (name = "tasks", description = "Task management")
    )
)]
pub struct TasksApiDoc;

/// Routes for `/tasks`, with the service applied as state.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    Router::new()
        .route("/", get(list_tasks::<R>).post(create_task::<R>))
        .route(
            "/{id}",
            get(get_task::<R>)
                .put(update_task::<R>)
                .delete(delete_task::<R>),
        )
        .route("/priority/{priority}", get(list_tasks_by_priority::<R>))
        .route("/status/{status}", get(list_tasks_by_status::<R>))
        .with_state(service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks", body = Vec<TaskResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<TaskService<R>>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    Ok(Json(service.get_all_tasks().await?))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    IdPath(id): IdPath,
) -> TaskResult<Json<TaskResponse>> {
    Ok(Json(service.get_task_by_id(id).await?))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    JsonBody(request): JsonBody<TaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<TaskRequest>,
) -> TaskResult<Json<TaskResponse>> {
    Ok(Json(service.update_task(id, request).await?))
}

/// Delete a task. Unknown ids also return 204.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    IdPath(id): IdPath,
) -> TaskResult<StatusCode> {
    service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List tasks with the given priority
#[utoipa::path(
    get,
    path = "/priority/{priority}",
    tag = "tasks",
    params(
        ("priority" = String, Path, description = "LOW, MEDIUM or HIGH (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Matching tasks", body = Vec<TaskResponse>),
        (status = 400, response = BadRequestEnumResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks_by_priority<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    Path(priority): Path<String>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let priority = parse_enum("priority", &priority)?;
    Ok(Json(service.get_tasks_by_priority(priority).await?))
}

/// List tasks with the given status
#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = "tasks",
    params(
        ("status" = String, Path, description = "PENDING, IN_PROGRESS or COMPLETED (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Matching tasks", body = Vec<TaskResponse>),
        (status = 400, response = BadRequestEnumResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn list_tasks_by_status<R: TaskRepository>(
    State(service): State<TaskService<R>>,
    Path(status): Path<String>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let status = parse_enum("status", &status)?;
    Ok(Json(service.get_tasks_by_status(status).await?))
}
