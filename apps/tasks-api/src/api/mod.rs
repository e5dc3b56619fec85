use axum::Router;
use domain_tasks::{TaskRepository, TaskService, handlers};
use sea_orm::DatabaseConnection;

pub mod health;

/// API routes without the `/api` prefix; `create_router` adds it.
pub fn routes<R: TaskRepository + 'static>(tasks: TaskService<R>) -> Router {
    Router::new().nest("/tasks", handlers::router(tasks))
}

/// `/ready`, checking the database connection.
pub fn ready_router(db: DatabaseConnection) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::server::{create_router, health_router};
    use core_config::{AppInfo, server::ServerConfig};
    use domain_tasks::InMemoryTaskRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let root = health_router(AppInfo {
            name: "tasks_api",
            version: "0.1.0",
        });
        create_router::<ApiDoc>(routes(service), root, &ServerConfig::default()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_tasks_are_served_under_api_prefix() {
        let app = app();

        let create = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Write report",
                    "priority": "MEDIUM",
                    "status": "PENDING"
                })
                .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::get("/api/tasks/priority/medium")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_openapi_lists_task_paths() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let doc = body_json(response).await;
        assert!(doc["paths"]["/api/tasks/{id}"].is_object());
        assert!(doc["paths"]["/api/tasks/status/{status}"].is_object());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_is_compressed() {
        let response = app()
            .oneshot(
                Request::get("/health")
                    .header("accept-encoding", "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-encoding"], "gzip");
    }
}
