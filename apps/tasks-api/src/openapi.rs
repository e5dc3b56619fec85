use domain_tasks::TasksApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Tasks API", description = "Create, read, update, delete and filter tasks"),
    nest(
        (path = "/api/tasks", api = TasksApiDoc)
    )
)]
pub struct ApiDoc;
