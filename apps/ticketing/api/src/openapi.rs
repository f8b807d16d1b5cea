use utoipa::OpenApi;

/// OpenAPI document of the public API
#[derive(OpenApi)]
#[openapi(
    info(title = "Ticketing API", description = "Task tracking for projects and employees"),
    nest(
        (path = "/api/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
