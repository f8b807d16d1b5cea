use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{AppError, ErrorResponse, IdPath, ValidatedJson, ValidatedQuery};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{
    AssignedTaskFilter, ProjectDto, ProjectTaskSummary, StatusOption, StatusUpdate, TaskDto,
    TaskStatus,
};
use crate::repository::TaskRepository;
use crate::service::TaskService;
use crate::users::UserRepository;

/// Header carrying the acting user's login name
pub const ACTOR_HEADER: &str = "x-user-name";

const TAG: &str = "tasks";

type SharedService<R, U> = Arc<TaskService<R, U>>;

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        list_statuses,
        create_task,
        get_task,
        update_task,
        delete_task,
        update_task_status,
        list_assigned_tasks,
        project_summary,
        delete_project_tasks,
        complete_project_tasks,
    ),
    components(schemas(
        TaskDto,
        TaskStatus,
        StatusOption,
        StatusUpdate,
        ProjectDto,
        ProjectTaskSummary,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Login name of the acting user, taken from [`ACTOR_HEADER`]
#[derive(Debug, Clone)]
pub struct Actor(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Actor(value.to_string()))
            .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", ACTOR_HEADER)))
    }
}

/// Create the task router with all HTTP endpoints
pub fn router<R, U>(service: TaskService<R, U>) -> Router
where
    R: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/statuses", get(list_statuses))
        .route("/assigned", get(list_assigned_tasks))
        .route(
            "/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/{id}/status", patch(update_task_status))
        .route("/projects/{code}/summary", get(project_summary))
        .route("/projects/delete", post(delete_project_tasks))
        .route("/projects/complete", post(complete_project_tasks))
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of tasks", body = Vec<TaskDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
) -> TaskResult<Json<Vec<TaskDto>>> {
    Ok(Json(service.list_all_tasks().await?))
}

/// Every task status with its display label
#[utoipa::path(
    get,
    path = "/statuses",
    tag = TAG,
    responses(
        (status = 200, description = "Task statuses", body = Vec<StatusOption>)
    )
)]
async fn list_statuses() -> Json<Vec<StatusOption>> {
    Json(TaskStatus::ALL.into_iter().map(StatusOption::from).collect())
}

/// Create a task; its status always starts as `OPEN`
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = TaskDto,
    responses(
        (status = 201, description = "Task created"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    ValidatedJson(input): ValidatedJson<TaskDto>,
) -> TaskResult<StatusCode> {
    service.save(input).await?;
    Ok(StatusCode::CREATED)
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskDto),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
async fn get_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
) -> TaskResult<Json<TaskDto>> {
    let task = service.find_by_id(id).await?.ok_or(TaskError::NotFound(id))?;
    Ok(Json(task))
}

/// Update a task's editable fields
///
/// Status and assignment date in the body are ignored.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskDto,
    responses(
        (status = 200, description = "Task updated", body = TaskDto),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    )
)]
async fn update_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
    ValidatedJson(mut input): ValidatedJson<TaskDto>,
) -> TaskResult<Json<TaskDto>> {
    input.id = Some(id);
    let task = service.update(input).await?.ok_or(TaskError::NotFound(id))?;
    Ok(Json(task))
}

/// Soft-delete a task; unknown IDs are accepted
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
) -> TaskResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change a task's status; unknown IDs are accepted
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
async fn update_task_status<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<StatusUpdate>,
) -> TaskResult<StatusCode> {
    service.update_status(id, input.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tasks assigned to the acting user
///
/// Without a filter every assigned task is returned.
#[utoipa::path(
    get,
    path = "/assigned",
    tag = TAG,
    params(
        AssignedTaskFilter,
        ("x-user-name" = String, Header, description = "Login of the acting user")
    ),
    responses(
        (status = 200, description = "Assigned tasks", body = Vec<TaskDto>),
        (status = 400, description = "Both filters given", body = ErrorResponse),
        (status = 401, description = "Missing user header", body = ErrorResponse)
    )
)]
async fn list_assigned_tasks<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    Actor(actor): Actor,
    ValidatedQuery(filter): ValidatedQuery<AssignedTaskFilter>,
) -> TaskResult<Json<Vec<TaskDto>>> {
    let tasks = match (filter.status, filter.status_not) {
        (Some(_), Some(_)) => {
            return Err(TaskError::Validation(
                "status and status_not are mutually exclusive".to_string(),
            ));
        }
        (Some(status), None) => service.list_all_tasks_by_status(&actor, status).await?,
        (None, Some(status)) => service.list_all_tasks_by_status_is_not(&actor, status).await?,
        (None, None) => match service.find_user(&actor).await? {
            Some(user) => service.read_all_by_assigned_employee(&user).await?,
            None => Vec::new(),
        },
    };

    Ok(Json(tasks))
}

/// Completed and outstanding task counts of a project
#[utoipa::path(
    get,
    path = "/projects/{code}/summary",
    tag = TAG,
    params(
        ("code" = String, Path, description = "Project code")
    ),
    responses(
        (status = 200, description = "Task counts", body = ProjectTaskSummary)
    )
)]
async fn project_summary<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    Path(project_code): Path<String>,
) -> TaskResult<Json<ProjectTaskSummary>> {
    let completed = service.total_completed_task(&project_code).await?;
    let non_completed = service.total_non_completed_task(&project_code).await?;

    Ok(Json(ProjectTaskSummary {
        project_code,
        completed,
        non_completed,
    }))
}

/// Soft-delete every task of a project
#[utoipa::path(
    post,
    path = "/projects/delete",
    tag = TAG,
    request_body = ProjectDto,
    responses(
        (status = 204, description = "Project tasks deleted"),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
async fn delete_project_tasks<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    ValidatedJson(project): ValidatedJson<ProjectDto>,
) -> TaskResult<impl IntoResponse> {
    service.delete_by_project(&project).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark every task of a project `COMPLETE`
#[utoipa::path(
    post,
    path = "/projects/complete",
    tag = TAG,
    request_body = ProjectDto,
    responses(
        (status = 204, description = "Project tasks completed"),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
async fn complete_project_tasks<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    ValidatedJson(project): ValidatedJson<ProjectDto>,
) -> TaskResult<impl IntoResponse> {
    service.complete_by_project(&project).await?;
    Ok(StatusCode::NO_CONTENT)
}
