//! Route composition and readiness checks

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use domain_tasks::{PgTaskRepository, PgUserRepository, TaskService};
use sea_orm::DatabaseConnection;

/// Routes nested under `/api`
pub fn routes(db: &DatabaseConnection) -> Router {
    let service = TaskService::new(
        PgTaskRepository::new(db.clone()),
        PgUserRepository::new(db.clone()),
    );

    Router::new().nest("/tasks", domain_tasks::router(service))
}

/// `/ready` with a live database check
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
