//! Tasks Domain
//!
//! CRUD, soft-delete, status changes and project-scoped counts for tickets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum router, OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Tasks and users (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, PgUserRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = TaskService::new(PgTaskRepository::new(db.clone()), PgUserRepository::new(db));
//! let open = service.total_non_completed_task("PRJ1").await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod users;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use handlers::{ACTOR_HEADER, ApiDoc, router};
pub use models::{
    AssignedTaskFilter, NewTask, ProjectDto, ProjectTaskSummary, StatusOption, StatusUpdate, Task,
    TaskDto, TaskStatus, User,
};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
pub use users::{InMemoryUserRepository, PgUserRepository, UserRepository};
