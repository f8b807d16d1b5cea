use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created
    #[default]
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    /// Waiting on user acceptance testing
    #[sea_orm(string_value = "UAT_TEST")]
    UatTest,
    #[sea_orm(string_value = "COMPLETE")]
    Complete,
}

impl TaskStatus {
    /// Every status, in workflow order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::UatTest,
        TaskStatus::Complete,
    ];

    /// Human-readable label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::UatTest => "UAT Testing",
            TaskStatus::Complete => "Completed",
        }
    }
}

/// A status together with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusOption {
    pub status: TaskStatus,
    pub label: String,
}

impl From<TaskStatus> for StatusOption {
    fn from(status: TaskStatus) -> Self {
        Self {
            status,
            label: status.label().to_string(),
        }
    }
}

/// Task as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Store-assigned identifier
    pub id: i64,
    pub subject: String,
    pub detail: String,
    pub status: TaskStatus,
    /// Set once when the task is created
    pub assigned_date: NaiveDate,
    pub project_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
    /// Soft-delete flag; deleted rows are invisible to every query
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert; the store assigns the identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub subject: String,
    pub detail: String,
    pub status: TaskStatus,
    pub assigned_date: NaiveDate,
    pub project_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
}

/// Task as exchanged with callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskDto {
    /// Absent until the task is first saved
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub assigned_employee_id: Option<i64>,
}

/// Project reference used to scope task queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProjectDto {
    pub id: i64,
    #[validate(length(min = 1))]
    pub project_code: String,
    #[serde(default)]
    pub project_name: String,
}

/// User known to the ticketing system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    /// Login name
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub enabled: bool,
}

/// Body of a status change request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Completed and outstanding task counts of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectTaskSummary {
    pub project_code: String,
    pub completed: u64,
    pub non_completed: u64,
}

/// Filters for the acting user's task list; at most one may be set
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignedTaskFilter {
    /// Only tasks with this status
    pub status: Option<TaskStatus>,
    /// Only tasks whose status differs from this one
    pub status_not: Option<TaskStatus>,
}
