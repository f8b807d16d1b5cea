use crate::models::{NewTask, Task, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for Tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_subject: String,
    #[sea_orm(column_type = "Text")]
    pub task_detail: String,
    pub task_status: TaskStatus,
    pub assigned_date: Date,
    pub project_id: Option<i64>,
    pub assigned_employee_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedEmployeeId",
        to = "super::user::Column::Id"
    )]
    AssignedEmployee,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedEmployee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            subject: model.task_subject,
            detail: model.task_detail,
            status: model.task_status,
            assigned_date: model.assigned_date,
            project_id: model.project_id,
            assigned_employee_id: model.assigned_employee_id,
            is_deleted: model.is_deleted,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Insert: the id comes from the table's sequence
impl From<NewTask> for ActiveModel {
    fn from(input: NewTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            task_subject: Set(input.subject),
            task_detail: Set(input.detail),
            task_status: Set(input.status),
            assigned_date: Set(input.assigned_date),
            project_id: Set(input.project_id),
            assigned_employee_id: Set(input.assigned_employee_id),
            is_deleted: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

// Full overwrite of an existing row; updated_at is stamped here
impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            task_subject: Set(task.subject),
            task_detail: Set(task.detail),
            task_status: Set(task.status),
            assigned_date: Set(task.assigned_date),
            project_id: Set(task.project_id),
            assigned_employee_id: Set(task.assigned_employee_id),
            is_deleted: Set(task.is_deleted),
            created_at: Set(task.created_at.into()),
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
