use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::{
    entity::{project, task},
    error::TaskResult,
    models::{NewTask, Task, TaskStatus},
    repository::TaskRepository,
};

pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live rows only, in id order
    fn live() -> Select<task::Entity> {
        task::Entity::find()
            .filter(task::Column::IsDeleted.eq(false))
            .order_by_asc(task::Column::Id)
    }

    fn live_in_project(project_code: &str) -> Select<task::Entity> {
        task::Entity::find()
            .join(JoinType::InnerJoin, task::Relation::Project.def())
            .filter(project::Column::ProjectCode.eq(project_code))
            .filter(task::Column::IsDeleted.eq(false))
    }

    async fn fetch(&self, query: Select<task::Entity>) -> TaskResult<Vec<Task>> {
        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = task::Entity::find_by_id(id)
            .filter(task::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        self.fetch(Self::live()).await
    }

    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let active_model: task::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn save(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: task::ActiveModel = task.into();
        let model = active_model.update(&self.db).await?;

        tracing::info!(task_id = id, "Saved task");
        Ok(model.into())
    }

    async fn find_all_by_project(&self, project_id: i64) -> TaskResult<Vec<Task>> {
        self.fetch(Self::live().filter(task::Column::ProjectId.eq(project_id)))
            .await
    }

    async fn find_all_by_assigned_employee(&self, employee_id: i64) -> TaskResult<Vec<Task>> {
        self.fetch(Self::live().filter(task::Column::AssignedEmployeeId.eq(employee_id)))
            .await
    }

    async fn find_all_by_status_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>> {
        self.fetch(
            Self::live()
                .filter(task::Column::TaskStatus.eq(status))
                .filter(task::Column::AssignedEmployeeId.eq(employee_id)),
        )
        .await
    }

    async fn find_all_by_status_not_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>> {
        self.fetch(
            Self::live()
                .filter(task::Column::TaskStatus.ne(status))
                .filter(task::Column::AssignedEmployeeId.eq(employee_id)),
        )
        .await
    }

    async fn count_non_completed(&self, project_code: &str) -> TaskResult<u64> {
        let count = Self::live_in_project(project_code)
            .filter(task::Column::TaskStatus.ne(TaskStatus::Complete))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn count_completed(&self, project_code: &str) -> TaskResult<u64> {
        let count = Self::live_in_project(project_code)
            .filter(task::Column::TaskStatus.eq(TaskStatus::Complete))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
