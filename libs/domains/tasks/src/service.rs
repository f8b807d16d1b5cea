use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::conversions::into_dtos;
use crate::error::{TaskError, TaskResult};
use crate::models::{ProjectDto, TaskDto, TaskStatus, User};
use crate::repository::TaskRepository;
use crate::users::UserRepository;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository, U: UserRepository> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R: TaskRepository, U: UserRepository> TaskService<R, U> {
    pub fn new(repository: R, users: U) -> Self {
        Self {
            repository: Arc::new(repository),
            users: Arc::new(users),
        }
    }

    #[instrument(skip(self), fields(task_id = id))]
    pub async fn find_by_id(&self, id: i64) -> TaskResult<Option<TaskDto>> {
        Ok(self.repository.find_by_id(id).await?.map(TaskDto::from))
    }

    pub async fn list_all_tasks(&self) -> TaskResult<Vec<TaskDto>> {
        Ok(into_dtos(self.repository.find_all().await?))
    }

    /// Create a task. The status is always `OPEN` whatever the input says.
    #[instrument(skip(self, dto), fields(task_subject = %dto.subject))]
    pub async fn save(&self, mut dto: TaskDto) -> TaskResult<()> {
        dto.validate()?;
        dto.status = TaskStatus::Open;

        self.repository.insert(dto.into_new_task()).await?;
        Ok(())
    }

    /// Overwrite a task's editable fields, then re-read it.
    ///
    /// Id, status and assignment date keep their persisted values. A missing
    /// row is not written and yields `None`.
    #[instrument(skip(self, dto), fields(task_id = ?dto.id))]
    pub async fn update(&self, dto: TaskDto) -> TaskResult<Option<TaskDto>> {
        dto.validate()?;
        let id = dto
            .id
            .ok_or_else(|| TaskError::Validation("task id is required".to_string()))?;

        match self.repository.find_by_id(id).await? {
            Some(current) => {
                self.repository.save(dto.into_task_over(&current)).await?;
            }
            None => debug!("Task not found, skipping update"),
        }

        self.find_by_id(id).await
    }

    /// Soft-delete a task; unknown ids are ignored
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete(&self, id: i64) -> TaskResult<()> {
        match self.repository.find_by_id(id).await? {
            Some(mut task) => {
                task.is_deleted = true;
                self.repository.save(task).await?;
            }
            None => debug!("Task not found, skipping delete"),
        }
        Ok(())
    }

    /// Set a task's status; unknown ids are ignored
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn update_status(&self, id: i64, status: TaskStatus) -> TaskResult<()> {
        match self.repository.find_by_id(id).await? {
            Some(mut task) => {
                task.status = status;
                self.repository.save(task).await?;
            }
            None => debug!("Task not found, skipping status update"),
        }
        Ok(())
    }

    pub async fn total_non_completed_task(&self, project_code: &str) -> TaskResult<u64> {
        self.repository.count_non_completed(project_code).await
    }

    pub async fn total_completed_task(&self, project_code: &str) -> TaskResult<u64> {
        self.repository.count_completed(project_code).await
    }

    /// Soft-delete every task of the project.
    ///
    /// Each row is handled on its own; the first failure is returned after
    /// the remaining rows were attempted.
    #[instrument(skip(self, project), fields(project_code = %project.project_code))]
    pub async fn delete_by_project(&self, project: &ProjectDto) -> TaskResult<()> {
        let mut first_error = None;
        for task in self.repository.find_all_by_project(project.id).await? {
            if let Err(e) = self.delete(task.id).await {
                warn!(task_id = task.id, error = %e, "Failed to delete task");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Mark every task of the project `COMPLETE`, with the same per-row
    /// handling as [`Self::delete_by_project`]
    #[instrument(skip(self, project), fields(project_code = %project.project_code))]
    pub async fn complete_by_project(&self, project: &ProjectDto) -> TaskResult<()> {
        let mut first_error = None;
        for task in self.repository.find_all_by_project(project.id).await? {
            if let Err(e) = self.update_status(task.id, TaskStatus::Complete).await {
                warn!(task_id = task.id, error = %e, "Failed to complete task");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub async fn list_all_by_project(&self, project: &ProjectDto) -> TaskResult<Vec<TaskDto>> {
        Ok(into_dtos(
            self.repository.find_all_by_project(project.id).await?,
        ))
    }

    /// Resolve a login name; used to identify the acting user
    pub async fn find_user(&self, user_name: &str) -> TaskResult<Option<User>> {
        self.users.find_by_user_name(user_name).await
    }

    /// The actor's tasks whose status differs from `status`
    #[instrument(skip(self))]
    pub async fn list_all_tasks_by_status_is_not(
        &self,
        actor: &str,
        status: TaskStatus,
    ) -> TaskResult<Vec<TaskDto>> {
        let Some(user) = self.find_user(actor).await? else {
            debug!("Unknown user, returning no tasks");
            return Ok(Vec::new());
        };

        Ok(into_dtos(
            self.repository
                .find_all_by_status_not_and_assigned_employee(status, user.id)
                .await?,
        ))
    }

    /// The actor's tasks with exactly `status`
    #[instrument(skip(self))]
    pub async fn list_all_tasks_by_status(
        &self,
        actor: &str,
        status: TaskStatus,
    ) -> TaskResult<Vec<TaskDto>> {
        let Some(user) = self.find_user(actor).await? else {
            debug!("Unknown user, returning no tasks");
            return Ok(Vec::new());
        };

        Ok(into_dtos(
            self.repository
                .find_all_by_status_and_assigned_employee(status, user.id)
                .await?,
        ))
    }

    pub async fn read_all_by_assigned_employee(&self, user: &User) -> TaskResult<Vec<TaskDto>> {
        Ok(into_dtos(
            self.repository.find_all_by_assigned_employee(user.id).await?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTask, Task};
    use crate::repository::{InMemoryTaskRepository, MockTaskRepository};
    use crate::users::{InMemoryUserRepository, MockUserRepository};
    use chrono::{NaiveDate, Utc};
    use mockall::predicate;

    fn task(id: i64, status: TaskStatus, project_id: Option<i64>) -> Task {
        let now = Utc::now();
        Task {
            id,
            subject: format!("Task {}", id),
            detail: "Detail".to_string(),
            status,
            assigned_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            project_id,
            assigned_employee_id: Some(3),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn john() -> User {
        User {
            id: 3,
            user_name: "john@employee.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Kennedy".to_string(),
            enabled: true,
        }
    }

    fn prj1() -> ProjectDto {
        ProjectDto {
            id: 1,
            project_code: "PRJ1".to_string(),
            project_name: "Project One".to_string(),
        }
    }

    fn dto(subject: &str, project_id: Option<i64>) -> TaskDto {
        TaskDto {
            subject: subject.to_string(),
            detail: "Detail".to_string(),
            project_id,
            assigned_employee_id: Some(3),
            ..Default::default()
        }
    }

    async fn in_memory() -> (
        TaskService<InMemoryTaskRepository, InMemoryUserRepository>,
        InMemoryTaskRepository,
    ) {
        let tasks = InMemoryTaskRepository::new();
        tasks.register_project(1, "PRJ1").await;
        tasks.register_project(2, "PRJ2").await;
        let users = InMemoryUserRepository::new();
        users.add(john()).await;
        (TaskService::new(tasks.clone(), users), tasks)
    }

    async fn seed(repo: &InMemoryTaskRepository, status: TaskStatus, project_id: i64) -> Task {
        repo.insert(NewTask {
            subject: "Seeded".to_string(),
            detail: String::new(),
            status,
            assigned_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            project_id: Some(project_id),
            assigned_employee_id: Some(3),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(predicate::eq(5))
            .times(1)
            .returning(|_| Ok(None));

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        assert!(service.find_by_id(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_forces_open_status() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_insert()
            .withf(|input: &NewTask| input.status == TaskStatus::Open)
            .times(1)
            .returning(|input| {
                let mut created = task(1, input.status, input.project_id);
                created.subject = input.subject;
                Ok(created)
            });

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let mut input = dto("Fix login", None);
        input.status = TaskStatus::Complete;

        service.save(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_empty_subject() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_insert().never();

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let result = service.save(dto("", None)).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_without_id_is_validation_error() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_find_by_id().never();

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let result = service.update(dto("No id", None)).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_row_skips_write() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo.expect_find_by_id().times(2).returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let mut input = dto("Ghost", None);
        input.id = Some(77);

        assert!(service.update(input).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(TaskError::Database("connection reset".to_string())));

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let result = service.list_all_tasks().await;

        assert!(matches!(result, Err(TaskError::Database(_))));
    }

    #[tokio::test]
    async fn test_unknown_actor_yields_empty_list() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_find_all_by_status_and_assigned_employee()
            .never();
        let mut mock_users = MockUserRepository::new();
        mock_users.expect_find_by_user_name().returning(|_| Ok(None));

        let service = TaskService::new(mock_repo, mock_users);
        let tasks = service
            .list_all_tasks_by_status("nobody", TaskStatus::Open)
            .await
            .unwrap();

        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_status_is_not_uses_resolved_user() {
        let mut mock_repo = MockTaskRepository::new();
        mock_repo
            .expect_find_all_by_status_not_and_assigned_employee()
            .with(predicate::eq(TaskStatus::Complete), predicate::eq(3))
            .times(1)
            .returning(|_, _| Ok(vec![task(1, TaskStatus::Open, None)]));
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_user_name()
            .returning(|_| Ok(Some(john())));

        let service = TaskService::new(mock_repo, mock_users);
        let tasks = service
            .list_all_tasks_by_status_is_not("john@employee.com", TaskStatus::Complete)
            .await
            .unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Open);
    }

    fn project_rows(mock_repo: &mut MockTaskRepository) {
        mock_repo
            .expect_find_all_by_project()
            .with(predicate::eq(1))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    task(1, TaskStatus::Open, Some(1)),
                    task(2, TaskStatus::Open, Some(1)),
                ])
            });
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(task(id, TaskStatus::Open, Some(1)))));
    }

    #[tokio::test]
    async fn test_delete_by_project_continues_after_failed_row() {
        let mut mock_repo = MockTaskRepository::new();
        project_rows(&mut mock_repo);
        mock_repo
            .expect_save()
            .withf(|t: &Task| t.id == 1 && t.is_deleted)
            .times(1)
            .returning(|_| Err(TaskError::Database("write failed".to_string())));
        mock_repo
            .expect_save()
            .withf(|t: &Task| t.id == 2 && t.is_deleted)
            .times(1)
            .returning(Ok);

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let result = service.delete_by_project(&prj1()).await;

        assert!(matches!(result, Err(TaskError::Database(msg)) if msg == "write failed"));
    }

    #[tokio::test]
    async fn test_complete_by_project_continues_after_failed_row() {
        let mut mock_repo = MockTaskRepository::new();
        project_rows(&mut mock_repo);
        mock_repo
            .expect_save()
            .withf(|t: &Task| t.id == 1 && t.status == TaskStatus::Complete)
            .times(1)
            .returning(|_| Err(TaskError::Database("write failed".to_string())));
        mock_repo
            .expect_save()
            .withf(|t: &Task| t.id == 2 && t.status == TaskStatus::Complete)
            .times(1)
            .returning(Ok);

        let service = TaskService::new(mock_repo, MockUserRepository::new());
        let result = service.complete_by_project(&prj1()).await;

        assert!(matches!(result, Err(TaskError::Database(msg)) if msg == "write failed"));
    }

    #[tokio::test]
    async fn test_save_persists_open_row() {
        let (service, repo) = in_memory().await;
        let mut input = dto("Write docs", Some(1));
        input.status = TaskStatus::UatTest;

        service.save(input).await.unwrap();

        let rows = repo.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, TaskStatus::Open);
        assert_eq!(rows[0].assigned_date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_update_preserves_id_status_and_date() {
        let (service, repo) = in_memory().await;
        let existing = seed(&repo, TaskStatus::InProgress, 1).await;

        let input = TaskDto {
            id: Some(existing.id),
            subject: "Renamed".to_string(),
            detail: "New detail".to_string(),
            status: TaskStatus::Complete,
            assigned_date: NaiveDate::from_ymd_opt(2031, 1, 1),
            project_id: Some(2),
            assigned_employee_id: Some(9),
        };

        let updated = service.update(input).await.unwrap().unwrap();

        assert_eq!(updated.id, Some(existing.id));
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.assigned_date, Some(existing.assigned_date));
        assert_eq!(updated.subject, "Renamed");
        assert_eq!(updated.detail, "New detail");
        assert_eq!(updated.project_id, Some(2));
        assert_eq!(updated.assigned_employee_id, Some(9));
    }

    #[tokio::test]
    async fn test_update_missing_id_creates_nothing() {
        let (service, repo) = in_memory().await;
        seed(&repo, TaskStatus::Open, 1).await;

        let mut input = dto("Ghost", Some(1));
        input.id = Some(404);

        assert!(service.update(input).await.unwrap().is_none());
        assert_eq!(repo.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_sets_flag_only() {
        let (service, repo) = in_memory().await;
        let existing = seed(&repo, TaskStatus::InProgress, 1).await;

        service.delete(existing.id).await.unwrap();

        let row = repo.snapshot().await.remove(0);
        assert!(row.is_deleted);
        assert_eq!(row.subject, existing.subject);
        assert_eq!(row.status, existing.status);
        assert_eq!(row.assigned_date, existing.assigned_date);
        assert!(service.find_by_id(existing.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_id_operations_are_no_ops() {
        let (service, repo) = in_memory().await;
        seed(&repo, TaskStatus::Open, 1).await;
        let before = repo.snapshot().await;

        service.delete(999).await.unwrap();
        service.update_status(999, TaskStatus::Complete).await.unwrap();

        assert_eq!(repo.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_update_status_sets_status() {
        let (service, repo) = in_memory().await;
        let existing = seed(&repo, TaskStatus::Open, 1).await;

        service
            .update_status(existing.id, TaskStatus::UatTest)
            .await
            .unwrap();

        let row = service.find_by_id(existing.id).await.unwrap().unwrap();
        assert_eq!(row.status, TaskStatus::UatTest);
    }

    #[tokio::test]
    async fn test_delete_by_project_leaves_other_projects() {
        let (service, repo) = in_memory().await;
        seed(&repo, TaskStatus::Open, 1).await;
        seed(&repo, TaskStatus::Complete, 1).await;
        let other = seed(&repo, TaskStatus::Open, 2).await;

        service.delete_by_project(&prj1()).await.unwrap();

        for row in repo.snapshot().await {
            assert_eq!(row.is_deleted, row.project_id == Some(1));
        }
        assert!(service.find_by_id(other.id).await.unwrap().is_some());
        assert!(service.list_all_by_project(&prj1()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_project_counts_and_complete_by_project() {
        let (service, repo) = in_memory().await;
        let a = seed(&repo, TaskStatus::Open, 1).await;
        let b = seed(&repo, TaskStatus::Open, 1).await;
        seed(&repo, TaskStatus::Complete, 1).await;
        seed(&repo, TaskStatus::Open, 2).await;

        assert_eq!(service.total_completed_task("PRJ1").await.unwrap(), 1);
        assert_eq!(service.total_non_completed_task("PRJ1").await.unwrap(), 2);

        service.complete_by_project(&prj1()).await.unwrap();

        assert_eq!(service.total_completed_task("PRJ1").await.unwrap(), 3);
        assert_eq!(service.total_non_completed_task("PRJ1").await.unwrap(), 0);
        assert_eq!(service.total_non_completed_task("PRJ2").await.unwrap(), 1);

        for original in [a, b] {
            let row = service.find_by_id(original.id).await.unwrap().unwrap();
            assert_eq!(row.status, TaskStatus::Complete);
            assert_eq!(row.assigned_date, Some(original.assigned_date));
        }
    }

    #[tokio::test]
    async fn test_counts_sum_to_project_total() {
        let (service, repo) = in_memory().await;
        for status in [
            TaskStatus::Open,
            TaskStatus::InProgress,
            TaskStatus::UatTest,
            TaskStatus::Complete,
        ] {
            seed(&repo, status, 1).await;
        }

        let completed = service.total_completed_task("PRJ1").await.unwrap();
        let non_completed = service.total_non_completed_task("PRJ1").await.unwrap();
        let total = service.list_all_by_project(&prj1()).await.unwrap().len() as u64;

        assert_eq!(completed + non_completed, total);
    }

    #[tokio::test]
    async fn test_read_all_by_assigned_employee() {
        let (service, repo) = in_memory().await;
        seed(&repo, TaskStatus::Open, 1).await;
        seed(&repo, TaskStatus::Complete, 2).await;

        let tasks = service.read_all_by_assigned_employee(&john()).await.unwrap();
        assert_eq!(tasks.len(), 2);

        let open = service
            .list_all_tasks_by_status("john@employee.com", TaskStatus::Open)
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
    }
}
