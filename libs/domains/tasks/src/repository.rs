use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskStatus};

/// Repository trait for Task persistence
///
/// Every query and count skips soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// Insert a new row; the store assigns the id
    async fn insert(&self, input: NewTask) -> TaskResult<Task>;

    /// Overwrite the row carrying `task.id`
    async fn save(&self, task: Task) -> TaskResult<Task>;

    async fn find_all_by_project(&self, project_id: i64) -> TaskResult<Vec<Task>>;

    async fn find_all_by_assigned_employee(&self, employee_id: i64) -> TaskResult<Vec<Task>>;

    async fn find_all_by_status_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>>;

    async fn find_all_by_status_not_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>>;

    /// Tasks of the project whose status is not `COMPLETE`
    async fn count_non_completed(&self, project_code: &str) -> TaskResult<u64>;

    /// Tasks of the project whose status is `COMPLETE`
    async fn count_completed(&self, project_code: &str) -> TaskResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
    /// project id -> project code
    projects: HashMap<i64, String>,
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a project code resolvable for the count queries
    pub async fn register_project(&self, id: i64, code: impl Into<String>) {
        self.store.write().await.projects.insert(id, code.into());
    }

    /// Every row, soft-deleted ones included, ordered by id
    pub async fn snapshot(&self) -> Vec<Task> {
        self.store.read().await.tasks.values().cloned().collect()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        let store = self.store.read().await;
        store
            .tasks
            .values()
            .filter(|t| !t.is_deleted && predicate(*t))
            .cloned()
            .collect()
    }

    async fn count_in_project<F>(&self, project_code: &str, predicate: F) -> u64
    where
        F: Fn(&Task) -> bool,
    {
        let store = self.store.read().await;
        let project_ids: Vec<i64> = store
            .projects
            .iter()
            .filter(|(_, code)| code.as_str() == project_code)
            .map(|(id, _)| *id)
            .collect();

        store
            .tasks
            .values()
            .filter(|t| !t.is_deleted)
            .filter(|t| t.project_id.is_some_and(|p| project_ids.contains(&p)))
            .filter(|t| predicate(*t))
            .count() as u64
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let store = self.store.read().await;
        Ok(store.tasks.get(&id).filter(|t| !t.is_deleted).cloned())
    }

    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.select(|_| true).await)
    }

    async fn insert(&self, input: NewTask) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let now = Utc::now();
        let task = Task {
            id: store.next_id,
            subject: input.subject,
            detail: input.detail,
            status: input.status,
            assigned_date: input.assigned_date,
            project_id: input.project_id,
            assigned_employee_id: input.assigned_employee_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn save(&self, mut task: Task) -> TaskResult<Task> {
        let mut store = self.store.write().await;
        task.updated_at = Utc::now();
        store.next_id = store.next_id.max(task.id);
        store.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Saved task");
        Ok(task)
    }

    async fn find_all_by_project(&self, project_id: i64) -> TaskResult<Vec<Task>> {
        Ok(self.select(|t| t.project_id == Some(project_id)).await)
    }

    async fn find_all_by_assigned_employee(&self, employee_id: i64) -> TaskResult<Vec<Task>> {
        Ok(self
            .select(|t| t.assigned_employee_id == Some(employee_id))
            .await)
    }

    async fn find_all_by_status_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>> {
        Ok(self
            .select(|t| t.status == status && t.assigned_employee_id == Some(employee_id))
            .await)
    }

    async fn find_all_by_status_not_and_assigned_employee(
        &self,
        status: TaskStatus,
        employee_id: i64,
    ) -> TaskResult<Vec<Task>> {
        Ok(self
            .select(|t| t.status != status && t.assigned_employee_id == Some(employee_id))
            .await)
    }

    async fn count_non_completed(&self, project_code: &str) -> TaskResult<u64> {
        Ok(self
            .count_in_project(project_code, |t| t.status != TaskStatus::Complete)
            .await)
    }

    async fn count_completed(&self, project_code: &str) -> TaskResult<u64> {
        Ok(self
            .count_in_project(project_code, |t| t.status == TaskStatus::Complete)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(project_id: Option<i64>, employee_id: Option<i64>, status: TaskStatus) -> NewTask {
        NewTask {
            subject: "Subject".to_string(),
            detail: String::new(),
            status,
            assigned_date: Utc::now().date_naive(),
            project_id,
            assigned_employee_id: employee_id,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.insert(new_task(None, None, TaskStatus::Open)).await.unwrap();
        let second = repo.insert(new_task(None, None, TaskStatus::Open)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_hidden() {
        let repo = InMemoryTaskRepository::new();
        repo.register_project(1, "PRJ1").await;
        let mut task = repo
            .insert(new_task(Some(1), Some(5), TaskStatus::Open))
            .await
            .unwrap();

        task.is_deleted = true;
        repo.save(task.clone()).await.unwrap();

        assert!(repo.find_by_id(task.id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.find_all_by_project(1).await.unwrap().is_empty());
        assert!(repo.find_all_by_assigned_employee(5).await.unwrap().is_empty());
        assert_eq!(repo.count_non_completed("PRJ1").await.unwrap(), 0);
        assert_eq!(repo.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_status_queries_scope_to_employee() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(new_task(None, Some(5), TaskStatus::Open)).await.unwrap();
        repo.insert(new_task(None, Some(5), TaskStatus::Complete)).await.unwrap();
        repo.insert(new_task(None, Some(6), TaskStatus::Open)).await.unwrap();

        let open = repo
            .find_all_by_status_and_assigned_employee(TaskStatus::Open, 5)
            .await
            .unwrap();
        let not_open = repo
            .find_all_by_status_not_and_assigned_employee(TaskStatus::Open, 5)
            .await
            .unwrap();

        assert_eq!(open.len(), 1);
        assert_eq!(not_open.len(), 1);
        assert_eq!(not_open[0].status, TaskStatus::Complete);
    }

    #[tokio::test]
    async fn test_counts_by_project_code() {
        let repo = InMemoryTaskRepository::new();
        repo.register_project(1, "PRJ1").await;
        repo.register_project(2, "PRJ2").await;
        repo.insert(new_task(Some(1), None, TaskStatus::Open)).await.unwrap();
        repo.insert(new_task(Some(1), None, TaskStatus::UatTest)).await.unwrap();
        repo.insert(new_task(Some(1), None, TaskStatus::Complete)).await.unwrap();
        repo.insert(new_task(Some(2), None, TaskStatus::Complete)).await.unwrap();

        assert_eq!(repo.count_non_completed("PRJ1").await.unwrap(), 2);
        assert_eq!(repo.count_completed("PRJ1").await.unwrap(), 1);
        assert_eq!(repo.count_completed("UNKNOWN").await.unwrap(), 0);
    }
}
