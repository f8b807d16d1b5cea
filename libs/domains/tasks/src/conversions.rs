//! Transfer ↔ persisted conversions for tasks

use chrono::Utc;

use crate::models::{NewTask, Task, TaskDto};

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: Some(task.id),
            subject: task.subject,
            detail: task.detail,
            status: task.status,
            assigned_date: Some(task.assigned_date),
            project_id: task.project_id,
            assigned_employee_id: task.assigned_employee_id,
        }
    }
}

impl TaskDto {
    /// Row for a first insert. The assignment date defaults to today.
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            subject: self.subject,
            detail: self.detail,
            status: self.status,
            assigned_date: self
                .assigned_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            project_id: self.project_id,
            assigned_employee_id: self.assigned_employee_id,
        }
    }

    /// Apply caller input over the persisted row.
    ///
    /// Identifier, status and assignment date always come from `current`,
    /// as do the soft-delete flag and creation timestamp.
    pub fn into_task_over(self, current: &Task) -> Task {
        Task {
            id: current.id,
            subject: self.subject,
            detail: self.detail,
            status: current.status,
            assigned_date: current.assigned_date,
            project_id: self.project_id,
            assigned_employee_id: self.assigned_employee_id,
            is_deleted: current.is_deleted,
            created_at: current.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Map a batch of rows to transfer form
pub(crate) fn into_dtos(tasks: Vec<Task>) -> Vec<TaskDto> {
    tasks.into_iter().map(TaskDto::from).collect()
}
