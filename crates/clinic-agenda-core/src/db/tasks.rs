//! Pending task database operations.

use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database, DbError, DbResult};
use crate::models::{PendingTask, TaskPriority, TaskStatus, TaskType};

const TASK_COLUMNS: &str = "id, patient_id, patient_name, type, description, due_date, priority, \
                            status, assigned_doctor, notes, created_at, completed_at";

impl Database {
    /// Insert a new task.
    pub fn insert_task(&self, task: &PendingTask) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO pending_tasks (
                id, patient_id, patient_name, type, description, due_date, priority,
                status, assigned_doctor, notes, created_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                task.id,
                task.patient_id,
                task.patient_name,
                task.task_type.as_str(),
                task.description,
                task.due_date.to_string(),
                task.priority.as_str(),
                task.status.as_str(),
                task.assigned_doctor,
                task.notes,
                task.created_at,
                task.completed_at,
            ],
        )?;
        Ok(())
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: &str) -> DbResult<Option<PendingTask>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM pending_tasks WHERE id = ?", TASK_COLUMNS),
                [id],
                TaskRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all tasks, soonest due first.
    pub fn list_tasks(&self) -> DbResult<Vec<PendingTask>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pending_tasks ORDER BY due_date, created_at",
            TASK_COLUMNS
        ))?;

        let rows = stmt.query_map([], TaskRow::from_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?.try_into()?);
        }
        Ok(tasks)
    }

    /// Set a task's status and completion timestamp.
    pub fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
        completed_at: Option<&str>,
    ) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE pending_tasks SET status = ?2, completed_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), completed_at],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct TaskRow {
    id: String,
    patient_id: String,
    patient_name: Option<String>,
    task_type: String,
    description: String,
    due_date: String,
    priority: String,
    status: String,
    assigned_doctor: String,
    notes: String,
    created_at: String,
    completed_at: Option<String>,
}

impl TaskRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(TaskRow {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            patient_name: row.get(2)?,
            task_type: row.get(3)?,
            description: row.get(4)?,
            due_date: row.get(5)?,
            priority: row.get(6)?,
            status: row.get(7)?,
            assigned_doctor: row.get(8)?,
            notes: row.get(9)?,
            created_at: row.get(10)?,
            completed_at: row.get(11)?,
        })
    }
}

impl TryFrom<TaskRow> for PendingTask {
    type Error = DbError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let task_type = TaskType::parse(&row.task_type)
            .ok_or_else(|| DbError::Constraint(format!("Unknown task type: {}", row.task_type)))?;
        let priority = TaskPriority::parse(&row.priority)
            .ok_or_else(|| DbError::Constraint(format!("Unknown task priority: {}", row.priority)))?;
        let status = TaskStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown task status: {}", row.status)))?;

        Ok(PendingTask {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            task_type,
            description: row.description,
            due_date: parse_date("due_date", &row.due_date)?,
            priority,
            status,
            assigned_doctor: row.assigned_doctor,
            notes: row.notes,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_task(due_day: u32, priority: TaskPriority) -> PendingTask {
        let mut task = PendingTask::new(
            "p2".into(),
            TaskType::Culture,
            "Cultivo de esputo".into(),
            NaiveDate::from_ymd_opt(2025, 9, due_day).unwrap(),
            priority,
            "Dr. García".into(),
        );
        task.patient_name = Some("Carlos Mendoza".into());
        task
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let task = make_task(12, TaskPriority::Urgent);
        db.insert_task(&task).unwrap();

        let retrieved = db.get_task(&task.id).unwrap().unwrap();
        assert_eq!(retrieved, task);
        assert!(db.get_task("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_sorted_by_due_date() {
        let db = setup_db();
        let later = make_task(20, TaskPriority::Low);
        let sooner = make_task(11, TaskPriority::High);
        db.insert_task(&later).unwrap();
        db.insert_task(&sooner).unwrap();

        let tasks = db.list_tasks().unwrap();
        assert_eq!(tasks[0].id, sooner.id);
        assert_eq!(tasks[1].id, later.id);
    }

    #[test]
    fn test_update_status_sets_completed_at() {
        let db = setup_db();
        let task = make_task(12, TaskPriority::Medium);
        db.insert_task(&task).unwrap();

        assert!(db
            .update_task_status(&task.id, TaskStatus::Completed, Some("2025-09-10T12:00:00Z"))
            .unwrap());
        let done = db.get_task(&task.id).unwrap().unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at.as_deref(), Some("2025-09-10T12:00:00Z"));

        db.update_task_status(&task.id, TaskStatus::Pending, None).unwrap();
        let reopened = db.get_task(&task.id).unwrap().unwrap();
        assert!(reopened.completed_at.is_none());
    }
}
