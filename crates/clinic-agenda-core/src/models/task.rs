//! Pending follow-up task models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of follow-up action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Lab or imaging study
    #[serde(rename = "estudio")]
    Study,
    /// Control visit
    #[serde(rename = "control")]
    Control,
    /// Culture result pending
    #[serde(rename = "cultivo")]
    Culture,
    /// General follow-up
    #[serde(rename = "seguimiento")]
    FollowUp,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Study => "estudio",
            TaskType::Control => "control",
            TaskType::Culture => "cultivo",
            TaskType::FollowUp => "seguimiento",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "estudio" => Some(TaskType::Study),
            "control" => Some(TaskType::Control),
            "cultivo" => Some(TaskType::Culture),
            "seguimiento" => Some(TaskType::FollowUp),
            _ => None,
        }
    }
}

/// Task priority, ordered low to high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskPriority {
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "urgente")]
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "baja",
            TaskPriority::Medium => "media",
            TaskPriority::High => "alta",
            TaskPriority::Urgent => "urgente",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "baja" => Some(TaskPriority::Low),
            "media" => Some(TaskPriority::Medium),
            "alta" => Some(TaskPriority::High),
            "urgente" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Task progress status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_progreso")]
    InProgress,
    #[serde(rename = "completada")]
    Completed,
}

impl TaskStatus {
    /// Completed reopens as pending; anything else completes.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            _ => TaskStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en_progreso",
            TaskStatus::Completed => "completada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(TaskStatus::Pending),
            "en_progreso" => Some(TaskStatus::InProgress),
            "completada" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// A follow-up action tied to a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingTask {
    /// Unique task ID
    pub id: String,
    /// Patient the task belongs to
    pub patient_id: String,
    /// Patient display name
    pub patient_name: Option<String>,
    /// Kind of follow-up
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_doctor: String,
    pub notes: String,
    /// Creation timestamp
    pub created_at: String,
    /// Completion timestamp, set only while completed
    pub completed_at: Option<String>,
}

impl PendingTask {
    /// Create a new pending task.
    pub fn new(
        patient_id: String,
        task_type: TaskType,
        description: String,
        due_date: NaiveDate,
        priority: TaskPriority,
        assigned_doctor: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            patient_name: None,
            task_type,
            description,
            due_date,
            priority,
            status: TaskStatus::Pending,
            assigned_doctor,
            notes: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Flip between completed and pending, stamping `completed_at` with `now`
    /// on completion and clearing it on reopen.
    pub fn toggle_status(&mut self, now: &str) -> TaskStatus {
        self.status = self.status.toggled();
        self.completed_at = match self.status {
            TaskStatus::Completed => Some(now.to_string()),
            _ => None,
        };
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == TaskPriority::Urgent
    }
}
