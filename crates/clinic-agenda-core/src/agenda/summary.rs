//! Segmentation counts for days, weeks and task lists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::work_week;
use crate::models::{Appointment, PendingTask, TaskPriority, TaskStatus};

/// Partition counts over a set of appointments.
///
/// `new_patients + returning_patients == total`; `spontaneous` is an
/// independent partition of the same set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segmentation {
    pub total: usize,
    pub new_patients: usize,
    pub returning_patients: usize,
    pub spontaneous: usize,
    pub completed: usize,
}

impl Segmentation {
    pub fn of<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut counts = Segmentation::default();
        for appt in appointments {
            counts.total += 1;
            if appt.is_new_patient {
                counts.new_patients += 1;
            } else {
                counts.returning_patients += 1;
            }
            if appt.is_spontaneous {
                counts.spontaneous += 1;
            }
            if appt.is_completed() {
                counts.completed += 1;
            }
        }
        counts
    }

    /// Pre-booked (non walk-in) appointments.
    pub fn scheduled(&self) -> usize {
        self.total - self.spontaneous
    }
}

/// Weekly agenda summary over Monday–Friday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub counts: Segmentation,
}

impl WeekSummary {
    pub fn of(appointments: &[Appointment], reference: NaiveDate) -> Self {
        let week = work_week(reference);
        Self {
            start: week[0],
            end: week[week.len() - 1],
            counts: Segmentation::of(appointments.iter().filter(|a| week.contains(&a.date))),
        }
    }
}

/// Task tracker counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub urgent: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn of<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a PendingTask>,
    {
        tasks.into_iter().fold(TaskStats::default(), |mut stats, task| {
            stats.total += 1;
            if task.is_urgent() {
                stats.urgent += 1;
            }
            if task.is_completed() {
                stats.completed += 1;
            }
            stats
        })
    }
}

/// Urgent tasks not yet started.
pub fn urgent_pending_count(tasks: &[PendingTask]) -> usize {
    tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::Urgent && t.status == TaskStatus::Pending)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, TaskType};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn make_appointment(d: u32, is_new: bool, is_spontaneous: bool) -> Appointment {
        let mut appt = Appointment::new("P".into(), "Dr. Alonso".into(), date(d), "10:00".into());
        appt.is_new_patient = is_new;
        appt.is_spontaneous = is_spontaneous;
        appt
    }

    fn make_task(priority: TaskPriority, status: TaskStatus) -> PendingTask {
        let mut task = PendingTask::new(
            "p1".into(),
            TaskType::FollowUp,
            "Seguimiento".into(),
            date(20),
            priority,
            "Dr. Torres".into(),
        );
        task.status = status;
        task
    }

    #[test]
    fn test_segmentation_partitions() {
        let mut done = make_appointment(10, false, false);
        done.status = AppointmentStatus::Completed;
        let appts = vec![
            make_appointment(10, false, false),
            make_appointment(10, false, true),
            make_appointment(10, true, false),
            done,
        ];

        let counts = Segmentation::of(&appts);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.new_patients, 1);
        assert_eq!(counts.returning_patients, 3);
        assert_eq!(counts.spontaneous, 1);
        assert_eq!(counts.scheduled(), 3);
        assert_eq!(counts.completed, 1);
    }

    #[test]
    fn test_segmentation_empty() {
        assert_eq!(Segmentation::of(&[]), Segmentation::default());
    }

    #[test]
    fn test_week_summary() {
        let appts = vec![
            make_appointment(8, true, false),
            make_appointment(10, false, true),
            make_appointment(13, true, true), // Saturday
            make_appointment(16, true, false), // next week
        ];

        let summary = WeekSummary::of(&appts, date(10));
        assert_eq!(summary.start, date(8));
        assert_eq!(summary.end, date(12));
        assert_eq!(summary.counts.total, 2);
        assert_eq!(summary.counts.new_patients, 1);
        assert_eq!(summary.counts.spontaneous, 1);
    }

    #[test]
    fn test_task_stats() {
        let tasks = vec![
            make_task(TaskPriority::Urgent, TaskStatus::Pending),
            make_task(TaskPriority::Urgent, TaskStatus::InProgress),
            make_task(TaskPriority::Low, TaskStatus::Completed),
        ];

        let stats = TaskStats::of(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.urgent, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(urgent_pending_count(&tasks), 1);
    }
}
