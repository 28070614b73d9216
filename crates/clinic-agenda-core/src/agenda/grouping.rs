//! Patient/task grouping for the daily dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Appointment, PendingTask, TaskStatus};

/// An appointment together with the follow-up tasks of its patient.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientTasks<'a> {
    pub appointment: &'a Appointment,
    pub tasks: Vec<&'a PendingTask>,
    /// Signed days from `today` to the appointment date
    pub proximity_days: i64,
}

impl PatientTasks<'_> {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }

    pub fn urgent_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_urgent()).count()
    }

    /// Tasks still open (pending or in progress).
    pub fn open_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .count()
    }
}

/// Signed whole days from `today` to `date`.
pub fn proximity_days(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Pair each appointment with its patient's tasks, closest appointments first.
///
/// Ties keep input order. Appointments without a patient ID get no tasks.
pub fn group_tasks_by_patient<'a, I>(
    appointments: I,
    tasks: &'a [PendingTask],
    today: NaiveDate,
) -> Vec<PatientTasks<'a>>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut groups: Vec<PatientTasks<'a>> = appointments
        .into_iter()
        .map(|appointment| PatientTasks {
            appointment,
            tasks: match appointment.patient_id.as_deref() {
                Some(patient_id) => tasks.iter().filter(|t| t.patient_id == patient_id).collect(),
                None => Vec::new(),
            },
            proximity_days: proximity_days(appointment.date, today),
        })
        .collect();

    // sort_by_key is stable
    groups.sort_by_key(|group| group.proximity_days);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskType};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn make_appointment(name: &str, patient_id: Option<&str>, d: u32) -> Appointment {
        let mut appt = Appointment::new(name.into(), "Dr. Alonso".into(), date(d), "08:30".into());
        appt.patient_id = patient_id.map(Into::into);
        appt
    }

    fn make_task(patient_id: &str, priority: TaskPriority, status: TaskStatus) -> PendingTask {
        let mut task = PendingTask::new(
            patient_id.into(),
            TaskType::Control,
            "Control".into(),
            date(20),
            priority,
            "Dr. Alonso".into(),
        );
        task.status = status;
        task
    }

    #[test]
    fn test_sorted_by_proximity() {
        let appts = vec![
            make_appointment("three", Some("p3"), 13),
            make_appointment("zero", Some("p0"), 10),
            make_appointment("one", Some("p1"), 11),
        ];

        let groups = group_tasks_by_patient(&appts, &[], date(10));
        let order: Vec<i64> = groups.iter().map(|g| g.proximity_days).collect();
        assert_eq!(order, vec![0, 1, 3]);
        assert_eq!(groups[0].appointment.patient_name, "zero");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let appts = vec![
            make_appointment("first", Some("p1"), 10),
            make_appointment("earlier", Some("p2"), 9),
            make_appointment("second", Some("p3"), 10),
        ];

        let groups = group_tasks_by_patient(&appts, &[], date(10));
        let names: Vec<_> = groups.iter().map(|g| g.appointment.patient_name.as_str()).collect();
        assert_eq!(names, vec!["earlier", "first", "second"]);
        assert_eq!(groups[0].proximity_days, -1);
    }

    #[test]
    fn test_tasks_matched_by_patient_id() {
        let appts = vec![
            make_appointment("with tasks", Some("p1"), 10),
            make_appointment("walk-in", None, 10),
        ];
        let tasks = vec![
            make_task("p1", TaskPriority::Urgent, TaskStatus::Pending),
            make_task("p1", TaskPriority::Low, TaskStatus::Completed),
            make_task("p1", TaskPriority::High, TaskStatus::InProgress),
            make_task("p2", TaskPriority::Urgent, TaskStatus::Pending),
        ];

        let groups = group_tasks_by_patient(&appts, &tasks, date(10));
        assert_eq!(groups[0].tasks.len(), 3);
        assert_eq!(groups[0].completed_count(), 1);
        assert_eq!(groups[0].urgent_count(), 1);
        assert_eq!(groups[0].open_count(), 2);
        assert!(groups[1].tasks.is_empty());
    }

    #[test]
    fn test_proximity_days_signed() {
        assert_eq!(proximity_days(date(12), date(10)), 2);
        assert_eq!(proximity_days(date(8), date(10)), -2);
    }
}
