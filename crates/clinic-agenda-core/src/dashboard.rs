//! Dashboard views built from a snapshot.
//!
//! Views own their data so they can be serialized and handed across the FFI
//! boundary after the snapshot lock is released.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agenda::{
    appointments_on, group_tasks_by_patient, month_grid, urgent_pending_count, work_week,
    CalendarDay, PatientTasks, Segmentation, TaskStats, WeekSummary,
};
use crate::alerts::{evaluate_day, AlertPolicy, CapacityAlert};
use crate::capacity::{CapacityMetrics, WeeklyStats};
use crate::models::{Appointment, DailyCapacity, PendingTask};
use crate::snapshot::AgendaSnapshot;

/// Capacity record of a day with its derived metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayCapacity {
    pub record: DailyCapacity,
    pub metrics: CapacityMetrics,
}

impl From<&DailyCapacity> for DayCapacity {
    fn from(record: &DailyCapacity) -> Self {
        Self {
            record: record.clone(),
            metrics: CapacityMetrics::of(record),
        }
    }
}

/// An appointment with its patient's follow-up tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientTaskGroup {
    pub appointment: Appointment,
    pub tasks: Vec<PendingTask>,
    pub proximity_days: i64,
    pub completed_tasks: usize,
    pub urgent_tasks: usize,
}

impl From<PatientTasks<'_>> for PatientTaskGroup {
    fn from(group: PatientTasks<'_>) -> Self {
        Self {
            completed_tasks: group.completed_count(),
            urgent_tasks: group.urgent_count(),
            appointment: group.appointment.clone(),
            tasks: group.tasks.into_iter().cloned().collect(),
            proximity_days: group.proximity_days,
        }
    }
}

/// Home view for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyDashboard {
    pub date: NaiveDate,
    pub snapshot_version: u64,
    pub appointments: Vec<Appointment>,
    pub counts: Segmentation,
    pub patient_tasks: Vec<PatientTaskGroup>,
    /// `None` when the day has no capacity record
    pub capacity: Option<DayCapacity>,
    /// Totals over the work week containing `date`
    pub weekly: WeeklyStats,
    pub alerts: Vec<CapacityAlert>,
    pub task_stats: TaskStats,
    pub urgent_pending: usize,
}

impl DailyDashboard {
    pub fn build(snapshot: &AgendaSnapshot, today: NaiveDate, policy: &AlertPolicy) -> Self {
        let todays = appointments_on(snapshot.appointments(), today);
        let capacity = snapshot.capacity_for(today);

        Self {
            date: today,
            snapshot_version: snapshot.version(),
            counts: Segmentation::of(todays.iter().copied()),
            patient_tasks: group_tasks_by_patient(todays.iter().copied(), snapshot.tasks(), today)
                .into_iter()
                .map(PatientTaskGroup::from)
                .collect(),
            appointments: todays.into_iter().cloned().collect(),
            capacity: capacity.map(DayCapacity::from),
            weekly: WeeklyStats::for_days(snapshot.capacity(), &work_week(today)),
            alerts: evaluate_day(capacity, policy),
            task_stats: TaskStats::of(snapshot.tasks()),
            urgent_pending: urgent_pending_count(snapshot.tasks()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One column of the weekly agenda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
    pub capacity: Option<DayCapacity>,
}

/// Monday–Friday agenda with a summary row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekAgenda {
    pub days: Vec<AgendaDay>,
    pub summary: WeekSummary,
    pub weekly: WeeklyStats,
}

impl WeekAgenda {
    pub fn build(snapshot: &AgendaSnapshot, reference: NaiveDate) -> Self {
        let week = work_week(reference);
        let days = week
            .iter()
            .map(|&date| AgendaDay {
                date,
                appointments: appointments_on(snapshot.appointments(), date)
                    .into_iter()
                    .cloned()
                    .collect(),
                capacity: snapshot.capacity_for(date).map(DayCapacity::from),
            })
            .collect();

        Self {
            days,
            summary: WeekSummary::of(snapshot.appointments(), reference),
            weekly: WeeklyStats::for_days(snapshot.capacity(), &week),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One cell of the monthly calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub appointment_count: usize,
    pub spontaneous_count: usize,
}

/// Sunday-started month calendar with per-day appointment counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthAgenda {
    pub cells: Vec<MonthCell>,
}

impl MonthAgenda {
    pub fn build(snapshot: &AgendaSnapshot, reference: NaiveDate) -> Self {
        let cells = month_grid(reference)
            .into_iter()
            .map(|CalendarDay { date, in_month }| {
                let counts = Segmentation::of(appointments_on(snapshot.appointments(), date));
                MonthCell {
                    date,
                    in_month,
                    appointment_count: counts.total,
                    spontaneous_count: counts.spontaneous,
                }
            })
            .collect();

        Self { cells }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;
    use crate::models::{TaskPriority, TaskType};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn make_appointment(name: &str, patient_id: &str, d: u32, time: &str) -> Appointment {
        let mut appt = Appointment::new(name.into(), "Dr. García".into(), day(d), time.into());
        appt.patient_id = Some(patient_id.into());
        appt
    }

    fn sample_snapshot() -> AgendaSnapshot {
        let mut walk_in = make_appointment("Ana Torres", "p2", 10, "11:30");
        walk_in.is_spontaneous = true;
        walk_in.is_new_patient = true;

        let mut urgent = PendingTask::new(
            "p1".into(),
            TaskType::Culture,
            "Hemocultivo".into(),
            day(11),
            TaskPriority::Urgent,
            "Dr. García".into(),
        );
        urgent.patient_name = Some("Laura Vega".into());

        let capacity = DailyCapacity {
            date: day(10),
            max_appointments: 20,
            max_spontaneous: 5,
            predicted_spontaneous: 3,
            current_scheduled: 17,
            current_spontaneous: 5,
        };

        AgendaSnapshot::from_parts(
            vec![capacity, DailyCapacity::new(day(11), 20, 5)],
            vec![
                make_appointment("Laura Vega", "p1", 10, "09:00"),
                walk_in,
                make_appointment("Pedro Ruiz", "p3", 12, "10:00"),
            ],
            vec![urgent],
            vec![],
        )
    }

    #[test]
    fn test_daily_dashboard() {
        let snapshot = sample_snapshot();
        let dashboard = DailyDashboard::build(&snapshot, day(10), &AlertPolicy::default());

        assert_eq!(dashboard.appointments.len(), 2);
        assert_eq!(dashboard.counts.new_patients, 1);
        assert_eq!(dashboard.counts.spontaneous, 1);
        assert_eq!(dashboard.patient_tasks[0].tasks.len(), 1);
        assert_eq!(dashboard.patient_tasks[0].urgent_tasks, 1);
        assert_eq!(dashboard.urgent_pending, 1);

        let kinds: Vec<AlertKind> = dashboard.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::DayCapacityHigh, AlertKind::WalkInsMaxed]);

        assert_eq!(dashboard.weekly.total_capacity, 40);
        assert_eq!(dashboard.weekly.available_slots, 23);
    }

    #[test]
    fn test_daily_dashboard_without_capacity() {
        let snapshot = sample_snapshot();
        let dashboard = DailyDashboard::build(&snapshot, day(12), &AlertPolicy::default());

        assert!(dashboard.capacity.is_none());
        assert_eq!(dashboard.alerts.len(), 1);
        assert_eq!(dashboard.alerts[0].kind, AlertKind::UnderControl);
    }

    #[test]
    fn test_week_agenda() {
        let agenda = WeekAgenda::build(&sample_snapshot(), day(10));

        assert_eq!(agenda.days.len(), 5);
        assert_eq!(agenda.days[0].date, day(8));
        assert_eq!(agenda.days[2].appointments.len(), 2);
        assert!(agenda.days[2].capacity.is_some());
        assert_eq!(agenda.summary.counts.total, 3);
        assert_eq!(agenda.summary.counts.spontaneous, 1);
    }

    #[test]
    fn test_month_agenda() {
        let month = MonthAgenda::build(&sample_snapshot(), day(10));

        assert_eq!(month.cells.len() % 7, 0);
        let cell = month.cells.iter().find(|c| c.date == day(10)).unwrap();
        assert!(cell.in_month);
        assert_eq!(cell.appointment_count, 2);
        assert_eq!(cell.spontaneous_count, 1);
    }

    #[test]
    fn test_to_json() {
        let json = DailyDashboard::build(&sample_snapshot(), day(10), &AlertPolicy::default())
            .to_json()
            .unwrap();
        assert!(json.contains("\"day_capacity_high\""));
        assert!(json.contains("\"2025-09-10\""));
    }
}
