//! Versioned in-memory snapshot of clinic records.
//!
//! The snapshot is replaced wholesale by [`AgendaSnapshot::refresh`] and
//! otherwise only changes through explicit local mutations. Every change bumps
//! [`AgendaSnapshot::version`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    capacity_for_date, Appointment, AppointmentStatus, CapacityUpdate, DailyCapacity, Patient,
    PendingTask, TaskStatus,
};
use crate::store::{DateRange, RecordStore, StoreResult};

/// Clinic records held in memory for projection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgendaSnapshot {
    version: u64,
    capacity: Vec<DailyCapacity>,
    appointments: Vec<Appointment>,
    tasks: Vec<PendingTask>,
    patients: Vec<Patient>,
}

/// Outcome of a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Snapshot version after the refresh
    pub version: u64,
    /// Collections whose fetch failed and were replaced by an empty list
    pub degraded: Vec<&'static str>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }
}

impl AgendaSnapshot {
    /// Empty snapshot at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot directly from records.
    pub fn from_parts(
        capacity: Vec<DailyCapacity>,
        appointments: Vec<Appointment>,
        tasks: Vec<PendingTask>,
        patients: Vec<Patient>,
    ) -> Self {
        Self {
            version: 1,
            capacity,
            appointments,
            tasks,
            patients,
        }
    }

    /// Replace every collection with a fresh fetch from `store`.
    ///
    /// Capacity is fetched for `window`; appointments, tasks and patients are
    /// fetched whole. A failed fetch leaves that collection empty.
    pub fn refresh(&mut self, store: &dyn RecordStore, window: DateRange) -> RefreshReport {
        let mut degraded = Vec::new();

        self.capacity = or_empty(store.fetch_capacity(window), "capacity", &mut degraded);
        self.appointments = or_empty(store.fetch_appointments(None), "appointments", &mut degraded);
        self.tasks = or_empty(store.fetch_tasks(), "tasks", &mut degraded);
        self.patients = or_empty(store.fetch_patients(), "patients", &mut degraded);
        self.version += 1;

        tracing::info!(
            version = self.version,
            capacity = self.capacity.len(),
            appointments = self.appointments.len(),
            tasks = self.tasks.len(),
            patients = self.patients.len(),
            degraded = degraded.len(),
            "Agenda snapshot refreshed"
        );

        RefreshReport {
            version: self.version,
            degraded,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn capacity(&self) -> &[DailyCapacity] {
        &self.capacity
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn tasks(&self) -> &[PendingTask] {
        &self.tasks
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn capacity_for(&self, date: NaiveDate) -> Option<&DailyCapacity> {
        capacity_for_date(&self.capacity, date)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&PendingTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // =========================================================================
    // Local mutations
    // =========================================================================

    /// Toggle an appointment between completed and scheduled.
    pub fn toggle_appointment_status(&mut self, id: &str) -> Option<AppointmentStatus> {
        let status = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)?
            .toggle_status();
        self.bump("toggle appointment", id);
        Some(status)
    }

    /// Force an appointment's status.
    pub fn set_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> bool {
        match self.appointments.iter_mut().find(|a| a.id == id) {
            Some(appt) => {
                appt.status = status;
                self.bump("set appointment status", id);
                true
            }
            None => false,
        }
    }

    /// Toggle a task between completed and pending, stamping `now` on completion.
    pub fn toggle_task_status(&mut self, id: &str, now: &str) -> Option<TaskStatus> {
        let status = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)?
            .toggle_status(now);
        self.bump("toggle task", id);
        Some(status)
    }

    /// Replace a task with the same ID.
    pub fn replace_task(&mut self, task: PendingTask) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                let id = slot.id.clone();
                self.bump("replace task", &id);
                true
            }
            None => false,
        }
    }

    /// Apply a partial capacity update to the day's record.
    pub fn apply_capacity_update(&mut self, date: NaiveDate, update: &CapacityUpdate) -> bool {
        match self.capacity.iter_mut().find(|c| c.date == date) {
            Some(cap) => {
                cap.apply(update);
                self.bump("update capacity", &date.to_string());
                true
            }
            None => false,
        }
    }

    /// Replace or insert the capacity record for its day.
    pub fn replace_capacity(&mut self, capacity: DailyCapacity) {
        let date = capacity.date;
        match self.capacity.iter_mut().find(|c| c.date == date) {
            Some(slot) => *slot = capacity,
            None => self.capacity.push(capacity),
        }
        self.bump("replace capacity", &date.to_string());
    }

    /// Add an appointment, booking it against its day's capacity.
    pub fn push_appointment(&mut self, appointment: Appointment) {
        if let Some(cap) = self.capacity.iter_mut().find(|c| c.date == appointment.date) {
            cap.book(appointment.is_spontaneous);
        }
        let id = appointment.id.clone();
        self.appointments.push(appointment);
        self.bump("add appointment", &id);
    }

    /// Remove an appointment and release its capacity booking.
    pub fn remove_appointment(&mut self, id: &str) -> Option<Appointment> {
        let index = self.appointments.iter().position(|a| a.id == id)?;
        let appointment = self.appointments.remove(index);
        if let Some(cap) = self.capacity.iter_mut().find(|c| c.date == appointment.date) {
            cap.unbook(appointment.is_spontaneous);
        }
        self.bump("remove appointment", id);
        Some(appointment)
    }

    pub fn push_task(&mut self, task: PendingTask) {
        let id = task.id.clone();
        self.tasks.push(task);
        self.bump("add task", &id);
    }

    pub fn remove_task(&mut self, id: &str) -> Option<PendingTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        self.bump("remove task", id);
        Some(task)
    }

    pub fn push_patient(&mut self, patient: Patient) {
        let id = patient.id.clone();
        self.patients.push(patient);
        self.bump("add patient", &id);
    }

    pub fn remove_patient(&mut self, id: &str) -> Option<Patient> {
        let index = self.patients.iter().position(|p| p.id == id)?;
        let patient = self.patients.remove(index);
        self.bump("remove patient", id);
        Some(patient)
    }

    fn bump(&mut self, action: &str, id: &str) {
        self.version += 1;
        tracing::debug!(version = self.version, action, id, "Local snapshot mutation");
    }
}

fn or_empty<T>(result: StoreResult<Vec<T>>, collection: &'static str, degraded: &mut Vec<&'static str>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(collection, error = %e, "Fetch failed, using empty collection");
            degraded.push(collection);
            Vec::new()
        }
    }
}
