//! Record store interface.
//!
//! The agenda reads and writes clinic records only through [`RecordStore`].
//! [`Database`] is the SQLite implementation; [`UnconfiguredStore`] stands in
//! when no backend location is configured and fails every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agenda::work_week;
use crate::db::{Database, DbError};
use crate::models::{
    Appointment, AppointmentStatus, CapacityUpdate, DailyCapacity, Patient, PendingTask,
    TaskStatus,
};

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store not configured")]
    NotConfigured,

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Patient with DNI {0} already registered")]
    DuplicateDni(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range from `start` to `end`, swapped if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// A single day.
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Monday–Friday of the week containing `reference`.
    pub fn work_week(reference: NaiveDate) -> Self {
        let week = work_week(reference);
        Self::new(week[0], week[week.len() - 1])
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Narrow read/write interface to the clinic's record store.
pub trait RecordStore {
    fn fetch_capacity(&self, range: DateRange) -> StoreResult<Vec<DailyCapacity>>;

    /// Appointments ordered by date ascending, then time.
    fn fetch_appointments(&self, range: Option<DateRange>) -> StoreResult<Vec<Appointment>>;

    fn fetch_tasks(&self) -> StoreResult<Vec<PendingTask>>;

    fn fetch_patients(&self) -> StoreResult<Vec<Patient>>;

    fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> StoreResult<()>;

    fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
        completed_at: Option<&str>,
    ) -> StoreResult<()>;

    fn update_capacity(&self, date: NaiveDate, update: &CapacityUpdate) -> StoreResult<()>;

    fn create_patient(&self, patient: &Patient) -> StoreResult<Patient>;

    fn create_task(&self, task: &PendingTask) -> StoreResult<PendingTask>;

    /// Store an appointment; the store keeps the day's counters in step.
    fn create_appointment(&self, appointment: &Appointment) -> StoreResult<Appointment>;
}

impl RecordStore for Database {
    fn fetch_capacity(&self, range: DateRange) -> StoreResult<Vec<DailyCapacity>> {
        Ok(self.list_capacity_between(range.start, range.end)?)
    }

    fn fetch_appointments(&self, range: Option<DateRange>) -> StoreResult<Vec<Appointment>> {
        Ok(self.list_appointments(range.map(|r| (r.start, r.end)))?)
    }

    fn fetch_tasks(&self) -> StoreResult<Vec<PendingTask>> {
        Ok(self.list_tasks()?)
    }

    fn fetch_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.list_patients()?)
    }

    fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> StoreResult<()> {
        if Database::update_appointment_status(self, id, status)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("appointment {}", id)))
        }
    }

    fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
        completed_at: Option<&str>,
    ) -> StoreResult<()> {
        if Database::update_task_status(self, id, status, completed_at)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("task {}", id)))
        }
    }

    fn update_capacity(&self, date: NaiveDate, update: &CapacityUpdate) -> StoreResult<()> {
        if Database::update_capacity(self, date, update)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("capacity {}", date)))
        }
    }

    fn create_patient(&self, patient: &Patient) -> StoreResult<Patient> {
        if self.get_patient_by_dni(&patient.dni)?.is_some() {
            return Err(StoreError::DuplicateDni(patient.dni.clone()));
        }
        self.insert_patient(patient)?;
        Ok(patient.clone())
    }

    fn create_task(&self, task: &PendingTask) -> StoreResult<PendingTask> {
        self.insert_task(task)?;
        Ok(task.clone())
    }

    fn create_appointment(&self, appointment: &Appointment) -> StoreResult<Appointment> {
        self.insert_appointment(appointment)?;
        Ok(appointment.clone())
    }
}

/// Store used when no backend is configured. Every call fails with
/// [`StoreError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

impl RecordStore for UnconfiguredStore {
    fn fetch_capacity(&self, _range: DateRange) -> StoreResult<Vec<DailyCapacity>> {
        Err(StoreError::NotConfigured)
    }

    fn fetch_appointments(&self, _range: Option<DateRange>) -> StoreResult<Vec<Appointment>> {
        Err(StoreError::NotConfigured)
    }

    fn fetch_tasks(&self) -> StoreResult<Vec<PendingTask>> {
        Err(StoreError::NotConfigured)
    }

    fn fetch_patients(&self) -> StoreResult<Vec<Patient>> {
        Err(StoreError::NotConfigured)
    }

    fn update_appointment_status(&self, _id: &str, _status: AppointmentStatus) -> StoreResult<()> {
        Err(StoreError::NotConfigured)
    }

    fn update_task_status(
        &self,
        _id: &str,
        _status: TaskStatus,
        _completed_at: Option<&str>,
    ) -> StoreResult<()> {
        Err(StoreError::NotConfigured)
    }

    fn update_capacity(&self, _date: NaiveDate, _update: &CapacityUpdate) -> StoreResult<()> {
        Err(StoreError::NotConfigured)
    }

    fn create_patient(&self, _patient: &Patient) -> StoreResult<Patient> {
        Err(StoreError::NotConfigured)
    }

    fn create_task(&self, _task: &PendingTask) -> StoreResult<PendingTask> {
        Err(StoreError::NotConfigured)
    }

    fn create_appointment(&self, _appointment: &Appointment) -> StoreResult<Appointment> {
        Err(StoreError::NotConfigured)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn fetch_capacity(&self, range: DateRange) -> StoreResult<Vec<DailyCapacity>> {
        (**self).fetch_capacity(range)
    }

    fn fetch_appointments(&self, range: Option<DateRange>) -> StoreResult<Vec<Appointment>> {
        (**self).fetch_appointments(range)
    }

    fn fetch_tasks(&self) -> StoreResult<Vec<PendingTask>> {
        (**self).fetch_tasks()
    }

    fn fetch_patients(&self) -> StoreResult<Vec<Patient>> {
        (**self).fetch_patients()
    }

    fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> StoreResult<()> {
        (**self).update_appointment_status(id, status)
    }

    fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
        completed_at: Option<&str>,
    ) -> StoreResult<()> {
        (**self).update_task_status(id, status, completed_at)
    }

    fn update_capacity(&self, date: NaiveDate, update: &CapacityUpdate) -> StoreResult<()> {
        (**self).update_capacity(date, update)
    }

    fn create_patient(&self, patient: &Patient) -> StoreResult<Patient> {
        (**self).create_patient(patient)
    }

    fn create_task(&self, task: &PendingTask) -> StoreResult<PendingTask> {
        (**self).create_task(task)
    }

    fn create_appointment(&self, appointment: &Appointment) -> StoreResult<Appointment> {
        (**self).create_appointment(appointment)
    }
}
