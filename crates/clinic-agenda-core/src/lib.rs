//! Clinic Agenda Core Library
//!
//! Capacity accounting, agenda projection and alerting for a single-clinic
//! scheduling dashboard.
//!
//! # Architecture
//!
//! ```text
//!            RecordStore (SQLite / unconfigured)
//!                          │
//!                   fetch / write
//!                          │
//!              ┌───────────▼───────────┐
//!              │     AgendaSession     │
//!              │  snapshot + optimistic │
//!              │        writes          │
//!              └───────────┬───────────┘
//!                          │
//!          ┌───────────────┼───────────────┐
//!          │               │               │
//!          ▼               ▼               ▼
//!      Capacity         Agenda          Alerts
//!   (metrics, week)  (filter, group)  (rule table)
//!          │               │               │
//!          └───────────────┼───────────────┘
//!                          ▼
//!                 Dashboard views → JSON / FFI
//! ```
//!
//! # Core Principle
//!
//! **Projection is pure.** Capacity, agenda and alert code only read records
//! already in memory; all I/O goes through [`store::RecordStore`].
//!
//! # Modules
//!
//! - [`models`]: Domain types (DailyCapacity, Appointment, PendingTask, Patient)
//! - [`capacity`]: Per-day metrics and weekly aggregation
//! - [`agenda`]: Calendar sequences, filters, grouping and segmentation
//! - [`alerts`]: Rule-table capacity alerts
//! - [`store`]: Record store interface
//! - [`db`]: SQLite record store
//! - [`snapshot`]: Versioned in-memory record snapshot
//! - [`session`]: Optimistic writes over a snapshot and a store
//! - [`dashboard`]: Owned dashboard views
//! - [`config`]: Runtime configuration

pub mod agenda;
pub mod alerts;
pub mod capacity;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod session;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use alerts::{evaluate, evaluate_day, AlertKind, AlertPolicy, AlertSeverity, CapacityAlert};
pub use capacity::{CapacityMetrics, WeeklyStats};
pub use config::DashboardConfig;
pub use dashboard::{DailyDashboard, MonthAgenda, WeekAgenda};
pub use db::Database;
pub use models::{
    Appointment, AppointmentStatus, CapacityUpdate, DailyCapacity, Patient, PendingTask,
    TaskPriority, TaskStatus, TaskType,
};
pub use session::{AgendaSession, LocalRecord, Optimistic};
pub use snapshot::{AgendaSnapshot, RefreshReport};
pub use store::{DateRange, RecordStore, StoreError, UnconfiguredStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `filter`. Calling this more than once is a no-op.
pub fn init_logging(filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .try_init();

    if result.is_ok() {
        tracing::info!(app = config::APP_NAME, version = config::APP_VERSION, "Logging initialized");
    }
}

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicAgendaError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Record store not configured")]
    NotConfigured,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not a local record: {0}")]
    NotLocal(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for ClinicAgendaError {
    fn from(e: db::DbError) -> Self {
        ClinicAgendaError::DatabaseError(e.to_string())
    }
}

impl From<StoreError> for ClinicAgendaError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotConfigured => ClinicAgendaError::NotConfigured,
            StoreError::NotFound(what) => ClinicAgendaError::NotFound(what),
            StoreError::DuplicateDni(dni) => ClinicAgendaError::InvalidInput(format!("duplicate DNI: {}", dni)),
            StoreError::Database(e) => e.into(),
        }
    }
}

impl From<session::SessionError> for ClinicAgendaError {
    fn from(e: session::SessionError) -> Self {
        match e {
            session::SessionError::NotLocal(id) => ClinicAgendaError::NotLocal(id),
            other => ClinicAgendaError::NotFound(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for ClinicAgendaError {
    fn from(e: config::ConfigError) -> Self {
        ClinicAgendaError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicAgendaError {
    fn from(e: serde_json::Error) -> Self {
        ClinicAgendaError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicAgendaError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicAgendaError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, ClinicAgendaError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ClinicAgendaError::InvalidInput(format!("date: {}", value)))
}

fn parse_with<T>(field: &str, value: &str, parse: fn(&str) -> Option<T>) -> Result<T, ClinicAgendaError> {
    parse(value).ok_or_else(|| ClinicAgendaError::InvalidInput(format!("{}: {}", field, value)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

type SharedSession = Arc<Mutex<AgendaSession<Box<dyn RecordStore + Send>>>>;

fn new_core(store: Box<dyn RecordStore + Send>, policy: AlertPolicy) -> Arc<ClinicAgendaCore> {
    Arc::new(ClinicAgendaCore {
        session: Arc::new(Mutex::new(AgendaSession::new(store))),
        policy,
    })
}

/// Open or create a dashboard backed by the SQLite file at `path`.
#[uniffi::export]
pub fn open_dashboard(path: String) -> Result<Arc<ClinicAgendaCore>, ClinicAgendaError> {
    let db = Database::open(&path)?;
    Ok(new_core(Box::new(db), AlertPolicy::default()))
}

/// Create a dashboard over an in-memory database (for testing).
#[uniffi::export]
pub fn open_dashboard_in_memory() -> Result<Arc<ClinicAgendaCore>, ClinicAgendaError> {
    let db = Database::open_in_memory()?;
    Ok(new_core(Box::new(db), AlertPolicy::default()))
}

/// Create a dashboard configured from the process environment.
///
/// Also installs the log subscriber with the configured filter.
#[uniffi::export]
pub fn open_dashboard_from_env() -> Result<Arc<ClinicAgendaCore>, ClinicAgendaError> {
    let config = DashboardConfig::from_env()?;
    init_logging(&config.log_filter);
    let store = config.open_store()?;
    Ok(new_core(store, config.alert_policy))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicAgendaCore {
    session: SharedSession,
    policy: AlertPolicy,
}

#[uniffi::export]
impl ClinicAgendaCore {
    /// Re-fetch all records, loading capacity for the work week of `reference_date`.
    pub fn refresh(&self, reference_date: String) -> Result<FfiRefreshReport, ClinicAgendaError> {
        let reference = parse_day(&reference_date)?;
        let mut session = self.session.lock()?;
        let report = session.refresh(DateRange::work_week(reference));
        Ok(report.into())
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Appointments on a single day.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, ClinicAgendaError> {
        let day = parse_day(&date)?;
        let session = self.session.lock()?;
        Ok(agenda::appointments_on(session.snapshot().appointments(), day)
            .into_iter()
            .map(|a| a.clone().into())
            .collect())
    }

    /// Capacity record of a day, if any.
    ///
    /// Only capacity loaded by the last `refresh` is consulted. Refresh the
    /// week containing `date` first.
    pub fn capacity_for(&self, date: String) -> Result<Option<FfiCapacity>, ClinicAgendaError> {
        let day = parse_day(&date)?;
        let session = self.session.lock()?;
        Ok(session.snapshot().capacity_for(day).cloned().map(Into::into))
    }

    /// Capacity alerts for a day.
    ///
    /// Evaluated against the capacity loaded by the last `refresh`. A day
    /// outside that work week has no record and reports only "under control",
    /// so refresh the week containing `date` first.
    pub fn alerts_for(&self, date: String) -> Result<Vec<FfiAlert>, ClinicAgendaError> {
        let day = parse_day(&date)?;
        let session = self.session.lock()?;
        let alerts = evaluate_day(session.snapshot().capacity_for(day), &self.policy);
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    /// Capacity totals for the work week containing `reference_date`.
    pub fn weekly_stats(&self, reference_date: String) -> Result<FfiWeeklyStats, ClinicAgendaError> {
        let reference = parse_day(&reference_date)?;
        let session = self.session.lock()?;
        let stats = WeeklyStats::for_days(session.snapshot().capacity(), &agenda::work_week(reference));
        Ok(stats.into())
    }

    /// Patients whose name and DNI contain the given fragments.
    pub fn search_patients(&self, name: String, dni: String) -> Result<Vec<FfiPatient>, ClinicAgendaError> {
        let session = self.session.lock()?;
        Ok(agenda::filter_patients(session.snapshot().patients(), &name, &dni)
            .into_iter()
            .map(|p| p.clone().into())
            .collect())
    }

    /// Tasks whose patient name and doctor contain the given fragments.
    pub fn search_tasks(&self, patient: String, doctor: String) -> Result<Vec<FfiTask>, ClinicAgendaError> {
        let session = self.session.lock()?;
        Ok(agenda::filter_tasks(session.snapshot().tasks(), &patient, &doctor)
            .into_iter()
            .map(|t| t.clone().into())
            .collect())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the home dashboard for `date` as JSON.
    pub fn export_daily_dashboard_json(&self, date: String) -> Result<String, ClinicAgendaError> {
        let day = parse_day(&date)?;
        let session = self.session.lock()?;
        Ok(DailyDashboard::build(session.snapshot(), day, &self.policy).to_json()?)
    }

    /// Export the Monday–Friday agenda containing `reference_date` as JSON.
    pub fn export_week_agenda_json(&self, reference_date: String) -> Result<String, ClinicAgendaError> {
        let reference = parse_day(&reference_date)?;
        let session = self.session.lock()?;
        Ok(WeekAgenda::build(session.snapshot(), reference).to_json()?)
    }

    /// Export the month calendar containing `reference_date` as JSON.
    pub fn export_month_agenda_json(&self, reference_date: String) -> Result<String, ClinicAgendaError> {
        let reference = parse_day(&reference_date)?;
        let session = self.session.lock()?;
        Ok(MonthAgenda::build(session.snapshot(), reference).to_json()?)
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Toggle an appointment between completed and scheduled.
    pub fn toggle_appointment_status(&self, id: String) -> Result<FfiStatusChange, ClinicAgendaError> {
        let mut session = self.session.lock()?;
        let outcome = session.toggle_appointment_status(&id)?;
        Ok(FfiStatusChange {
            id,
            previous_status: outcome.previous.map(|s| s.as_str().to_string()),
            status: outcome.value.as_str().to_string(),
            synced: outcome.is_synced(),
            remote_error: remote_error(&outcome.remote),
        })
    }

    /// Restore an appointment's status in the local snapshot.
    pub fn rollback_appointment_status(&self, id: String, status: String) -> Result<(), ClinicAgendaError> {
        let status = parse_with("status", &status, AppointmentStatus::parse)?;
        let mut session = self.session.lock()?;
        Ok(session.rollback_appointment_status(&id, status)?)
    }

    /// Toggle a task between completed and pending.
    pub fn toggle_task_status(&self, id: String) -> Result<FfiTaskChange, ClinicAgendaError> {
        let mut session = self.session.lock()?;
        let outcome = session.toggle_task_status(&id)?;
        Ok(FfiTaskChange {
            synced: outcome.is_synced(),
            remote_error: remote_error(&outcome.remote),
            previous: outcome.previous.map(Into::into),
            task: outcome.value.into(),
        })
    }

    /// Restore a task in the local snapshot.
    pub fn rollback_task(&self, previous: FfiTask) -> Result<(), ClinicAgendaError> {
        let task = PendingTask::try_from(previous)?;
        let mut session = self.session.lock()?;
        Ok(session.rollback_task(task)?)
    }

    /// Apply a partial capacity update for `date`.
    pub fn update_capacity(
        &self,
        date: String,
        update: FfiCapacityUpdate,
    ) -> Result<FfiCapacityChange, ClinicAgendaError> {
        let day = parse_day(&date)?;
        let mut session = self.session.lock()?;
        let outcome = session.update_capacity(day, &update.into())?;
        Ok(FfiCapacityChange {
            synced: outcome.is_synced(),
            remote_error: remote_error(&outcome.remote),
            previous: outcome.previous.map(Into::into),
            capacity: outcome.value.into(),
        })
    }

    /// Restore a day's capacity record in the local snapshot.
    pub fn rollback_capacity(&self, previous: FfiCapacity) -> Result<(), ClinicAgendaError> {
        let capacity = DailyCapacity::try_from(previous)?;
        let mut session = self.session.lock()?;
        session.rollback_capacity(capacity);
        Ok(())
    }

    /// Register a patient.
    pub fn create_patient(&self, name: String, dni: String) -> Result<FfiCreated, ClinicAgendaError> {
        let mut session = self.session.lock()?;
        let outcome = session.create_patient(Patient::new(name, dni));
        Ok(FfiCreated::from_outcome(&outcome.value.id, &outcome.remote))
    }

    /// Create a follow-up task.
    pub fn create_task(&self, task: FfiNewTask) -> Result<FfiCreated, ClinicAgendaError> {
        let task = PendingTask::try_from(task)?;
        let mut session = self.session.lock()?;
        let outcome = session.create_task(task);
        Ok(FfiCreated::from_outcome(&outcome.value.id, &outcome.remote))
    }

    /// Book an appointment.
    pub fn create_appointment(&self, appointment: FfiNewAppointment) -> Result<FfiCreated, ClinicAgendaError> {
        let appointment = Appointment::try_from(appointment)?;
        let mut session = self.session.lock()?;
        let outcome = session.create_appointment(appointment);
        Ok(FfiCreated::from_outcome(&outcome.value.id, &outcome.remote))
    }

    /// Drop a patient, task or appointment whose remote create failed.
    ///
    /// Records the store accepted are refused with `NotLocal`.
    pub fn discard_local(&self, id: String) -> Result<(), ClinicAgendaError> {
        let mut session = self.session.lock()?;
        match session.local_record(&id) {
            Some(LocalRecord::Patient) => session.discard_local_patient(&id).map(drop)?,
            Some(LocalRecord::Task) => session.discard_local_task(&id).map(drop)?,
            Some(LocalRecord::Appointment) => session.discard_local_appointment(&id).map(drop)?,
            None => return Err(ClinicAgendaError::NotLocal(id)),
        }
        Ok(())
    }
}

fn remote_error(remote: &store::StoreResult<()>) -> Option<String> {
    remote.as_ref().err().map(|e| e.to_string())
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe refresh report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRefreshReport {
    pub version: u64,
    pub degraded: Vec<String>,
}

impl From<RefreshReport> for FfiRefreshReport {
    fn from(report: RefreshReport) -> Self {
        Self {
            version: report.version,
            degraded: report.degraded.into_iter().map(String::from).collect(),
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub is_spontaneous: bool,
    pub is_new_patient: bool,
    pub status: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            patient_id: appt.patient_id,
            patient_name: appt.patient_name,
            doctor_name: appt.doctor_name,
            date: appt.date.to_string(),
            time: appt.time,
            notes: appt.notes,
            is_spontaneous: appt.is_spontaneous,
            is_new_patient: appt.is_new_patient,
            status: appt.status.as_str().to_string(),
        }
    }
}

/// FFI-safe new appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub patient_id: Option<String>,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub is_spontaneous: bool,
    pub is_new_patient: bool,
}

impl TryFrom<FfiNewAppointment> for Appointment {
    type Error = ClinicAgendaError;

    fn try_from(new: FfiNewAppointment) -> Result<Self, Self::Error> {
        let mut appt = Appointment::new(new.patient_name, new.doctor_name, parse_day(&new.date)?, new.time);
        appt.patient_id = new.patient_id;
        appt.notes = new.notes;
        appt.is_spontaneous = new.is_spontaneous;
        appt.is_new_patient = new.is_new_patient;
        Ok(appt)
    }
}

/// FFI-safe task.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTask {
    pub id: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub task_type: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
    pub assigned_doctor: String,
    pub notes: String,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<PendingTask> for FfiTask {
    fn from(task: PendingTask) -> Self {
        Self {
            id: task.id,
            patient_id: task.patient_id,
            patient_name: task.patient_name,
            task_type: task.task_type.as_str().to_string(),
            description: task.description,
            due_date: task.due_date.to_string(),
            priority: task.priority.as_str().to_string(),
            status: task.status.as_str().to_string(),
            assigned_doctor: task.assigned_doctor,
            notes: task.notes,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

impl TryFrom<FfiTask> for PendingTask {
    type Error = ClinicAgendaError;

    fn try_from(task: FfiTask) -> Result<Self, Self::Error> {
        Ok(PendingTask {
            id: task.id,
            patient_id: task.patient_id,
            patient_name: task.patient_name,
            task_type: parse_with("type", &task.task_type, TaskType::parse)?,
            description: task.description,
            due_date: parse_day(&task.due_date)?,
            priority: parse_with("priority", &task.priority, TaskPriority::parse)?,
            status: parse_with("status", &task.status, TaskStatus::parse)?,
            assigned_doctor: task.assigned_doctor,
            notes: task.notes,
            created_at: task.created_at,
            completed_at: task.completed_at,
        })
    }
}

/// FFI-safe new task.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewTask {
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub task_type: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub assigned_doctor: String,
    pub notes: String,
}

impl TryFrom<FfiNewTask> for PendingTask {
    type Error = ClinicAgendaError;

    fn try_from(new: FfiNewTask) -> Result<Self, Self::Error> {
        let mut task = PendingTask::new(
            new.patient_id,
            parse_with("type", &new.task_type, TaskType::parse)?,
            new.description,
            parse_day(&new.due_date)?,
            parse_with("priority", &new.priority, TaskPriority::parse)?,
            new.assigned_doctor,
        );
        task.patient_name = new.patient_name;
        task.notes = new.notes;
        Ok(task)
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub dni: String,
    pub phone: String,
    pub email: String,
    pub birth_date: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            dni: patient.dni,
            phone: patient.phone,
            email: patient.email,
            birth_date: patient.birth_date.map(|d| d.to_string()),
        }
    }
}

/// FFI-safe daily capacity with derived metrics.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiCapacity {
    pub date: String,
    pub max_appointments: u32,
    pub max_spontaneous: u32,
    pub predicted_spontaneous: u32,
    pub current_scheduled: u32,
    pub current_spontaneous: u32,
    pub remaining_appointment_slots: i64,
    pub remaining_spontaneous_slots: i64,
    pub scheduled_pct: f64,
    pub spontaneous_pct: f64,
}

impl From<DailyCapacity> for FfiCapacity {
    fn from(cap: DailyCapacity) -> Self {
        let metrics = CapacityMetrics::of(&cap);
        Self {
            date: cap.date.to_string(),
            max_appointments: cap.max_appointments,
            max_spontaneous: cap.max_spontaneous,
            predicted_spontaneous: cap.predicted_spontaneous,
            current_scheduled: cap.current_scheduled,
            current_spontaneous: cap.current_spontaneous,
            remaining_appointment_slots: metrics.remaining_appointment_slots,
            remaining_spontaneous_slots: metrics.remaining_spontaneous_slots,
            scheduled_pct: metrics.scheduled_pct(),
            spontaneous_pct: metrics.spontaneous_pct(),
        }
    }
}

impl TryFrom<FfiCapacity> for DailyCapacity {
    type Error = ClinicAgendaError;

    fn try_from(cap: FfiCapacity) -> Result<Self, Self::Error> {
        Ok(DailyCapacity {
            date: parse_day(&cap.date)?,
            max_appointments: cap.max_appointments,
            max_spontaneous: cap.max_spontaneous,
            predicted_spontaneous: cap.predicted_spontaneous,
            current_scheduled: cap.current_scheduled,
            current_spontaneous: cap.current_spontaneous,
        })
    }
}

/// FFI-safe partial capacity update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCapacityUpdate {
    pub max_appointments: Option<u32>,
    pub max_spontaneous: Option<u32>,
    pub predicted_spontaneous: Option<u32>,
    pub current_scheduled: Option<u32>,
    pub current_spontaneous: Option<u32>,
}

impl From<FfiCapacityUpdate> for CapacityUpdate {
    fn from(update: FfiCapacityUpdate) -> Self {
        CapacityUpdate {
            max_appointments: update.max_appointments,
            max_spontaneous: update.max_spontaneous,
            predicted_spontaneous: update.predicted_spontaneous,
            current_scheduled: update.current_scheduled,
            current_spontaneous: update.current_spontaneous,
        }
    }
}

/// FFI-safe weekly capacity totals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWeeklyStats {
    pub total_capacity: u64,
    pub total_scheduled: u64,
    pub total_predicted_spontaneous: u64,
    pub total_max_spontaneous: u64,
    pub available_slots: i64,
    pub capacity_utilization_pct: u32,
}

impl From<WeeklyStats> for FfiWeeklyStats {
    fn from(stats: WeeklyStats) -> Self {
        Self {
            total_capacity: stats.total_capacity,
            total_scheduled: stats.total_scheduled,
            total_predicted_spontaneous: stats.total_predicted_spontaneous,
            total_max_spontaneous: stats.total_max_spontaneous,
            available_slots: stats.available_slots,
            capacity_utilization_pct: stats.capacity_utilization_pct,
        }
    }
}

/// FFI-safe capacity alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAlert {
    pub kind: String,
    pub severity: String,
    pub message: String,
}

impl From<CapacityAlert> for FfiAlert {
    fn from(alert: CapacityAlert) -> Self {
        Self {
            kind: alert.kind.as_str().to_string(),
            severity: alert.severity.as_str().to_string(),
            message: alert.message,
        }
    }
}

/// FFI-safe appointment status change.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStatusChange {
    pub id: String,
    pub previous_status: Option<String>,
    pub status: String,
    pub synced: bool,
    pub remote_error: Option<String>,
}

/// FFI-safe task change.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTaskChange {
    pub task: FfiTask,
    pub previous: Option<FfiTask>,
    pub synced: bool,
    pub remote_error: Option<String>,
}

/// FFI-safe capacity change.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCapacityChange {
    pub capacity: FfiCapacity,
    pub previous: Option<FfiCapacity>,
    pub synced: bool,
    pub remote_error: Option<String>,
}

/// FFI-safe creation outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCreated {
    pub id: String,
    pub synced: bool,
    pub remote_error: Option<String>,
}

impl FfiCreated {
    fn from_outcome(id: &str, remote: &store::StoreResult<()>) -> Self {
        Self {
            id: id.to_string(),
            synced: remote.is_ok(),
            remote_error: remote_error(remote),
        }
    }
}
