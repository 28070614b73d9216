//! Operator session: a snapshot plus the store it writes through.
//!
//! Writes are optimistic. The local snapshot is mutated first, then the store
//! is called, and the remote outcome is handed back in [`Optimistic::remote`].
//! Nothing is rolled back automatically; callers decide whether to keep the
//! local change or undo it with the matching `rollback_*` / `discard_local_*`
//! call. Only records whose remote create failed can be discarded.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentStatus, CapacityUpdate, DailyCapacity, Patient, PendingTask,
};
use crate::snapshot::{AgendaSnapshot, RefreshReport};
use crate::store::{DateRange, RecordStore, StoreResult};

/// Session errors (local snapshot lookups).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("No capacity record for {0}")]
    CapacityNotFound(NaiveDate),

    #[error("Record {0} is stored remotely and cannot be discarded locally")]
    NotLocal(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Result of an optimistic write.
#[derive(Debug)]
pub struct Optimistic<T> {
    /// Value now held in the snapshot
    pub value: T,
    /// Snapshot value before the write; `None` for newly created records
    pub previous: Option<T>,
    /// Outcome of the remote write
    pub remote: StoreResult<()>,
}

impl<T> Optimistic<T> {
    /// Whether the store accepted the write.
    pub fn is_synced(&self) -> bool {
        self.remote.is_ok()
    }
}

/// Kind of a record created locally whose remote write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRecord {
    Patient,
    Task,
    Appointment,
}

/// A single operator's working session.
pub struct AgendaSession<S> {
    store: S,
    snapshot: AgendaSnapshot,
    /// Records that exist only in the snapshot
    local_only: HashMap<String, LocalRecord>,
}

impl<S: RecordStore> AgendaSession<S> {
    /// Start a session with an empty snapshot.
    pub fn new(store: S) -> Self {
        Self::with_snapshot(store, AgendaSnapshot::new())
    }

    /// Start a session over an existing snapshot.
    pub fn with_snapshot(store: S, snapshot: AgendaSnapshot) -> Self {
        Self {
            store,
            snapshot,
            local_only: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> &AgendaSnapshot {
        &self.snapshot
    }

    /// Kind of the record if it exists only locally.
    pub fn local_record(&self, id: &str) -> Option<LocalRecord> {
        self.local_only.get(id).copied()
    }

    /// Re-fetch everything; capacity is loaded for `window`.
    ///
    /// Local-only records are dropped along with the rest of the old snapshot.
    pub fn refresh(&mut self, window: DateRange) -> RefreshReport {
        self.local_only.clear();
        self.snapshot.refresh(&self.store, window)
    }

    // =========================================================================
    // Status toggles
    // =========================================================================

    /// Toggle an appointment between completed and scheduled.
    pub fn toggle_appointment_status(
        &mut self,
        id: &str,
    ) -> SessionResult<Optimistic<AppointmentStatus>> {
        let previous = self
            .snapshot
            .appointment(id)
            .map(|a| a.status)
            .ok_or_else(|| SessionError::AppointmentNotFound(id.to_string()))?;

        let status = self
            .snapshot
            .toggle_appointment_status(id)
            .ok_or_else(|| SessionError::AppointmentNotFound(id.to_string()))?;

        let remote = self.store.update_appointment_status(id, status);
        log_remote("update appointment status", id, &remote);

        Ok(Optimistic {
            value: status,
            previous: Some(previous),
            remote,
        })
    }

    /// Restore an appointment's status locally.
    pub fn rollback_appointment_status(
        &mut self,
        id: &str,
        previous: AppointmentStatus,
    ) -> SessionResult<()> {
        if self.snapshot.set_appointment_status(id, previous) {
            Ok(())
        } else {
            Err(SessionError::AppointmentNotFound(id.to_string()))
        }
    }

    /// Toggle a task between completed and pending.
    pub fn toggle_task_status(&mut self, id: &str) -> SessionResult<Optimistic<PendingTask>> {
        let previous = self
            .snapshot
            .task(id)
            .cloned()
            .ok_or_else(|| SessionError::TaskNotFound(id.to_string()))?;

        let now = chrono::Utc::now().to_rfc3339();
        self.snapshot.toggle_task_status(id, &now);
        let task = self
            .snapshot
            .task(id)
            .cloned()
            .ok_or_else(|| SessionError::TaskNotFound(id.to_string()))?;

        let remote = self
            .store
            .update_task_status(id, task.status, task.completed_at.as_deref());
        log_remote("update task status", id, &remote);

        Ok(Optimistic {
            value: task,
            previous: Some(previous),
            remote,
        })
    }

    /// Restore a task's previous state locally.
    pub fn rollback_task(&mut self, previous: PendingTask) -> SessionResult<()> {
        let id = previous.id.clone();
        if self.snapshot.replace_task(previous) {
            Ok(())
        } else {
            Err(SessionError::TaskNotFound(id))
        }
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Apply a partial update to a day's capacity.
    pub fn update_capacity(
        &mut self,
        date: NaiveDate,
        update: &CapacityUpdate,
    ) -> SessionResult<Optimistic<DailyCapacity>> {
        let previous = self
            .snapshot
            .capacity_for(date)
            .cloned()
            .ok_or(SessionError::CapacityNotFound(date))?;

        self.snapshot.apply_capacity_update(date, update);
        let value = self
            .snapshot
            .capacity_for(date)
            .cloned()
            .ok_or(SessionError::CapacityNotFound(date))?;

        let remote = self.store.update_capacity(date, update);
        log_remote("update capacity", &date.to_string(), &remote);

        Ok(Optimistic {
            value,
            previous: Some(previous),
            remote,
        })
    }

    /// Restore a day's capacity record locally.
    pub fn rollback_capacity(&mut self, previous: DailyCapacity) {
        self.snapshot.replace_capacity(previous);
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Register a patient. The record is kept locally even if the store fails.
    pub fn create_patient(&mut self, patient: Patient) -> Optimistic<Patient> {
        let (value, remote) = match self.store.create_patient(&patient) {
            Ok(stored) => (stored, Ok(())),
            Err(e) => (patient, Err(e)),
        };
        log_remote("create patient", &value.id, &remote);
        self.track_local(&value.id, LocalRecord::Patient, &remote);

        self.snapshot.push_patient(value.clone());
        Optimistic {
            value,
            previous: None,
            remote,
        }
    }

    /// Drop a patient whose remote create failed.
    pub fn discard_local_patient(&mut self, id: &str) -> SessionResult<Patient> {
        self.untrack_local(id, LocalRecord::Patient)?;
        self.snapshot
            .remove_patient(id)
            .ok_or_else(|| SessionError::NotLocal(id.to_string()))
    }

    /// Create a task. The record is kept locally even if the store fails.
    pub fn create_task(&mut self, task: PendingTask) -> Optimistic<PendingTask> {
        let (value, remote) = match self.store.create_task(&task) {
            Ok(stored) => (stored, Ok(())),
            Err(e) => (task, Err(e)),
        };
        log_remote("create task", &value.id, &remote);
        self.track_local(&value.id, LocalRecord::Task, &remote);

        self.snapshot.push_task(value.clone());
        Optimistic {
            value,
            previous: None,
            remote,
        }
    }

    pub fn discard_local_task(&mut self, id: &str) -> SessionResult<PendingTask> {
        self.untrack_local(id, LocalRecord::Task)?;
        self.snapshot
            .remove_task(id)
            .ok_or_else(|| SessionError::TaskNotFound(id.to_string()))
    }

    /// Book an appointment. The record is kept locally (and counted against
    /// the day's capacity) even if the store fails.
    pub fn create_appointment(&mut self, appointment: Appointment) -> Optimistic<Appointment> {
        let (value, remote) = match self.store.create_appointment(&appointment) {
            Ok(stored) => (stored, Ok(())),
            Err(e) => (appointment, Err(e)),
        };
        log_remote("create appointment", &value.id, &remote);
        self.track_local(&value.id, LocalRecord::Appointment, &remote);

        self.snapshot.push_appointment(value.clone());
        Optimistic {
            value,
            previous: None,
            remote,
        }
    }

    /// Drop an appointment whose remote create failed, releasing its booking.
    pub fn discard_local_appointment(&mut self, id: &str) -> SessionResult<Appointment> {
        self.untrack_local(id, LocalRecord::Appointment)?;
        self.snapshot
            .remove_appointment(id)
            .ok_or_else(|| SessionError::AppointmentNotFound(id.to_string()))
    }

    fn track_local(&mut self, id: &str, kind: LocalRecord, remote: &StoreResult<()>) {
        if remote.is_err() {
            self.local_only.insert(id.to_string(), kind);
        }
    }

    fn untrack_local(&mut self, id: &str, kind: LocalRecord) -> SessionResult<()> {
        match self.local_only.get(id) {
            Some(tracked) if *tracked == kind => {
                self.local_only.remove(id);
                Ok(())
            }
            _ => Err(SessionError::NotLocal(id.to_string())),
        }
    }
}

fn log_remote(action: &str, id: &str, remote: &StoreResult<()>) {
    match remote {
        Ok(()) => tracing::debug!(action, id, "Remote write accepted"),
        Err(e) => tracing::warn!(action, id, error = %e, "Remote write failed, keeping local change"),
    }
}
