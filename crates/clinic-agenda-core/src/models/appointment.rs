//! Appointment models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, patient not yet in the clinic
    Scheduled,
    /// Patient checked in
    Arrived,
    /// Visit underway
    InProgress,
    /// Visit finished
    Completed,
    /// Booking withdrawn
    Cancelled,
}

impl AppointmentStatus {
    /// Status after a completion toggle: completed goes back to scheduled,
    /// everything else becomes completed.
    pub fn toggled(self) -> Self {
        match self {
            AppointmentStatus::Completed => AppointmentStatus::Scheduled,
            _ => AppointmentStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Arrived => "arrived",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(AppointmentStatus::Scheduled),
            "arrived" => Some(AppointmentStatus::Arrived),
            "in_progress" => Some(AppointmentStatus::InProgress),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A scheduled or walk-in visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique appointment ID
    pub id: String,
    /// Patient ID (absent for walk-ins not yet registered)
    pub patient_id: Option<String>,
    /// Patient display name
    pub patient_name: String,
    /// Attending doctor
    pub doctor_name: String,
    /// Calendar day of the visit
    pub date: NaiveDate,
    /// Local time of day, e.g. "08:30"
    pub time: String,
    /// Free-text notes
    pub notes: String,
    /// Walk-in rather than pre-booked
    pub is_spontaneous: bool,
    /// First visit (false = returning patient)
    pub is_new_patient: bool,
    /// Lifecycle status
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Create a new scheduled appointment.
    pub fn new(patient_name: String, doctor_name: String, date: NaiveDate, time: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: None,
            patient_name,
            doctor_name,
            date,
            time,
            notes: String::new(),
            is_spontaneous: false,
            is_new_patient: false,
            status: AppointmentStatus::Scheduled,
        }
    }

    /// Flip between completed and scheduled, returning the new status.
    pub fn toggle_status(&mut self) -> AppointmentStatus {
        self.status = self.status.toggled();
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == AppointmentStatus::Completed
    }

    /// Check whether the appointment belongs to the given patient.
    pub fn is_for_patient(&self, patient_id: &str) -> bool {
        self.patient_id.as_deref() == Some(patient_id)
    }
}
