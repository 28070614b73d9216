//! Collection filters for the agenda, patient registry and task tracker.

use chrono::NaiveDate;

use super::calendar::work_week;
use crate::models::{Appointment, AppointmentStatus, Patient, PendingTask, TaskStatus};

/// Appointments falling on the given calendar day.
pub fn appointments_on(appointments: &[Appointment], day: NaiveDate) -> Vec<&Appointment> {
    appointments.iter().filter(|appt| appt.date == day).collect()
}

/// Appointments falling Monday–Friday of the week containing `reference`.
pub fn appointments_in_week(appointments: &[Appointment], reference: NaiveDate) -> Vec<&Appointment> {
    let week = work_week(reference);
    appointments
        .iter()
        .filter(|appt| week.contains(&appt.date))
        .collect()
}

/// Appointments booked for a patient.
pub fn appointments_for_patient<'a>(
    appointments: &'a [Appointment],
    patient_id: &str,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appt| appt.is_for_patient(patient_id))
        .collect()
}

/// Appointments in a given status.
pub fn appointments_with_status(
    appointments: &[Appointment],
    status: AppointmentStatus,
) -> Vec<&Appointment> {
    appointments.iter().filter(|appt| appt.status == status).collect()
}

/// Tasks belonging to a patient.
pub fn tasks_for_patient<'a>(tasks: &'a [PendingTask], patient_id: &str) -> Vec<&'a PendingTask> {
    tasks.iter().filter(|task| task.patient_id == patient_id).collect()
}

/// Tasks in a given status.
pub fn tasks_with_status(tasks: &[PendingTask], status: TaskStatus) -> Vec<&PendingTask> {
    tasks.iter().filter(|task| task.status == status).collect()
}

/// Registry search: case-insensitive name substring and DNI substring.
///
/// Empty criteria match every patient.
pub fn filter_patients<'a>(patients: &'a [Patient], name: &str, dni: &str) -> Vec<&'a Patient> {
    let name = name.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&name) && p.dni.contains(dni))
        .collect()
}

/// Task search: case-insensitive patient-name and doctor substrings.
///
/// Tasks without a patient name only match an empty patient filter.
pub fn filter_tasks<'a>(tasks: &'a [PendingTask], patient: &str, doctor: &str) -> Vec<&'a PendingTask> {
    let patient = patient.to_lowercase();
    let doctor = doctor.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.patient_name
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&patient)
                && task.assigned_doctor.to_lowercase().contains(&doctor)
        })
        .collect()
}
