//! Appointment database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};

const APPOINTMENT_COLUMNS: &str = "id, patient_id, patient_name, doctor_name, date, time, notes, \
                                   is_spontaneous, is_new_patient, status";

impl Database {
    /// Insert a new appointment and count it against its day's capacity.
    ///
    /// Both writes happen in one transaction so the day's counters always
    /// reflect the stored appointments. Days without a capacity record are
    /// left untouched.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO appointments (
                id, patient_id, patient_name, doctor_name, date, time, notes,
                is_spontaneous, is_new_patient, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                appointment.id,
                appointment.patient_id,
                appointment.patient_name,
                appointment.doctor_name,
                appointment.date.to_string(),
                appointment.time,
                appointment.notes,
                appointment.is_spontaneous,
                appointment.is_new_patient,
                appointment.status.as_str(),
            ],
        )?;

        tx.execute(
            r#"
            UPDATE daily_capacity SET
                current_scheduled = current_scheduled + 1,
                current_spontaneous = current_spontaneous + ?2
            WHERE date = ?1
            "#,
            params![appointment.date.to_string(), u32::from(appointment.is_spontaneous)],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM appointments WHERE id = ?", APPOINTMENT_COLUMNS),
                [id],
                AppointmentRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List appointments ordered by date then time, optionally restricted to
    /// an inclusive date range.
    pub fn list_appointments(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> DbResult<Vec<Appointment>> {
        let (start, end) = match range {
            Some((start, end)) => (Some(start.to_string()), Some(end.to_string())),
            None => (None, None),
        };

        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {}
            FROM appointments
            WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
            ORDER BY date, time
            "#,
            APPOINTMENT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![start, end], AppointmentRow::from_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Set an appointment's status.
    pub fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    patient_id: Option<String>,
    patient_name: String,
    doctor_name: String,
    date: String,
    time: String,
    notes: String,
    is_spontaneous: bool,
    is_new_patient: bool,
    status: String,
}

impl AppointmentRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(AppointmentRow {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            patient_name: row.get(2)?,
            doctor_name: row.get(3)?,
            date: row.get(4)?,
            time: row.get(5)?,
            notes: row.get(6)?,
            is_spontaneous: row.get(7)?,
            is_new_patient: row.get(8)?,
            status: row.get(9)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown appointment status: {}", row.status)))?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            doctor_name: row.doctor_name,
            date: parse_date("date", &row.date)?,
            time: row.time,
            notes: row.notes,
            is_spontaneous: row.is_spontaneous,
            is_new_patient: row.is_new_patient,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyCapacity;

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.upsert_capacity(&DailyCapacity::new(day(10), 20, 5)).unwrap();
        db
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn make_appointment(name: &str, d: u32, time: &str) -> Appointment {
        Appointment::new(name.into(), "Dr. Alonso".into(), day(d), time.into())
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut appt = make_appointment("María González", 10, "08:30");
        appt.patient_id = Some("p1".into());
        appt.notes = "Control VIH".into();
        appt.is_new_patient = true;
        db.insert_appointment(&appt).unwrap();

        let retrieved = db.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(retrieved, appt);
    }

    #[test]
    fn test_insert_books_capacity() {
        let db = setup_db();

        let mut walk_in = make_appointment("Ana Rodríguez", 10, "14:00");
        walk_in.is_spontaneous = true;
        db.insert_appointment(&make_appointment("Carlos Mendoza", 10, "10:00")).unwrap();
        db.insert_appointment(&walk_in).unwrap();

        let cap = db.get_capacity(day(10)).unwrap().unwrap();
        assert_eq!(cap.current_scheduled, 2);
        assert_eq!(cap.current_spontaneous, 1);
    }

    #[test]
    fn test_insert_without_capacity_row() {
        let db = setup_db();
        db.insert_appointment(&make_appointment("Laura Vega", 11, "09:00")).unwrap();

        assert!(db.get_capacity(day(11)).unwrap().is_none());
        assert_eq!(db.list_appointments(None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_ordered_by_date_and_time() {
        let db = setup_db();
        db.insert_appointment(&make_appointment("C", 11, "09:00")).unwrap();
        db.insert_appointment(&make_appointment("B", 10, "16:30")).unwrap();
        db.insert_appointment(&make_appointment("A", 10, "08:30")).unwrap();
        db.insert_appointment(&make_appointment("D", 15, "08:00")).unwrap();

        let all = db.list_appointments(None).unwrap();
        let names: Vec<_> = all.iter().map(|a| a.patient_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);

        let week = db.list_appointments(Some((day(8), day(12)))).unwrap();
        assert_eq!(week.len(), 3);
    }

    #[test]
    fn test_update_status() {
        let db = setup_db();
        let appt = make_appointment("A", 10, "08:30");
        db.insert_appointment(&appt).unwrap();

        assert!(db
            .update_appointment_status(&appt.id, AppointmentStatus::Completed)
            .unwrap());
        assert!(!db
            .update_appointment_status("missing", AppointmentStatus::Completed)
            .unwrap());

        let retrieved = db.get_appointment(&appt.id).unwrap().unwrap();
        assert_eq!(retrieved.status, AppointmentStatus::Completed);
    }
}
