//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database, DbError, DbResult};
use crate::models::Patient;

const PATIENT_COLUMNS: &str =
    "id, name, dni, phone, email, address, birth_date, created_at, updated_at";

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                id, name, dni, phone, email, address, birth_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                patient.id,
                patient.name,
                patient.dni,
                patient.phone,
                patient.email,
                patient.address,
                patient.birth_date.map(|d| d.to_string()),
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS),
                [id],
                PatientRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Get a patient by national ID.
    pub fn get_patient_by_dni(&self, dni: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE dni = ?", PATIENT_COLUMNS),
                [dni],
                PatientRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM patients ORDER BY name",
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map([], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    dni: String,
    phone: String,
    email: String,
    address: String,
    birth_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl PatientRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(PatientRow {
            id: row.get(0)?,
            name: row.get(1)?,
            dni: row.get(2)?,
            phone: row.get(3)?,
            email: row.get(4)?,
            address: row.get(5)?,
            birth_date: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let birth_date = row
            .birth_date
            .as_deref()
            .map(|d| parse_date("birth_date", d))
            .transpose()?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            dni: row.dni,
            phone: row.phone,
            email: row.email,
            address: row.address,
            birth_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut patient = Patient::new("María González".into(), "30123456".into());
        patient.phone = "+54 11 5555-0101".into();
        patient.birth_date = NaiveDate::from_ymd_opt(1985, 3, 15);
        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(&patient.id).unwrap().unwrap();
        assert_eq!(retrieved, patient);

        let by_dni = db.get_patient_by_dni("30123456").unwrap().unwrap();
        assert_eq!(by_dni.id, patient.id);
    }

    #[test]
    fn test_duplicate_dni_rejected() {
        let db = setup_db();
        db.insert_patient(&Patient::new("A".into(), "111".into())).unwrap();

        let result = db.insert_patient(&Patient::new("B".into(), "111".into()));
        assert!(matches!(result, Err(DbError::Sqlite(_))));
    }

    #[test]
    fn test_list_sorted_by_name() {
        let db = setup_db();
        db.insert_patient(&Patient::new("Roberto Silva".into(), "1".into())).unwrap();
        db.insert_patient(&Patient::new("Ana Rodríguez".into(), "2".into())).unwrap();

        let names: Vec<String> = db.list_patients().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Ana Rodríguez", "Roberto Silva"]);
    }
}
