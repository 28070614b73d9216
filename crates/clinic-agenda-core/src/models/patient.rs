//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient ID
    pub id: String,
    /// Full name
    pub name: String,
    /// National ID document number
    pub dni: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String, dni: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            dni,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            birth_date: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, day: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth| day.years_since(birth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("Laura Vega".into(), "28456789".into());
        assert_eq!(patient.name, "Laura Vega");
        assert_eq!(patient.dni, "28456789");
        assert_eq!(patient.id.len(), 36); // UUID format
        assert_eq!(patient.created_at, patient.updated_at);
    }

    #[test]
    fn test_age_on() {
        let mut patient = Patient::new("Laura Vega".into(), "28456789".into());
        assert_eq!(patient.age_on(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()), None);

        patient.birth_date = NaiveDate::from_ymd_opt(1980, 9, 11);
        assert_eq!(patient.age_on(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()), Some(44));
        assert_eq!(patient.age_on(NaiveDate::from_ymd_opt(2025, 9, 11).unwrap()), Some(45));
    }
}
