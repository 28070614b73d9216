//! Daily capacity database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_date, Database, DbError, DbResult};
use crate::models::{CapacityUpdate, DailyCapacity};

const CAPACITY_COLUMNS: &str = "date, max_appointments, max_spontaneous, predicted_spontaneous, \
                                current_scheduled, current_spontaneous";

impl Database {
    /// Insert or replace the capacity record for a day.
    pub fn upsert_capacity(&self, capacity: &DailyCapacity) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO daily_capacity (
                date, max_appointments, max_spontaneous, predicted_spontaneous,
                current_scheduled, current_spontaneous
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(date) DO UPDATE SET
                max_appointments = excluded.max_appointments,
                max_spontaneous = excluded.max_spontaneous,
                predicted_spontaneous = excluded.predicted_spontaneous,
                current_scheduled = excluded.current_scheduled,
                current_spontaneous = excluded.current_spontaneous
            "#,
            params![
                capacity.date.to_string(),
                capacity.max_appointments,
                capacity.max_spontaneous,
                capacity.predicted_spontaneous,
                capacity.current_scheduled,
                capacity.current_spontaneous,
            ],
        )?;
        Ok(())
    }

    /// Get the capacity record for a day.
    pub fn get_capacity(&self, date: NaiveDate) -> DbResult<Option<DailyCapacity>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM daily_capacity WHERE date = ?", CAPACITY_COLUMNS),
                [date.to_string()],
                CapacityRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List capacity records for an inclusive date range, ordered by date.
    pub fn list_capacity_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<DailyCapacity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM daily_capacity WHERE date BETWEEN ?1 AND ?2 ORDER BY date",
            CAPACITY_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![start.to_string(), end.to_string()],
            CapacityRow::from_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Apply a partial update to a day's record.
    pub fn update_capacity(&self, date: NaiveDate, update: &CapacityUpdate) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE daily_capacity SET
                max_appointments = COALESCE(?2, max_appointments),
                max_spontaneous = COALESCE(?3, max_spontaneous),
                predicted_spontaneous = COALESCE(?4, predicted_spontaneous),
                current_scheduled = COALESCE(?5, current_scheduled),
                current_spontaneous = COALESCE(?6, current_spontaneous)
            WHERE date = ?1
            "#,
            params![
                date.to_string(),
                update.max_appointments,
                update.max_spontaneous,
                update.predicted_spontaneous,
                update.current_scheduled,
                update.current_spontaneous,
            ],
        )?;
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct CapacityRow {
    date: String,
    max_appointments: u32,
    max_spontaneous: u32,
    predicted_spontaneous: u32,
    current_scheduled: u32,
    current_spontaneous: u32,
}

impl CapacityRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(CapacityRow {
            date: row.get(0)?,
            max_appointments: row.get(1)?,
            max_spontaneous: row.get(2)?,
            predicted_spontaneous: row.get(3)?,
            current_scheduled: row.get(4)?,
            current_spontaneous: row.get(5)?,
        })
    }
}

impl TryFrom<CapacityRow> for DailyCapacity {
    type Error = DbError;

    fn try_from(row: CapacityRow) -> Result<Self, Self::Error> {
        Ok(DailyCapacity {
            date: parse_date("date", &row.date)?,
            max_appointments: row.max_appointments,
            max_spontaneous: row.max_spontaneous,
            predicted_spontaneous: row.predicted_spontaneous,
            current_scheduled: row.current_scheduled,
            current_spontaneous: row.current_spontaneous,
        })
    }
}
