//! SQLite schema definition.

/// Complete database schema for the clinic agenda.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    dni TEXT NOT NULL UNIQUE,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT '',
    birth_date TEXT,                              -- YYYY-MM-DD
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Daily Capacity (one row per calendar day)
-- ============================================================================

CREATE TABLE IF NOT EXISTS daily_capacity (
    date TEXT PRIMARY KEY,                        -- YYYY-MM-DD
    max_appointments INTEGER NOT NULL CHECK (max_appointments >= 0),
    max_spontaneous INTEGER NOT NULL CHECK (max_spontaneous >= 0),
    predicted_spontaneous INTEGER NOT NULL DEFAULT 0 CHECK (predicted_spontaneous >= 0),
    -- Over-booking is allowed: no upper bound on the counters
    current_scheduled INTEGER NOT NULL DEFAULT 0 CHECK (current_scheduled >= 0),
    current_spontaneous INTEGER NOT NULL DEFAULT 0 CHECK (current_spontaneous >= 0),
    CHECK (max_spontaneous <= max_appointments)
);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_id TEXT,                              -- NULL for unregistered walk-ins
    patient_name TEXT NOT NULL,
    doctor_name TEXT NOT NULL,
    date TEXT NOT NULL,                           -- YYYY-MM-DD
    time TEXT NOT NULL,                           -- HH:MM local
    notes TEXT NOT NULL DEFAULT '',
    is_spontaneous INTEGER NOT NULL DEFAULT 0,
    is_new_patient INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'scheduled'
        CHECK (status IN ('scheduled', 'arrived', 'in_progress', 'completed', 'cancelled'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date, time);
CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);

-- ============================================================================
-- Pending Tasks
-- ============================================================================

CREATE TABLE IF NOT EXISTS pending_tasks (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL,
    patient_name TEXT,
    type TEXT NOT NULL CHECK (type IN ('estudio', 'control', 'cultivo', 'seguimiento')),
    description TEXT NOT NULL,
    due_date TEXT NOT NULL,                       -- YYYY-MM-DD
    priority TEXT NOT NULL CHECK (priority IN ('baja', 'media', 'alta', 'urgente')),
    status TEXT NOT NULL DEFAULT 'pendiente'
        CHECK (status IN ('pendiente', 'en_progreso', 'completada')),
    assigned_doctor TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    completed_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_tasks_patient ON pending_tasks(patient_id);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON pending_tasks(status);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_capacity_constraints() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        // Walk-in quota larger than total quota should fail
        let result = conn.execute(
            "INSERT INTO daily_capacity (date, max_appointments, max_spontaneous) VALUES ('2025-09-10', 5, 6)",
            [],
        );
        assert!(result.is_err());

        // Negative quota should fail
        let result = conn.execute(
            "INSERT INTO daily_capacity (date, max_appointments, max_spontaneous) VALUES ('2025-09-10', -1, 0)",
            [],
        );
        assert!(result.is_err());

        // Over-booked counters are representable
        let result = conn.execute(
            "INSERT INTO daily_capacity (date, max_appointments, max_spontaneous, current_scheduled) VALUES ('2025-09-10', 5, 2, 7)",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_status_constraints() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_name, doctor_name, date, time, status) VALUES ('a1', 'X', 'Dr. Y', '2025-09-10', '08:30', 'no_show')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO pending_tasks (id, patient_id, type, description, due_date, priority, assigned_doctor) VALUES ('t1', 'p1', 'estudio', 'CV', '2025-09-12', 'critica', 'Dr. Y')",
            [],
        );
        assert!(result.is_err());
    }
}
