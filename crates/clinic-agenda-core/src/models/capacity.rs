//! Daily capacity models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bookable capacity for a single clinic day.
///
/// Counters are not clamped: over-booking (`current_scheduled > max_appointments`)
/// is representable and surfaces as negative remaining slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCapacity {
    /// Calendar day (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Total bookable slots
    pub max_appointments: u32,
    /// Slots reserved for walk-ins, a subset of `max_appointments`
    pub max_spontaneous: u32,
    /// Forecast of walk-ins for the day
    pub predicted_spontaneous: u32,
    /// Slots booked so far
    pub current_scheduled: u32,
    /// Walk-ins booked so far, a subset of `current_scheduled`
    pub current_spontaneous: u32,
}

impl DailyCapacity {
    /// Create an empty day with the given quotas.
    pub fn new(date: NaiveDate, max_appointments: u32, max_spontaneous: u32) -> Self {
        Self {
            date,
            max_appointments,
            max_spontaneous,
            predicted_spontaneous: 0,
            current_scheduled: 0,
            current_spontaneous: 0,
        }
    }

    /// Record one booking against this day.
    pub fn book(&mut self, is_spontaneous: bool) {
        self.current_scheduled += 1;
        if is_spontaneous {
            self.current_spontaneous += 1;
        }
    }

    /// Release one booking, never going below zero.
    pub fn unbook(&mut self, is_spontaneous: bool) {
        self.current_scheduled = self.current_scheduled.saturating_sub(1);
        if is_spontaneous {
            self.current_spontaneous = self.current_spontaneous.saturating_sub(1);
        }
    }

    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: &CapacityUpdate) {
        if let Some(v) = update.max_appointments {
            self.max_appointments = v;
        }
        if let Some(v) = update.max_spontaneous {
            self.max_spontaneous = v;
        }
        if let Some(v) = update.predicted_spontaneous {
            self.predicted_spontaneous = v;
        }
        if let Some(v) = update.current_scheduled {
            self.current_scheduled = v;
        }
        if let Some(v) = update.current_spontaneous {
            self.current_spontaneous = v;
        }
    }
}

/// Partial update of a day's capacity record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityUpdate {
    pub max_appointments: Option<u32>,
    pub max_spontaneous: Option<u32>,
    pub predicted_spontaneous: Option<u32>,
    pub current_scheduled: Option<u32>,
    pub current_spontaneous: Option<u32>,
}

impl CapacityUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.max_appointments.is_none()
            && self.max_spontaneous.is_none()
            && self.predicted_spontaneous.is_none()
            && self.current_scheduled.is_none()
            && self.current_spontaneous.is_none()
    }
}

/// Find the capacity record for a given day.
pub fn capacity_for_date(records: &[DailyCapacity], date: NaiveDate) -> Option<&DailyCapacity> {
    records.iter().find(|cap| cap.date == date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_book_counts_walk_ins_inside_scheduled() {
        let mut cap = DailyCapacity::new(day(10), 20, 5);
        cap.book(false);
        cap.book(true);

        assert_eq!(cap.current_scheduled, 2);
        assert_eq!(cap.current_spontaneous, 1);

        cap.unbook(true);
        cap.unbook(false);
        cap.unbook(false);
        assert_eq!((cap.current_scheduled, cap.current_spontaneous), (0, 0));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut cap = DailyCapacity::new(day(10), 20, 5);
        let update = CapacityUpdate {
            predicted_spontaneous: Some(7),
            ..Default::default()
        };
        cap.apply(&update);

        assert_eq!(cap.predicted_spontaneous, 7);
        assert_eq!(cap.max_appointments, 20);
        assert!(!update.is_empty());
        assert!(CapacityUpdate::default().is_empty());
    }

    #[test]
    fn test_capacity_for_date() {
        let records = vec![DailyCapacity::new(day(9), 10, 2), DailyCapacity::new(day(10), 20, 5)];

        assert_eq!(capacity_for_date(&records, day(10)).unwrap().max_appointments, 20);
        assert!(capacity_for_date(&records, day(11)).is_none());
    }

    #[test]
    fn test_date_serializes_as_iso_day() {
        let cap = DailyCapacity::new(day(10), 20, 5);
        let json = serde_json::to_string(&cap).unwrap();
        assert!(json.contains("\"2025-09-10\""));
    }
}
