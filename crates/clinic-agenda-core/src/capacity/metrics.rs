//! Per-day derived capacity metrics.

use serde::{Deserialize, Serialize};

use super::guarded_ratio;
use crate::models::DailyCapacity;

/// Metrics derived from a single day's capacity record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CapacityMetrics {
    /// `max_appointments - current_scheduled`, negative when over-booked
    pub remaining_appointment_slots: i64,
    /// `max_spontaneous - current_spontaneous`, negative when over-booked
    pub remaining_spontaneous_slots: i64,
    /// Booked share of all slots (0 when there are no slots)
    pub scheduled_utilization: f64,
    /// Booked share of walk-in slots (0 when there are no walk-in slots)
    pub spontaneous_utilization: f64,
}

impl CapacityMetrics {
    /// Derive metrics for one day.
    pub fn of(capacity: &DailyCapacity) -> Self {
        Self {
            remaining_appointment_slots: i64::from(capacity.max_appointments)
                - i64::from(capacity.current_scheduled),
            remaining_spontaneous_slots: i64::from(capacity.max_spontaneous)
                - i64::from(capacity.current_spontaneous),
            scheduled_utilization: guarded_ratio(
                capacity.current_scheduled.into(),
                capacity.max_appointments.into(),
            ),
            spontaneous_utilization: guarded_ratio(
                capacity.current_spontaneous.into(),
                capacity.max_spontaneous.into(),
            ),
        }
    }

    /// Scheduled utilization as a percentage (progress bar width).
    pub fn scheduled_pct(&self) -> f64 {
        self.scheduled_utilization * 100.0
    }

    /// Walk-in utilization as a percentage (progress bar width).
    pub fn spontaneous_pct(&self) -> f64 {
        self.spontaneous_utilization * 100.0
    }

    pub fn is_overbooked(&self) -> bool {
        self.remaining_appointment_slots < 0
    }
}

impl From<&DailyCapacity> for CapacityMetrics {
    fn from(capacity: &DailyCapacity) -> Self {
        Self::of(capacity)
    }
}
