//! Capacity aggregation across a period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::guarded_ratio;
use crate::models::DailyCapacity;

/// Totals over a sequence of daily capacity records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyStats {
    pub total_capacity: u64,
    pub total_scheduled: u64,
    pub total_predicted_spontaneous: u64,
    pub total_max_spontaneous: u64,
    /// `total_capacity - total_scheduled`
    pub available_slots: i64,
    /// `round(100 * total_scheduled / total_capacity)`, 0 for an empty period
    pub capacity_utilization_pct: u32,
}

impl WeeklyStats {
    /// Aggregate every record in the slice.
    pub fn aggregate(records: &[DailyCapacity]) -> Self {
        Self::aggregate_iter(records.iter())
    }

    /// Aggregate only the records whose date is one of `days`.
    pub fn for_days(records: &[DailyCapacity], days: &[NaiveDate]) -> Self {
        Self::aggregate_iter(records.iter().filter(|cap| days.contains(&cap.date)))
    }

    fn aggregate_iter<'a>(records: impl Iterator<Item = &'a DailyCapacity>) -> Self {
        let mut stats = WeeklyStats::default();
        for day in records {
            stats.total_capacity += u64::from(day.max_appointments);
            stats.total_scheduled += u64::from(day.current_scheduled);
            stats.total_predicted_spontaneous += u64::from(day.predicted_spontaneous);
            stats.total_max_spontaneous += u64::from(day.max_spontaneous);
        }

        stats.available_slots = stats.total_capacity as i64 - stats.total_scheduled as i64;
        stats.capacity_utilization_pct =
            (guarded_ratio(stats.total_scheduled, stats.total_capacity) * 100.0).round() as u32;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_day(d: u32, max: u32, scheduled: u32) -> DailyCapacity {
        DailyCapacity {
            date: NaiveDate::from_ymd_opt(2025, 9, d).unwrap(),
            max_appointments: max,
            max_spontaneous: 4,
            predicted_spontaneous: 3,
            current_scheduled: scheduled,
            current_spontaneous: 1,
        }
    }

    #[test]
    fn test_aggregate_week() {
        let week = vec![
            make_day(8, 20, 15),
            make_day(9, 20, 18),
            make_day(10, 20, 17),
            make_day(11, 18, 12),
            make_day(12, 16, 8),
        ];
        let stats = WeeklyStats::aggregate(&week);

        assert_eq!(stats.total_capacity, 94);
        assert_eq!(stats.total_scheduled, 70);
        assert_eq!(stats.total_predicted_spontaneous, 15);
        assert_eq!(stats.total_max_spontaneous, 20);
        assert_eq!(stats.available_slots, 24);
        // 70 / 94 = 74.47%
        assert_eq!(stats.capacity_utilization_pct, 74);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1 / 8 = 12.5%
        let stats = WeeklyStats::aggregate(&[make_day(8, 8, 1)]);
        assert_eq!(stats.capacity_utilization_pct, 13);
    }

    #[test]
    fn test_empty_period() {
        let stats = WeeklyStats::aggregate(&[]);
        assert_eq!(stats, WeeklyStats::default());
        assert_eq!(stats.capacity_utilization_pct, 0);
    }

    #[test]
    fn test_zero_capacity_days() {
        let stats = WeeklyStats::aggregate(&[make_day(8, 0, 0), make_day(9, 0, 0)]);
        assert_eq!(stats.capacity_utilization_pct, 0);
        assert_eq!(stats.available_slots, 0);
    }

    #[test]
    fn test_overbooked_period() {
        let stats = WeeklyStats::aggregate(&[make_day(8, 10, 12)]);
        assert_eq!(stats.available_slots, -2);
        assert_eq!(stats.capacity_utilization_pct, 120);
    }

    #[test]
    fn test_for_days_filters_records() {
        let records = vec![make_day(5, 10, 5), make_day(8, 20, 10), make_day(9, 20, 10)];
        let days = [
            NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 9).unwrap(),
        ];
        let stats = WeeklyStats::for_days(&records, &days);

        assert_eq!(stats.total_capacity, 40);
        assert_eq!(stats.capacity_utilization_pct, 50);
    }
}
