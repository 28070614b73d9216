//! Capacity alert evaluation.
//!
//! Every rule in [`RULES`] is evaluated independently against the same day's
//! capacity record and derived metrics; all matching rules fire, in table order.
//!
//! The "under control" rule only re-checks the utilization threshold. It can
//! therefore fire alongside the walk-in rules unless
//! [`AlertPolicy::suppress_under_control_when_alerting`] is set.

mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};

use crate::capacity::CapacityMetrics;
use crate::models::DailyCapacity;

/// Default scheduled-utilization threshold for the high-capacity alert.
pub const DEFAULT_UTILIZATION_THRESHOLD: f64 = 0.8;

/// Alert category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    DayCapacityHigh,
    WalkInsMaxed,
    PredictedWalkInsExceed,
    UnderControl,
}

impl AlertKind {
    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::DayCapacityHigh => "day_capacity_high",
            AlertKind::WalkInsMaxed => "walk_ins_maxed",
            AlertKind::PredictedWalkInsExceed => "predicted_walk_ins_exceed",
            AlertKind::UnderControl => "under_control",
        }
    }
}

/// Display severity of an alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Caution,
    Warning,
    Danger,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Caution => "caution",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Danger => "danger",
        }
    }
}

/// A single operator-facing capacity alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityAlert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Tunables for alert evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertPolicy {
    /// Scheduled utilization above which the day counts as nearly full
    pub utilization_threshold: f64,
    /// Drop "under control" when any other alert fired for the day
    pub suppress_under_control_when_alerting: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            utilization_threshold: DEFAULT_UTILIZATION_THRESHOLD,
            suppress_under_control_when_alerting: false,
        }
    }
}

/// Evaluate every rule for one day.
pub fn evaluate(capacity: &DailyCapacity, policy: &AlertPolicy) -> Vec<CapacityAlert> {
    let metrics = CapacityMetrics::of(capacity);

    let mut alerts: Vec<CapacityAlert> = RULES
        .iter()
        .filter(|rule| (rule.applies)(capacity, &metrics, policy))
        .map(|rule| rule.alert(policy))
        .collect();

    if policy.suppress_under_control_when_alerting
        && alerts.iter().any(|a| a.kind != AlertKind::UnderControl)
    {
        alerts.retain(|a| a.kind != AlertKind::UnderControl);
    }

    alerts
}

/// Evaluate a day that may have no capacity record.
///
/// A day without a record has nothing booked against it and reports
/// "under control".
pub fn evaluate_day(capacity: Option<&DailyCapacity>, policy: &AlertPolicy) -> Vec<CapacityAlert> {
    match capacity {
        Some(capacity) => evaluate(capacity, policy),
        None => vec![UNDER_CONTROL.alert(policy)],
    }
}
