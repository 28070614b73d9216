//! Ordered alert rule table.

use super::{AlertKind, AlertPolicy, AlertSeverity, CapacityAlert};
use crate::capacity::CapacityMetrics;
use crate::models::DailyCapacity;

type Predicate = fn(&DailyCapacity, &CapacityMetrics, &AlertPolicy) -> bool;

/// A predicate paired with the alert it raises.
pub struct AlertRule {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub applies: Predicate,
}

impl AlertRule {
    /// Build the alert this rule emits under the given policy.
    pub fn alert(&self, policy: &AlertPolicy) -> CapacityAlert {
        CapacityAlert {
            kind: self.kind,
            severity: self.severity,
            message: message_for(self.kind, policy),
        }
    }
}

pub const DAY_CAPACITY_HIGH: AlertRule = AlertRule {
    kind: AlertKind::DayCapacityHigh,
    severity: AlertSeverity::Warning,
    applies: |_, metrics, policy| metrics.scheduled_utilization > policy.utilization_threshold,
};

pub const WALK_INS_MAXED: AlertRule = AlertRule {
    kind: AlertKind::WalkInsMaxed,
    severity: AlertSeverity::Danger,
    applies: |capacity, _, _| capacity.current_spontaneous >= capacity.max_spontaneous,
};

pub const PREDICTED_WALK_INS_EXCEED: AlertRule = AlertRule {
    kind: AlertKind::PredictedWalkInsExceed,
    severity: AlertSeverity::Caution,
    applies: |capacity, _, _| capacity.predicted_spontaneous > capacity.max_spontaneous,
};

/// Independent of the walk-in rules; only the utilization guard is inverted.
pub const UNDER_CONTROL: AlertRule = AlertRule {
    kind: AlertKind::UnderControl,
    severity: AlertSeverity::Info,
    applies: |_, metrics, policy| metrics.scheduled_utilization <= policy.utilization_threshold,
};

/// Rules in evaluation order.
pub const RULES: [AlertRule; 4] = [
    DAY_CAPACITY_HIGH,
    WALK_INS_MAXED,
    PREDICTED_WALK_INS_EXCEED,
    UNDER_CONTROL,
];

fn message_for(kind: AlertKind, policy: &AlertPolicy) -> String {
    match kind {
        AlertKind::DayCapacityHigh => format!(
            "Day capacity at {}%+",
            (policy.utilization_threshold * 100.0).round() as i64
        ),
        AlertKind::WalkInsMaxed => "Maximum walk-ins reached".to_string(),
        AlertKind::PredictedWalkInsExceed => "Predicted walk-ins exceed capacity".to_string(),
        AlertKind::UnderControl => "Capacity under control".to_string(),
    }
}
