use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Default number of alerts returned by a filtered listing.
pub const DEFAULT_ALERT_LIMIT: usize = 50;

/// Opaque alert identifier. Ids are assigned from a store-owned sequence,
/// so ordering by id matches ordering by creation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlertId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(AlertId)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::High => "high",
                Severity::Medium => "medium",
                Severity::Low => "low",
            }
        )
    }
}

/// An operational notification tied to a truck.
///
/// Content fields are append-only; after creation only `read` and
/// `acknowledged` ever change, and the two flags are independent (an alert
/// may be acknowledged without having been read).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub alert_type: String,
    pub truck_id: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: Timestamp,
    pub read: bool,
    pub acknowledged: bool,
}

/// Filters combine with logical AND; `None`/`false` means "don't filter".
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub truck_id: Option<String>,
    pub severity: Option<Severity>,
    pub unread_only: bool,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(truck_id) = &self.truck_id {
            if alert.truck_id != *truck_id {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if alert.severity != severity {
                return false;
            }
        }
        if self.unread_only && alert.read {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(truck_id: &str, severity: Severity, read: bool) -> Alert {
        Alert {
            id: AlertId(1),
            alert_type: "maintenance".to_string(),
            truck_id: truck_id.to_string(),
            message: "brake wear".to_string(),
            severity,
            timestamp: Timestamp::UNIX_EPOCH,
            read,
            acknowledged: false,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = AlertFilter::default();
        assert!(filter.matches(&alert("TRK-1", Severity::Low, true)));
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = AlertFilter {
            truck_id: Some("TRK-1".to_string()),
            severity: Some(Severity::High),
            unread_only: true,
        };
        assert!(filter.matches(&alert("TRK-1", Severity::High, false)));
        assert!(!filter.matches(&alert("TRK-2", Severity::High, false)));
        assert!(!filter.matches(&alert("TRK-1", Severity::Low, false)));
        assert!(!filter.matches(&alert("TRK-1", Severity::High, true)));
    }
}
