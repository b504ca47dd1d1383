use jiff::Timestamp;

use fleet_core::{Alert, AlertFilter, AlertId, FleetError, Severity};

use crate::store::FleetStore;

impl FleetStore {
    /// Creates an alert in the initial `{read: false, acknowledged: false}`
    /// state and returns its id. Ids come from a monotonically increasing
    /// sequence, so they sort by creation order.
    pub fn create_alert(
        &self,
        alert_type: &str,
        truck_id: &str,
        message: &str,
        severity: Severity,
        timestamp: Option<Timestamp>,
    ) -> Result<AlertId, FleetError> {
        let mut collections = self.collections.write();

        collections.alert_seq += 1;
        let id = AlertId(collections.alert_seq);

        collections.alerts.push(Alert {
            id,
            alert_type: alert_type.to_string(),
            truck_id: truck_id.to_string(),
            message: message.to_string(),
            severity,
            timestamp: timestamp.unwrap_or_else(Timestamp::now),
            read: false,
            acknowledged: false,
        });

        self.commit(&collections)?;
        Ok(id)
    }

    /// Alerts matching every provided filter, newest first, truncated to
    /// `limit`. Creation order breaks timestamp ties.
    pub fn alerts(&self, filter: &AlertFilter, limit: usize) -> Vec<Alert> {
        let collections = self.collections.read();

        let mut matching: Vec<Alert> = collections
            .alerts
            .iter()
            .filter(|alert| filter.matches(alert))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        matching.truncate(limit);
        matching
    }

    /// Sets `read`. Idempotent; marking an already-read alert is a no-op.
    pub fn mark_read(&self, id: AlertId) -> Result<(), FleetError> {
        self.set_flag(id, |alert| alert.read = true)
    }

    /// Sets `acknowledged`, independently of `read`. Idempotent.
    pub fn mark_acknowledged(&self, id: AlertId) -> Result<(), FleetError> {
        self.set_flag(id, |alert| alert.acknowledged = true)
    }

    pub fn count_unread(&self) -> usize {
        self.collections
            .read()
            .alerts
            .iter()
            .filter(|alert| !alert.read)
            .count()
    }

    fn set_flag(&self, id: AlertId, set: impl FnOnce(&mut Alert)) -> Result<(), FleetError> {
        let mut collections = self.collections.write();

        let alert = collections
            .alerts
            .iter_mut()
            .find(|alert| alert.id == id)
            .ok_or_else(|| FleetError::not_found("alert", id.to_string()))?;

        set(alert);
        self.commit(&collections)
    }
}
