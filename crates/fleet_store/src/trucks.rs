use serde::Serialize;
use tracing::info;

use fleet_core::{FleetError, OrphanPolicy, Truck, TruckStatus};

use crate::store::FleetStore;

/// What a truck deletion actually removed, per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeOutcome {
    pub schedules_removed: usize,
    pub service_requests_removed: usize,
    pub alerts_removed: usize,
}

impl FleetStore {
    pub fn trucks(&self) -> Vec<Truck> {
        self.collections.read().trucks.clone()
    }

    pub fn truck(&self, truck_id: &str) -> Result<Truck, FleetError> {
        self.collections
            .read()
            .trucks
            .iter()
            .find(|truck| truck.truck_id == truck_id)
            .cloned()
            .ok_or_else(|| FleetError::not_found("truck", truck_id))
    }

    pub fn insert_truck(&self, truck: Truck) -> Result<(), FleetError> {
        let mut collections = self.collections.write();

        if collections
            .trucks
            .iter()
            .any(|existing| existing.truck_id == truck.truck_id)
        {
            return Err(FleetError::validation(format!(
                "truck '{}' already exists",
                truck.truck_id
            )));
        }

        collections.trucks.push(truck);
        self.commit(&collections)
    }

    pub fn update_truck_status(
        &self,
        truck_id: &str,
        status: TruckStatus,
    ) -> Result<(), FleetError> {
        let mut collections = self.collections.write();

        let truck = collections
            .trucks
            .iter_mut()
            .find(|truck| truck.truck_id == truck_id)
            .ok_or_else(|| FleetError::not_found("truck", truck_id))?;

        truck.status = status;
        self.commit(&collections)
    }

    pub fn update_truck_location(&self, truck_id: &str, location: &str) -> Result<(), FleetError> {
        let mut collections = self.collections.write();

        let truck = collections
            .trucks
            .iter_mut()
            .find(|truck| truck.truck_id == truck_id)
            .ok_or_else(|| FleetError::not_found("truck", truck_id))?;

        truck.location = location.to_string();
        self.commit(&collections)
    }

    /// Deletes a truck and everything that cascades with it.
    ///
    /// Schedules referencing the truck always go. Service requests and
    /// alerts are kept under `OrphanPolicy::Retain` so the historical
    /// service/alert record survives fleet retirement, and removed under
    /// `Purge`. The whole cascade runs under one write lock.
    pub fn delete_truck(
        &self,
        truck_id: &str,
        policy: OrphanPolicy,
    ) -> Result<CascadeOutcome, FleetError> {
        let mut collections = self.collections.write();

        let before = collections.trucks.len();
        collections.trucks.retain(|truck| truck.truck_id != truck_id);
        if collections.trucks.len() == before {
            return Err(FleetError::not_found("truck", truck_id));
        }

        let schedules_before = collections.schedules.len();
        collections
            .schedules
            .retain(|schedule| schedule.truck_id != truck_id);
        let schedules_removed = schedules_before - collections.schedules.len();

        let mut service_requests_removed = 0;
        let mut alerts_removed = 0;
        if policy == OrphanPolicy::Purge {
            let requests_before = collections.service_requests.len();
            collections
                .service_requests
                .retain(|request| request.truck_id != truck_id);
            service_requests_removed = requests_before - collections.service_requests.len();

            let alerts_before = collections.alerts.len();
            collections.alerts.retain(|alert| alert.truck_id != truck_id);
            alerts_removed = alerts_before - collections.alerts.len();
        }

        self.commit(&collections)?;

        info!(
            "FleetStore: deleted truck {} ({} schedules, {} service requests, {} alerts)",
            truck_id, schedules_removed, service_requests_removed, alerts_removed
        );

        Ok(CascadeOutcome {
            schedules_removed,
            service_requests_removed,
            alerts_removed,
        })
    }
}
