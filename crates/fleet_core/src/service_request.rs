use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
}

/// A maintenance/service request. Informationally linked to a truck by id
/// only; it survives the truck's deletion under the default orphan policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub truck_id: String,
    pub service_type: String,
    pub description: String,
    pub requested_date: Date,
    pub requested_by: String,
    pub status: ServiceStatus,
}

impl ServiceRequest {
    pub fn new(
        truck_id: impl Into<String>,
        service_type: impl Into<String>,
        description: impl Into<String>,
        requested_date: Date,
        requested_by: impl Into<String>,
    ) -> Self {
        ServiceRequest {
            truck_id: truck_id.into(),
            service_type: service_type.into(),
            description: description.into(),
            requested_date,
            requested_by: requested_by.into(),
            status: ServiceStatus::Pending,
        }
    }
}
