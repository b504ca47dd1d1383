use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStatus {
    Scheduled,
    Departed,
    Completed,
    Cancelled,
}

/// One planned trip for a truck. Multiple schedules per truck are allowed;
/// consumers treat the first inserted one as the current destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub truck_id: String,
    pub destination: String,
    pub departure_time: DateTime,
    pub arrival_time: DateTime,
    pub status: ScheduleStatus,
}

impl Schedule {
    pub fn new(
        truck_id: impl Into<String>,
        destination: impl Into<String>,
        departure_time: DateTime,
        arrival_time: DateTime,
    ) -> Self {
        Schedule {
            truck_id: truck_id.into(),
            destination: destination.into(),
            departure_time,
            arrival_time,
            status: ScheduleStatus::Scheduled,
        }
    }
}
