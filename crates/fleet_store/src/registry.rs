use jiff::civil::{Date, DateTime};

use fleet_core::{FleetError, Schedule, ServiceRequest};

use crate::store::FleetStore;

impl FleetStore {
    /// Inserts a schedule with status `Scheduled`. There is deliberately no
    /// uniqueness or overlap check against existing schedules for the same
    /// truck; consumers treat the first inserted schedule as current.
    pub fn add_schedule(
        &self,
        truck_id: &str,
        destination: &str,
        departure_time: DateTime,
        arrival_time: DateTime,
    ) -> Result<(), FleetError> {
        let mut collections = self.collections.write();
        collections.schedules.push(Schedule::new(
            truck_id,
            destination,
            departure_time,
            arrival_time,
        ));
        self.commit(&collections)
    }

    /// All schedules, or one truck's, in insertion order.
    pub fn schedules(&self, truck_id: Option<&str>) -> Vec<Schedule> {
        self.collections
            .read()
            .schedules
            .iter()
            .filter(|schedule| truck_id.is_none_or(|id| schedule.truck_id == id))
            .cloned()
            .collect()
    }

    pub fn create_service_request(
        &self,
        truck_id: &str,
        service_type: &str,
        description: &str,
        requested_date: Date,
        requested_by: &str,
    ) -> Result<(), FleetError> {
        let mut collections = self.collections.write();
        collections.service_requests.push(ServiceRequest::new(
            truck_id,
            service_type,
            description,
            requested_date,
            requested_by,
        ));
        self.commit(&collections)
    }

    pub fn service_requests(&self, truck_id: Option<&str>) -> Vec<ServiceRequest> {
        self.collections
            .read()
            .service_requests
            .iter()
            .filter(|request| truck_id.is_none_or(|id| request.truck_id == id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::{ScheduleStatus, ServiceStatus};
    use jiff::civil::date;

    fn times() -> (DateTime, DateTime) {
        (
            date(2026, 9, 1).at(8, 0, 0, 0),
            date(2026, 9, 1).at(17, 30, 0, 0),
        )
    }

    #[test]
    fn schedules_keep_insertion_order() {
        let store = FleetStore::in_memory();
        let (departure, arrival) = times();

        store
            .add_schedule("TRK-1", "Rotterdam", departure, arrival)
            .unwrap();
        store
            .add_schedule("TRK-2", "Hamburg", departure, arrival)
            .unwrap();
        store
            .add_schedule("TRK-1", "Antwerp", departure, arrival)
            .unwrap();

        let all: Vec<String> = store
            .schedules(None)
            .into_iter()
            .map(|s| s.destination)
            .collect();
        assert_eq!(all, vec!["Rotterdam", "Hamburg", "Antwerp"]);

        let for_truck: Vec<String> = store
            .schedules(Some("TRK-1"))
            .into_iter()
            .map(|s| s.destination)
            .collect();
        assert_eq!(for_truck, vec!["Rotterdam", "Antwerp"]);
    }

    #[test]
    fn duplicate_schedules_are_allowed() {
        let store = FleetStore::in_memory();
        let (departure, arrival) = times();
        store
            .add_schedule("TRK-1", "Rotterdam", departure, arrival)
            .unwrap();
        store
            .add_schedule("TRK-1", "Rotterdam", departure, arrival)
            .unwrap();
        assert_eq!(store.schedules(Some("TRK-1")).len(), 2);
    }

    #[test]
    fn new_schedule_starts_scheduled() {
        let store = FleetStore::in_memory();
        let (departure, arrival) = times();
        store
            .add_schedule("TRK-1", "Rotterdam", departure, arrival)
            .unwrap();
        assert_eq!(
            store.schedules(None)[0].status,
            ScheduleStatus::Scheduled
        );
    }

    #[test]
    fn service_requests_start_pending_and_filter_by_truck() {
        let store = FleetStore::in_memory();
        store
            .create_service_request(
                "TRK-1",
                "oil_change",
                "routine",
                date(2026, 9, 5),
                "dispatcher",
            )
            .unwrap();
        store
            .create_service_request(
                "TRK-2",
                "tire_rotation",
                "uneven wear",
                date(2026, 9, 6),
                "dispatcher",
            )
            .unwrap();

        let all = store.service_requests(None);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.status == ServiceStatus::Pending));

        let for_truck = store.service_requests(Some("TRK-2"));
        assert_eq!(for_truck.len(), 1);
        assert_eq!(for_truck[0].service_type, "tire_rotation");
        assert_eq!(for_truck[0].requested_by, "dispatcher");
    }
}
