pub mod alerts;
pub mod registry;
pub mod store;
pub mod trucks;
pub mod users;

pub use store::FleetStore;
pub use trucks::CascadeOutcome;
pub use users::UserProfile;
