use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use fleet_core::{Alert, FleetError, Schedule, ServiceRequest, Truck};

use crate::users::UserRecord;

/// The five logical collections plus the alert id sequence, snapshotted
/// together so ids never repeat across restarts.
#[derive(Default, Serialize, Deserialize)]
pub(crate) struct Collections {
    pub(crate) trucks: Vec<Truck>,
    pub(crate) users: Vec<UserRecord>,
    pub(crate) schedules: Vec<Schedule>,
    pub(crate) service_requests: Vec<ServiceRequest>,
    pub(crate) alerts: Vec<Alert>,
    pub(crate) alert_seq: u64,
}

/// Store client with process-wide lifecycle: opened once at startup, passed
/// to components as `Arc<FleetStore>`, closed (flushed) at shutdown.
///
/// Collections live behind one `RwLock`; each operation takes the lock once,
/// so every store operation is individually atomic, including the
/// truck-delete cascade.
pub struct FleetStore {
    pub(crate) collections: RwLock<Collections>,
    path: Option<PathBuf>,
}

pub(crate) fn store_err(err: impl Display) -> FleetError {
    FleetError::Store(err.to_string())
}

impl FleetStore {
    /// Volatile store, nothing survives the process. Used in tests and when
    /// no snapshot path is configured.
    pub fn in_memory() -> Self {
        FleetStore {
            collections: RwLock::new(Collections::default()),
            path: None,
        }
    }

    /// Opens the store backed by a JSON snapshot file, loading it when it
    /// already exists.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, FleetError> {
        let path = path.as_ref().to_path_buf();

        let collections = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(store_err)?;
            serde_json::from_str(&raw).map_err(store_err)?
        } else {
            Collections::default()
        };

        info!("FleetStore: opened snapshot at {}", path.display());

        Ok(FleetStore {
            collections: RwLock::new(collections),
            path: Some(path),
        })
    }

    /// Flushes the snapshot. Called by every mutation while the write lock
    /// is still held, and once more at shutdown.
    pub(crate) fn commit(&self, collections: &Collections) -> Result<(), FleetError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let raw = serde_json::to_string_pretty(collections).map_err(store_err)?;

        // Write-then-rename keeps a crashed flush from truncating the
        // previous snapshot.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(store_err)?;
        fs::rename(&tmp, path).map_err(store_err)?;

        debug!("FleetStore: flushed snapshot to {}", path.display());
        Ok(())
    }

    pub fn close(&self) -> Result<(), FleetError> {
        let collections = self.collections.read();
        self.commit(&collections)
    }
}
