use std::sync::RwLock;

use crate::registry::DeviceRegistry;
use crate::store::TelemetryStore;

/// Shared service state: the telemetry store behind its single lock.
///
/// All handler access goes through this lock; appends take the write guard,
/// metric reads hold the read guard across both sequences so they see a
/// consistent snapshot. The lock itself never leaves this struct.
pub struct AppState {
    pub store: RwLock<TelemetryStore>,
}

impl AppState {
    pub fn new(registry: &DeviceRegistry) -> Self {
        AppState {
            store: RwLock::new(TelemetryStore::new(registry)),
        }
    }
}
