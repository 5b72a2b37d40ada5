use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::metrics::{self, DeviceMetrics};
use crate::registry::DeviceRegistry;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("device not found")]
    DeviceNotFound,
    #[error("timestamp is not valid RFC 3339")]
    InvalidTimestamp,
    #[error("upload time must be a non-negative duration")]
    InvalidStats,
}

/// One upload-performance sample reported by a device.
#[derive(Debug, Clone, Copy)]
pub struct StatsSample {
    pub sent_at: DateTime<Utc>,
    pub upload_time_ns: i64,
}

#[derive(Default)]
struct DeviceTelemetry {
    heartbeats: Vec<DateTime<Utc>>,
    stats: Vec<StatsSample>,
}

/// In-memory home for every registered device's telemetry sequences.
///
/// An entry exists for exactly the rostered devices, created empty at
/// startup; a missing entry is what "device not found" means. Sequences are
/// append-only and trusted to arrive in non-decreasing timestamp order.
/// Callers hold the `AppState` lock for the duration of each call, so every
/// method sees and leaves a consistent pair of sequences.
pub struct TelemetryStore {
    devices: HashMap<String, DeviceTelemetry>,
}

impl TelemetryStore {
    pub fn new(registry: &DeviceRegistry) -> Self {
        let devices = registry
            .iter()
            .map(|id| (id.to_owned(), DeviceTelemetry::default()))
            .collect();
        TelemetryStore { devices }
    }

    /// Appends a heartbeat timestamp for a registered device.
    ///
    /// Validation happens before any mutation: a failed call leaves the
    /// sequence untouched.
    pub fn record_heartbeat(
        &mut self,
        device_id: &str,
        raw_sent_at: &str,
    ) -> Result<(), TelemetryError> {
        let Some(device) = self.devices.get_mut(device_id) else {
            return Err(TelemetryError::DeviceNotFound);
        };
        let sent_at = parse_sent_at(raw_sent_at)?;
        device.heartbeats.push(sent_at);
        Ok(())
    }

    /// Appends an upload-performance sample for a registered device.
    pub fn record_stats(
        &mut self,
        device_id: &str,
        raw_sent_at: &str,
        upload_time_ns: i64,
    ) -> Result<(), TelemetryError> {
        let Some(device) = self.devices.get_mut(device_id) else {
            return Err(TelemetryError::DeviceNotFound);
        };
        let sent_at = parse_sent_at(raw_sent_at)?;
        if upload_time_ns < 0 {
            return Err(TelemetryError::InvalidStats);
        }
        device.stats.push(StatsSample {
            sent_at,
            upload_time_ns,
        });
        Ok(())
    }

    /// Derives the current metrics for a device from a snapshot of both of
    /// its sequences.
    pub fn device_metrics(&self, device_id: &str) -> Result<DeviceMetrics, TelemetryError> {
        let Some(device) = self.devices.get(device_id) else {
            return Err(TelemetryError::DeviceNotFound);
        };
        Ok(DeviceMetrics {
            uptime: metrics::uptime_percent(&device.heartbeats),
            avg_upload_time: metrics::average_upload_time(&device.stats),
        })
    }
}

/// The sole accepted timestamp format is RFC 3339; anything else is an
/// `InvalidTimestamp` for that request.
fn parse_sent_at(raw: &str) -> Result<DateTime<Utc>, TelemetryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| TelemetryError::InvalidTimestamp)
}
