//! Pure derivations over a device's stored sequences.
//!
//! Nothing in here holds state or fails; degenerate inputs produce the
//! documented sentinel outputs. Metrics are recomputed from scratch on every
//! read; nothing is cached.

use chrono::{DateTime, Utc};

use crate::store::StatsSample;

/// Derived metrics returned to the operator for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMetrics {
    pub uptime: f64,
    pub avg_upload_time: String,
}

/// Heartbeat count divided by the fractional-minute span between the first
/// and last heartbeat, times 100.
///
/// Returns 0 for an empty history and for a zero-width span (a single
/// heartbeat, or several at the same instant), never NaN or infinity. Values
/// above 100 are possible when a device beats more than once a minute and
/// are reported as-is.
pub fn uptime_percent(heartbeats: &[DateTime<Utc>]) -> f64 {
    let (Some(first), Some(last)) = (heartbeats.first(), heartbeats.last()) else {
        return 0.0;
    };
    let span_minutes = (*last - *first).num_milliseconds() as f64 / 60_000.0;
    if span_minutes == 0.0 {
        return 0.0;
    }
    heartbeats.len() as f64 / span_minutes * 100.0
}

/// Mean upload duration rendered as a human-readable span, e.g. "2s" or
/// "1m 30s".
///
/// Durations are accumulated in floating-point seconds so sub-second samples
/// survive the averaging, then the mean is converted back to nanoseconds for
/// rendering. An empty history yields the empty string, a "no data" sentinel
/// the caller must not confuse with "0s".
pub fn average_upload_time(stats: &[StatsSample]) -> String {
    if stats.is_empty() {
        return String::new();
    }
    let total_secs: f64 = stats.iter().map(|s| s.upload_time_ns as f64 / 1e9).sum();
    let avg_secs = total_secs / stats.len() as f64;
    let avg = std::time::Duration::from_nanos((avg_secs * 1e9).round() as u64);
    humantime::format_duration(avg).to_string()
}
