//! Service configuration read from the environment.

use std::env;
use std::path::PathBuf;

pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Roster file listing the known device ids.
    pub devices_path: PathBuf,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        ServiceConfig {
            bind_addr: env::var("FLEETBEAT_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            devices_path: env::var("FLEETBEAT_DEVICES")
                .unwrap_or_else(|_| "devices.csv".to_owned())
                .into(),
        }
    }
}
