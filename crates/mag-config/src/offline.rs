//! Offline content server configuration.

use serde::{Deserialize, Serialize};

const fn default_port() -> u16 {
    8080
}

const fn default_workers() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OfflineConfig {
    /// Loopback port. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request-handling threads.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            workers: default_workers(),
        }
    }
}
