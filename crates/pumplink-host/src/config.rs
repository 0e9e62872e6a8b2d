//! Link configuration
//!
//! Configuration types for the serial link, deserializable from TOML.

use serde::{Deserialize, Serialize};

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// A real serial port
    Serial(SerialConfig),
    /// Scripted transport for testing
    Mock(MockConfig),
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Mock(MockConfig::default())
    }
}

/// Serial port configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port name (e.g. "/dev/ttyACM0" or "COM3")
    pub port: String,
    /// Baud rate; the PasswordPump talks at 38400
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Internal read poll interval in milliseconds. Bounds how quickly a
    /// pending read notices `close()`; never surfaced as a timeout.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>, baud: u32) -> Self {
        Self {
            port: port.into(),
            baud,
            poll_ms: default_poll_ms(),
        }
    }
}

fn default_baud() -> u32 {
    38400
}

fn default_poll_ms() -> u64 {
    100
}

/// Mock transport configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Signal values queued for the host to read, one per read
    #[serde(default)]
    pub signals: Vec<u8>,
    /// Simulated latency in milliseconds
    #[serde(default)]
    pub latency_ms: u64,
}
