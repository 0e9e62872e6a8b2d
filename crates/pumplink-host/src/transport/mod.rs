//! Transport layer for the device link
//!
//! Adapters for talking to the PasswordPump:
//! - USB serial adapter over the `serialport` crate
//! - Scripted mock adapter for testing
//!
//! plus port enumeration for the operator's port picker.

mod adapter;
pub mod error;
pub mod mock;
pub mod scan;
pub mod serial;

pub use adapter::SerialTransport;
pub use error::{ConnectionError, LinkError};
pub use scan::{available_ports, PortInfo};

use std::sync::Arc;

use crate::config::TransportConfig;

/// Build a transport from configuration.
pub fn open_transport(
    config: &TransportConfig,
) -> Result<Arc<dyn SerialTransport>, ConnectionError> {
    match config {
        TransportConfig::Serial(cfg) => {
            let transport = serial::UsbSerialTransport::open(cfg)?;
            Ok(Arc::new(transport))
        }
        TransportConfig::Mock(cfg) => Ok(Arc::new(mock::MockTransport::new(cfg))),
    }
}
