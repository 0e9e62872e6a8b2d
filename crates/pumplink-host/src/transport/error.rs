//! Transport layer errors

use thiserror::Error;

/// Failure to claim a port. Reported to the caller of `open`; the session
/// never starts, and the operator may retry with a different port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Port {0} not found")]
    NotFound(String),

    #[error("Port {port} is busy: {detail}")]
    Busy { port: String, detail: String },

    #[error("Permission denied opening {port}: {detail}")]
    PermissionDenied { port: String, detail: String },

    #[error("Failed to open {port}: {detail}")]
    Open { port: String, detail: String },

    #[error("Port scan failed: {0}")]
    Scan(String),
}

/// Failure on an established link. Fatal to the session; there is no
/// automatic reconnect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The link was closed, either before the call or while a read was
    /// pending.
    #[error("Link closed")]
    Closed,

    #[error("Link I/O failed: {0}")]
    Io(String),

    /// Bytes that cannot be decoded as text arrived before a terminator.
    #[error("Undecodable bytes on link: {0}")]
    InvalidData(String),
}
