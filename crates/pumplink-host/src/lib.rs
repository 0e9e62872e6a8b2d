//! pumplink-host - Host-side link driver for the PasswordPump
//!
//! This crate owns everything that touches the wire: the line-based serial
//! transport (and its scripted test double), port scanning, and the
//! credential session that drives the device's read/enable/submit/write
//! cycle. The pure protocol model lives in `pumplink-core`.

pub mod config;
pub mod session;
pub mod transport;

pub use config::{MockConfig, SerialConfig, TransportConfig};
pub use session::{CredentialSession, SessionError, SessionEvent, SessionState};
pub use transport::{ConnectionError, LinkError, SerialTransport};
