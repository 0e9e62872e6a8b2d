//! Credential session management
//!
//! One session drives one end-to-end credential entry: open the port, then
//! repeat the device's read/enable/submit/write cycle until the operator
//! exits. Gate updates and terminal failures reach the UI layer over a
//! single-consumer event channel.

mod manager;

pub use manager::{CredentialSession, SessionError};

use pumplink_core::{AttributeCode, FieldGate};

/// Session lifecycle state
///
/// The pre-open condition has no variant here: opening the transport is
/// what creates a session, so "unopened" is the absence of a session value
/// (a failed `open` leaves the caller exactly there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Blocked on the device's next field announcement
    AwaitingSignal,
    /// The device is ready to receive this field
    FieldActive(AttributeCode),
    /// Terminal; the transport has been released
    Closed,
}

/// Event delivered to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new gate took effect; the previous one is void
    Gate(FieldGate),
    /// Terminal failure; the session has closed the transport
    Failed(SessionError),
    /// Deliberate close completed
    Closed,
}
