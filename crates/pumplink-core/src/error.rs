//! Protocol layer errors

use thiserror::Error;

/// Errors produced while interpreting device signals.
///
/// The device protocol defines no recovery path for an out-of-vocabulary
/// signal, so callers treat these as terminal for the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unrecognized signal: {0:?}")]
    UnrecognizedSignal(String),
}
