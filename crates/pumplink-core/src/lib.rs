//! pumplink-core - Protocol model for the PasswordPump credential handshake
//!
//! The PasswordPump drives credential entry from the device side: the
//! operator walks its menus with a rotary encoder, and the device tells the
//! host over the serial link, one decimal line at a time, which credential
//! field it is ready to receive next. This crate holds the pure model of
//! that exchange — the signal vocabulary, the per-step field gate, the
//! canonical operator directions, and the in-progress draft — with no I/O
//! of its own.

pub mod attribute;
pub mod directions;
pub mod draft;
pub mod error;
pub mod gate;

pub use attribute::{signal, AttributeCode};
pub use draft::CredentialDraft;
pub use error::ProtocolError;
pub use gate::{FieldGate, FieldState};
