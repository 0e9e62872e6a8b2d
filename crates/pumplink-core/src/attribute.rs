//! Device signal vocabulary
//!
//! The PasswordPump announces which credential field it is ready to receive
//! as a single decimal integer on its own line. The integer values are fixed
//! by the device firmware and must match it bit for bit.

use std::fmt;

use crate::error::ProtocolError;

/// Wire values for the device's field-announcement signals
pub mod signal {
    /// Device is ready to receive the account name
    pub const ACCOUNT: u8 = 8;
    /// Device is ready to receive the username
    pub const USERNAME: u8 = 5;
    /// Device is ready to receive the password
    pub const PASSWORD: u8 = 6;
    /// Device is ready to receive the entry style
    pub const STYLE: u8 = 4;
}

/// One device-to-host signal, identifying a credential field.
///
/// Each value maps 1:1 to exactly one field, so the same enum keys the
/// field gate, the draft, and host submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCode {
    Account,
    Username,
    Password,
    Style,
}

impl AttributeCode {
    /// All codes, in the order the device announces them during Add Account.
    pub const ALL: [AttributeCode; 4] = [
        AttributeCode::Account,
        AttributeCode::Username,
        AttributeCode::Password,
        AttributeCode::Style,
    ];

    /// Decode one received line into a signal.
    ///
    /// The line must already be stripped of its terminator; surrounding
    /// whitespace (including a stray `\r`) is tolerated. Anything that is
    /// not one of the device's four signal integers is an unrecognized
    /// signal.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let trimmed = line.trim();
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(Self::from_signal)
            .ok_or_else(|| ProtocolError::UnrecognizedSignal(trimmed.to_string()))
    }

    /// Map a wire value to its code, if it is in the vocabulary.
    pub fn from_signal(value: u8) -> Option<Self> {
        match value {
            signal::ACCOUNT => Some(Self::Account),
            signal::USERNAME => Some(Self::Username),
            signal::PASSWORD => Some(Self::Password),
            signal::STYLE => Some(Self::Style),
            _ => None,
        }
    }

    /// The wire value for this code.
    pub fn code(&self) -> u8 {
        match self {
            Self::Account => signal::ACCOUNT,
            Self::Username => signal::USERNAME,
            Self::Password => signal::PASSWORD,
            Self::Style => signal::STYLE,
        }
    }

    /// Lowercase field name, used in logs and prompts (never for values).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Username => "username",
            Self::Password => "password",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_maps_the_four_firmware_values() {
        assert_eq!(AttributeCode::decode("8"), Ok(AttributeCode::Account));
        assert_eq!(AttributeCode::decode("5"), Ok(AttributeCode::Username));
        assert_eq!(AttributeCode::decode("6"), Ok(AttributeCode::Password));
        assert_eq!(AttributeCode::decode("4"), Ok(AttributeCode::Style));
    }

    #[test]
    fn decode_rejects_everything_else() {
        for line in ["7", "99", "0", "-5", "", "abc", "8.5", "48879", "8 5"] {
            assert!(
                AttributeCode::decode(line).is_err(),
                "line {line:?} must not decode"
            );
        }
    }

    #[test]
    fn decode_trims_whitespace_and_carriage_returns() {
        assert_eq!(AttributeCode::decode("  8 \r"), Ok(AttributeCode::Account));
        assert_eq!(AttributeCode::decode("\t4\t"), Ok(AttributeCode::Style));
    }

    #[test]
    fn decode_error_carries_the_offending_line() {
        let err = AttributeCode::decode(" 99 ").unwrap_err();
        assert_eq!(err, ProtocolError::UnrecognizedSignal("99".to_string()));
    }

    #[test]
    fn wire_values_round_trip() {
        for code in AttributeCode::ALL {
            assert_eq!(AttributeCode::from_signal(code.code()), Some(code));
        }
    }
}
