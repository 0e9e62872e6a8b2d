//! Per-step field gating
//!
//! A gate is the derived editable/locked view of the four credential fields
//! for exactly one handshake step. It is a pure function of the most recent
//! device signal: the device re-announces the active field after every
//! physical navigation step, so each decoded signal fully replaces whatever
//! gate preceded it.

use crate::attribute::AttributeCode;
use crate::directions;

/// Whether a field currently accepts operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Editable,
    Locked,
}

/// Editable/locked state of all fields plus the directions for the current
/// step. At most one field is editable; none before the device has signaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGate {
    active: Option<AttributeCode>,
    instructions: &'static str,
}

impl FieldGate {
    /// The gate before any port has been opened.
    ///
    /// For front-ends with an explicit port-picking step (the device's
    /// original companion window); flows that open immediately, like the
    /// shipped CLI, never show it.
    pub fn startup() -> Self {
        Self {
            active: None,
            instructions: directions::SELECT_PORT,
        }
    }

    /// The gate right after a successful open, before the first signal.
    /// All fields stay locked until the device confirms what it wants.
    pub fn port_opened() -> Self {
        Self {
            active: None,
            instructions: directions::PORT_OPENED,
        }
    }

    /// Compute the gate for a received device signal.
    pub fn for_signal(code: AttributeCode) -> Self {
        Self {
            active: Some(code),
            instructions: directions::for_signal(code),
        }
    }

    /// The field the device is ready to receive, if any.
    pub fn active(&self) -> Option<AttributeCode> {
        self.active
    }

    /// The operator directions for this step.
    pub fn instructions(&self) -> &'static str {
        self.instructions
    }

    /// The state of one field under this gate.
    pub fn state_of(&self, field: AttributeCode) -> FieldState {
        if self.active == Some(field) {
            FieldState::Editable
        } else {
            FieldState::Locked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_field_editable_per_signal() {
        for code in AttributeCode::ALL {
            let gate = FieldGate::for_signal(code);
            let editable: Vec<AttributeCode> = AttributeCode::ALL
                .into_iter()
                .filter(|&f| gate.state_of(f) == FieldState::Editable)
                .collect();
            assert_eq!(editable, vec![code]);
        }
    }

    #[test]
    fn pre_signal_gates_lock_everything() {
        for gate in [FieldGate::startup(), FieldGate::port_opened()] {
            assert_eq!(gate.active(), None);
            for field in AttributeCode::ALL {
                assert_eq!(gate.state_of(field), FieldState::Locked);
            }
        }
    }

    #[test]
    fn gate_carries_the_signal_directions() {
        let gate = FieldGate::for_signal(AttributeCode::Account);
        assert_eq!(gate.instructions(), directions::ACCOUNT);
        assert_eq!(FieldGate::startup().instructions(), directions::SELECT_PORT);
        assert_eq!(
            FieldGate::port_opened().instructions(),
            directions::PORT_OPENED
        );
    }

    #[test]
    fn a_new_signal_fully_replaces_the_gate() {
        let first = FieldGate::for_signal(AttributeCode::Account);
        let second = FieldGate::for_signal(AttributeCode::Username);
        assert_eq!(second.state_of(AttributeCode::Account), FieldState::Locked);
        assert_eq!(
            second.state_of(AttributeCode::Username),
            FieldState::Editable
        );
        assert_ne!(first, second);
    }
}
