//! In-progress credential draft

use crate::attribute::AttributeCode;

/// The credential values collected so far in one session.
///
/// Starts empty; each field is recorded the moment its submission is
/// accepted. The draft lives and dies with the session and is never
/// persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDraft {
    account: Option<String>,
    username: Option<String>,
    password: Option<String>,
    style: Option<String>,
}

impl CredentialDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted value for a field.
    ///
    /// The style value is stored as free text; the device, not the host,
    /// is the authority on acceptable style encodings.
    pub fn record(&mut self, field: AttributeCode, value: impl Into<String>) {
        let slot = match field {
            AttributeCode::Account => &mut self.account,
            AttributeCode::Username => &mut self.username,
            AttributeCode::Password => &mut self.password,
            AttributeCode::Style => &mut self.style,
        };
        *slot = Some(value.into());
    }

    pub fn get(&self, field: AttributeCode) -> Option<&str> {
        match field {
            AttributeCode::Account => self.account.as_deref(),
            AttributeCode::Username => self.username.as_deref(),
            AttributeCode::Password => self.password.as_deref(),
            AttributeCode::Style => self.style.as_deref(),
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// True once all four fields have been recorded.
    pub fn is_complete(&self) -> bool {
        AttributeCode::ALL.iter().all(|&f| self.get(f).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_empty() {
        let draft = CredentialDraft::new();
        for field in AttributeCode::ALL {
            assert_eq!(draft.get(field), None);
        }
        assert!(!draft.is_complete());
    }

    #[test]
    fn records_each_field_independently() {
        let mut draft = CredentialDraft::new();
        draft.record(AttributeCode::Account, "MyBank");
        assert_eq!(draft.account(), Some("MyBank"));
        assert_eq!(draft.username(), None);
        assert!(!draft.is_complete());

        draft.record(AttributeCode::Username, "alice");
        draft.record(AttributeCode::Password, "s3cr3t");
        draft.record(AttributeCode::Style, "0");
        assert!(draft.is_complete());
        assert_eq!(draft.get(AttributeCode::Password), Some("s3cr3t"));
        assert_eq!(draft.style(), Some("0"));
    }

    #[test]
    fn style_is_free_text() {
        let mut draft = CredentialDraft::new();
        draft.record(AttributeCode::Style, "tab please");
        assert_eq!(draft.style(), Some("tab please"));
    }
}
