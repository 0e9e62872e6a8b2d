//! Canonical operator directions
//!
//! These texts are shown to the operator one handshake step at a time. The
//! wording is fixed; UI layers display it verbatim.

use crate::attribute::AttributeCode;

/// Shown before a port has been opened.
pub const SELECT_PORT: &str =
    "After selecting the port click on the Open Port button to open the port.";

/// Shown immediately after a successful open, before the device's first
/// signal. The device is expected to announce the account field next, so
/// these directions get the operator started on the device side.
pub const PORT_OPENED: &str = "On the PasswordPump navigate to Add Account and short click. \
    Then short click on Account Name, enter the account name in the Account Name text box \
    above, and hit return or click on Submit.";

/// Shown while the account name field is active.
pub const ACCOUNT: &str = "On the PasswordPump long click to accept the entered account name, \
    then short click on Edit Username, then enter the username in the text box above. Then hit \
    return or click on Submit.";

/// Shown while the username field is active.
pub const USERNAME: &str = "On the PasswordPump long click to accept the entered user name, \
    then short click on Edit Password, then enter the password in the text box above. Then hit \
    return or click on Submit.";

/// Shown while the password field is active.
pub const PASSWORD: &str = "On the PasswordPump long click to accept the entered password, \
    then short click on Indicate Style, then enter the style in the text box above. Style \
    controls whether or not a carriage return or a tab is sent between the sending of the \
    username and the password. Enter 0 for carriage return, 1 for tab between username and \
    password when both are sent. Then hit return or click on Submit. The style can also be \
    entered via the rotary encoder; turn the encoder to select 0 or 1, then short click and \
    then long click.";

/// Shown while the style field is active.
pub const STYLE: &str = "On the PasswordPump long click to accept the entered style. On the \
    PasswordPump long click to finish entering the credentials, then close this application \
    by clicking on Exit.";

/// The directions for a given device signal.
pub fn for_signal(code: AttributeCode) -> &'static str {
    match code {
        AttributeCode::Account => ACCOUNT,
        AttributeCode::Username => USERNAME,
        AttributeCode::Password => PASSWORD,
        AttributeCode::Style => STYLE,
    }
}
