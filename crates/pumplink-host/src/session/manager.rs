//! Credential session orchestrator

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use pumplink_core::{AttributeCode, CredentialDraft, FieldGate, ProtocolError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::{SessionEvent, SessionState};
use crate::config::TransportConfig;
use crate::transport::{open_transport, ConnectionError, LinkError, SerialTransport};

/// Drives one credential-entry interaction with the device.
///
/// The session exclusively owns its transport and draft. Exactly one read is
/// outstanding at a time: a signal-wait task is spawned after open and after
/// every accepted submission, so reads and writes strictly alternate.
pub struct CredentialSession {
    shared: Arc<Shared>,
    signal_wait: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    transport: Arc<dyn SerialTransport>,
    state: RwLock<SessionState>,
    draft: RwLock<CredentialDraft>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl CredentialSession {
    /// Open the configured transport and start the session.
    ///
    /// On [`ConnectionError`] no session is created and the caller may retry
    /// with a different port. Must be called from within a tokio runtime.
    pub fn open(
        config: &TransportConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>), SessionError> {
        let transport = open_transport(config)?;
        Ok(Self::start(transport))
    }

    /// Start a session over an already-open transport.
    pub fn start(
        transport: Arc<dyn SerialTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, event_rx) = mpsc::unbounded_channel();
        let session = Self {
            shared: Arc::new(Shared {
                transport,
                state: RwLock::new(SessionState::AwaitingSignal),
                draft: RwLock::new(CredentialDraft::new()),
                events,
            }),
            signal_wait: Mutex::new(None),
        };

        info!("credential session started");
        // Shown optimistically; fields stay locked until the device's first
        // signal confirms what it wants.
        session
            .shared
            .emit(SessionEvent::Gate(FieldGate::port_opened()));
        session.spawn_signal_wait();
        (session, event_rx)
    }

    /// Submit the value for the currently active field.
    ///
    /// Writes the value to the device, records it into the draft, and
    /// re-enters the signal wait. Submitting any field other than the active
    /// one is a caller contract violation: it fails synchronously and the
    /// draft is untouched.
    pub async fn submit(&self, field: AttributeCode, value: &str) -> Result<(), SessionError> {
        {
            let state = self.shared.state.read();
            match *state {
                SessionState::FieldActive(active) if active == field => {}
                SessionState::FieldActive(active) => {
                    return Err(SessionError::FieldNotActive {
                        submitted: field,
                        active: Some(active),
                    });
                }
                SessionState::AwaitingSignal => {
                    return Err(SessionError::FieldNotActive {
                        submitted: field,
                        active: None,
                    });
                }
                SessionState::Closed => return Err(SessionError::Closed),
            }
        }

        if let Err(err) = self.shared.transport.write_line(value).await {
            let err = SessionError::from(err);
            self.shared.fail(err.clone());
            return Err(err);
        }

        self.shared.draft.write().record(field, value);
        info!(field = %field, bytes = value.len(), "field submitted");

        {
            let mut state = self.shared.state.write();
            // close() may have landed while the write was in flight; the
            // value reached the device, but Closed stays terminal
            if *state == SessionState::Closed {
                return Ok(());
            }
            *state = SessionState::AwaitingSignal;
        }
        self.spawn_signal_wait();
        Ok(())
    }

    /// Close the session. Idempotent; releases the transport and aborts any
    /// pending read promptly.
    pub fn close(&self) {
        // Transport release and the Closed event happen under the state
        // lock, so no gate or failure can be emitted after Closed.
        let mut state = self.shared.state.write();
        if *state == SessionState::Closed {
            return;
        }
        *state = SessionState::Closed;
        self.shared.transport.close();
        info!("credential session closed");
        self.shared.emit(SessionEvent::Closed);
    }

    pub fn state(&self) -> SessionState {
        *self.shared.state.read()
    }

    /// The field the device is currently ready to receive, if any.
    pub fn active_field(&self) -> Option<AttributeCode> {
        match self.state() {
            SessionState::FieldActive(code) => Some(code),
            _ => None,
        }
    }

    /// Snapshot of the values collected so far.
    pub fn draft(&self) -> CredentialDraft {
        self.shared.draft.read().clone()
    }

    fn spawn_signal_wait(&self) {
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move { shared.await_signal().await });
        *self.signal_wait.lock() = Some(handle);
    }
}

impl Shared {
    /// One read/decode/gate step. Runs as its own task so the blocking read
    /// never stalls the caller.
    async fn await_signal(self: Arc<Self>) {
        let line = match self.transport.read_line().await {
            Ok(line) => line,
            Err(err) => {
                // A read cut off by our own close() is not a failure.
                if *self.state.read() == SessionState::Closed {
                    debug!("pending read ended after close");
                } else {
                    self.fail(err.into());
                }
                return;
            }
        };

        match AttributeCode::decode(&line) {
            Ok(code) => {
                let mut state = self.state.write();
                // A line buffered just before close() must not resurrect
                // the session; Closed is terminal.
                if *state == SessionState::Closed {
                    debug!(field = %code, "signal after close discarded");
                    return;
                }
                *state = SessionState::FieldActive(code);
                info!(field = %code, "device signaled field");
                self.emit(SessionEvent::Gate(FieldGate::for_signal(code)));
            }
            // No recovery path for an out-of-vocabulary signal; close
            // before reporting so no write can follow it.
            Err(err) => self.fail(err.into()),
        }
    }

    fn fail(&self, err: SessionError) {
        let mut state = self.state.write();
        // A failure observed after a deliberate close is not reported.
        if *state == SessionState::Closed {
            debug!(%err, "failure after close ignored");
            return;
        }
        *state = SessionState::Closed;
        error!(%err, "session failed");
        self.transport.close();
        self.emit(SessionEvent::Failed(err));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for CredentialSession {
    fn drop(&mut self) {
        if let Some(handle) = self.signal_wait.get_mut().take() {
            handle.abort();
        }
    }
}

/// Session operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Link failed: {0}")]
    Link(#[from] LinkError),

    #[error("Protocol failure: {0}")]
    Protocol(#[from] ProtocolError),

    /// Caller submitted a field the device is not ready for.
    #[error("Field {} is not active (active: {})", .submitted, display_active(.active))]
    FieldNotActive {
        submitted: AttributeCode,
        active: Option<AttributeCode>,
    },

    #[error("Session closed")]
    Closed,
}

fn display_active(active: &Option<AttributeCode>) -> &'static str {
    active.map(|code| code.label()).unwrap_or("none")
}
