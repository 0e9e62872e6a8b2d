//! Scripted transport for testing
//!
//! Feeds the host a queue of device signals, one per read, and records every
//! line the host writes. Reads block until a line is available, matching the
//! real device's click-driven pacing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex, Notify};
use tracing::debug;

use super::{LinkError, SerialTransport};
use crate::config::MockConfig;

pub struct MockTransport {
    latency: Duration,
    open: AtomicBool,
    broken: AtomicBool,
    incoming_tx: mpsc::UnboundedSender<String>,
    incoming: Mutex<mpsc::UnboundedReceiver<String>>,
    written: parking_lot::Mutex<Vec<String>>,
    interrupt: Notify,
}

impl MockTransport {
    pub fn new(config: &MockConfig) -> Self {
        let (incoming_tx, incoming) = mpsc::unbounded_channel();
        for signal in &config.signals {
            let _ = incoming_tx.send(signal.to_string());
        }
        Self {
            latency: Duration::from_millis(config.latency_ms),
            open: AtomicBool::new(true),
            broken: AtomicBool::new(false),
            incoming_tx,
            incoming: Mutex::new(incoming),
            written: parking_lot::Mutex::new(Vec::new()),
            interrupt: Notify::new(),
        }
    }

    /// Queue a device signal for the next read.
    pub fn push_signal(&self, signal: u8) {
        self.push_line(signal.to_string());
    }

    /// Queue a raw line for the next read.
    pub fn push_line(&self, line: impl Into<String>) {
        let _ = self.incoming_tx.send(line.into());
    }

    /// Lines written by the host so far, terminators stripped.
    pub fn written_lines(&self) -> Vec<String> {
        self.written.lock().clone()
    }

    /// Simulate a physical disconnect: subsequent (and pending) operations
    /// fail with an I/O error.
    pub fn break_link(&self) {
        self.broken.store(true, Ordering::SeqCst);
        self.interrupt.notify_one();
    }

    fn check_link(&self) -> Result<(), LinkError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(LinkError::Closed);
        }
        if self.broken.load(Ordering::SeqCst) {
            return Err(LinkError::Io("link broken".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SerialTransport for MockTransport {
    async fn read_line(&self) -> Result<String, LinkError> {
        let mut incoming = self.incoming.lock().await;
        loop {
            self.check_link()?;
            tokio::select! {
                line = incoming.recv() => {
                    let line = line.ok_or(LinkError::Closed)?;
                    if self.latency > Duration::ZERO {
                        tokio::time::sleep(self.latency).await;
                    }
                    debug!(line = %line, "mock line received");
                    return Ok(line);
                }
                // notify_one leaves a permit behind, so a close that lands
                // before this select registers still wakes it
                _ = self.interrupt.notified() => {}
            }
        }
    }

    async fn write_line(&self, line: &str) -> Result<(), LinkError> {
        self.check_link()?;
        if self.latency > Duration::ZERO {
            tokio::time::sleep(self.latency).await;
        }
        self.written.lock().push(line.to_string());
        debug!(bytes = line.len() + 1, "mock line written");
        Ok(())
    }

    fn close(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            self.interrupt.notify_one();
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_signals_are_consumed_in_order() {
        let mock = MockTransport::new(&MockConfig {
            signals: vec![8, 5],
            latency_ms: 0,
        });
        assert_eq!(mock.read_line().await.unwrap(), "8");
        assert_eq!(mock.read_line().await.unwrap(), "5");
    }

    #[tokio::test]
    async fn read_blocks_until_a_signal_is_pushed() {
        let mock = MockTransport::new(&MockConfig::default());
        let pending =
            tokio::time::timeout(Duration::from_millis(20), mock.read_line()).await;
        assert!(pending.is_err(), "read must block with no signal queued");

        mock.push_signal(6);
        assert_eq!(mock.read_line().await.unwrap(), "6");
    }

    #[tokio::test]
    async fn close_unblocks_a_pending_read() {
        let mock = std::sync::Arc::new(MockTransport::new(&MockConfig::default()));
        let reader = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.read_line().await })
        };
        tokio::task::yield_now().await;
        mock.close();

        let result = tokio::time::timeout(Duration::from_millis(200), reader)
            .await
            .expect("pending read must resolve promptly after close")
            .unwrap();
        assert_eq!(result, Err(LinkError::Closed));
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mock = MockTransport::new(&MockConfig::default());
        mock.close();
        mock.close();
        assert!(!mock.is_open());
        assert_eq!(mock.write_line("x").await, Err(LinkError::Closed));
    }

    #[tokio::test]
    async fn writes_are_recorded() {
        let mock = MockTransport::new(&MockConfig::default());
        mock.write_line("Acme").await.unwrap();
        mock.write_line("alice").await.unwrap();
        assert_eq!(mock.written_lines(), vec!["Acme", "alice"]);
    }

    #[tokio::test]
    async fn broken_link_fails_reads_and_writes() {
        let mock = MockTransport::new(&MockConfig::default());
        mock.break_link();
        assert!(matches!(mock.read_line().await, Err(LinkError::Io(_))));
        assert!(matches!(mock.write_line("x").await, Err(LinkError::Io(_))));
    }
}
