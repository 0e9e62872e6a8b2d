//! USB serial transport over the `serialport` crate
//!
//! The serialport crate only offers blocking reads with a fixed timeout, so
//! the adapter runs a short-timeout poll loop on the tokio blocking pool:
//! each `TimedOut` is retried, which gives `close()` a window to cut a
//! pending read off within one poll interval. The timeout is never surfaced
//! to callers; `read_line` blocks until a line arrives or the link fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::{LinkError, SerialTransport};
use crate::config::SerialConfig;
use crate::transport::ConnectionError;

pub struct UsbSerialTransport {
    inner: Arc<Inner>,
}

struct Inner {
    port_name: String,
    open: AtomicBool,
    state: Mutex<PortState>,
}

struct PortState {
    port: Option<Box<dyn serialport::SerialPort>>,
    /// Bytes received past the most recent terminator
    carry: Vec<u8>,
}

impl UsbSerialTransport {
    /// Claim the configured port.
    pub fn open(config: &SerialConfig) -> Result<Self, ConnectionError> {
        let port = serialport::new(&config.port, config.baud)
            .timeout(Duration::from_millis(config.poll_ms))
            .open()
            .map_err(|e| map_open_error(&config.port, &e))?;

        info!(port = %config.port, baud = config.baud, "serial port opened");

        Ok(Self {
            inner: Arc::new(Inner {
                port_name: config.port.clone(),
                open: AtomicBool::new(true),
                state: Mutex::new(PortState {
                    port: Some(port),
                    carry: Vec::new(),
                }),
            }),
        })
    }
}

#[async_trait]
impl SerialTransport for UsbSerialTransport {
    async fn read_line(&self) -> Result<String, LinkError> {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || inner.read_line_blocking())
            .await
            .map_err(|e| LinkError::Io(format!("read task failed: {e}")))?
    }

    async fn write_line(&self, line: &str) -> Result<(), LinkError> {
        let inner = self.inner.clone();
        let payload = format!("{line}\n");
        tokio::task::spawn_blocking(move || inner.write_blocking(&payload))
            .await
            .map_err(|e| LinkError::Io(format!("write task failed: {e}")))?
    }

    fn close(&self) {
        if self.inner.open.swap(false, Ordering::SeqCst) {
            self.inner.state.lock().port.take();
            info!(port = %self.inner.port_name, "serial port closed");
        }
    }

    fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }
}

impl Inner {
    fn read_line_blocking(&self) -> Result<String, LinkError> {
        let mut buf = [0u8; 64];
        loop {
            if !self.open.load(Ordering::SeqCst) {
                return Err(LinkError::Closed);
            }

            let mut state = self.state.lock();
            if let Some(line) = take_line(&mut state.carry)? {
                return Ok(line);
            }
            let Some(port) = state.port.as_mut() else {
                return Err(LinkError::Closed);
            };

            match port.read(&mut buf) {
                Ok(0) => return Err(LinkError::Io("link returned end of stream".into())),
                Ok(n) => {
                    state.carry.extend_from_slice(&buf[..n]);
                    if let Some(line) = take_line(&mut state.carry)? {
                        debug!(port = %self.port_name, line = %line, "line received");
                        return Ok(line);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(LinkError::Io(e.to_string())),
            }
        }
    }

    fn write_blocking(&self, payload: &str) -> Result<(), LinkError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(LinkError::Closed);
        }

        let mut state = self.state.lock();
        let port = state.port.as_mut().ok_or(LinkError::Closed)?;
        port.write_all(payload.as_bytes())
            .and_then(|()| port.flush())
            .map_err(|e| LinkError::Io(e.to_string()))?;

        // Field values are credential material; log size only.
        debug!(port = %self.port_name, bytes = payload.len(), "line written");
        Ok(())
    }
}

/// Extract the next terminator-delimited line from the carry buffer,
/// stripping the `\n` and a preceding `\r`.
fn take_line(carry: &mut Vec<u8>) -> Result<Option<String>, LinkError> {
    let Some(pos) = carry.iter().position(|&b| b == b'\n') else {
        return Ok(None);
    };
    let mut raw: Vec<u8> = carry.drain(..=pos).collect();
    raw.pop();
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    String::from_utf8(raw)
        .map(Some)
        .map_err(|e| LinkError::InvalidData(e.to_string()))
}

fn map_open_error(port: &str, err: &serialport::Error) -> ConnectionError {
    use serialport::ErrorKind;

    match err.kind() {
        ErrorKind::NoDevice => ConnectionError::NotFound(port.to_string()),
        ErrorKind::Io(std::io::ErrorKind::NotFound) => ConnectionError::NotFound(port.to_string()),
        ErrorKind::Io(std::io::ErrorKind::PermissionDenied) => ConnectionError::PermissionDenied {
            port: port.to_string(),
            detail: err.to_string(),
        },
        _ if err.to_string().to_lowercase().contains("busy") => ConnectionError::Busy {
            port: port.to_string(),
            detail: err.to_string(),
        },
        _ => ConnectionError::Open {
            port: port.to_string(),
            detail: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_line_waits_for_a_terminator() {
        let mut carry = b"8".to_vec();
        assert_eq!(take_line(&mut carry).unwrap(), None);
        assert_eq!(carry, b"8");
    }

    #[test]
    fn take_line_strips_terminator_and_cr() {
        let mut carry = b"8\r\n5\n".to_vec();
        assert_eq!(take_line(&mut carry).unwrap(), Some("8".to_string()));
        assert_eq!(take_line(&mut carry).unwrap(), Some("5".to_string()));
        assert_eq!(take_line(&mut carry).unwrap(), None);
        assert!(carry.is_empty());
    }

    #[test]
    fn take_line_keeps_bytes_past_the_terminator() {
        let mut carry = b"6\n4".to_vec();
        assert_eq!(take_line(&mut carry).unwrap(), Some("6".to_string()));
        assert_eq!(carry, b"4");
    }

    #[test]
    fn take_line_rejects_undecodable_bytes() {
        let mut carry = vec![0xFF, 0xFE, b'\n'];
        assert!(matches!(
            take_line(&mut carry),
            Err(LinkError::InvalidData(_))
        ));
    }

    #[test]
    fn open_error_mapping_distinguishes_missing_ports() {
        let err = serialport::Error::new(serialport::ErrorKind::NoDevice, "gone");
        assert_eq!(
            map_open_error("COM3", &err),
            ConnectionError::NotFound("COM3".to_string())
        );
    }
}
