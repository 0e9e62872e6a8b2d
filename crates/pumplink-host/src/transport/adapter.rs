//! Transport trait for the line-based device link

use async_trait::async_trait;

use super::LinkError;

/// Line-based interface to the device link.
///
/// This trait abstracts the underlying port (a USB serial port, or a
/// scripted mock in tests) behind the two primitives the handshake needs:
/// a blocking line read and a flushed line write.
#[async_trait]
pub trait SerialTransport: Send + Sync {
    /// Read one terminator-delimited line.
    ///
    /// Blocks the calling task until a full line arrives or the link fails;
    /// it never times out on its own. The device's click-driven pacing is
    /// the only liveness mechanism. The returned line excludes the
    /// terminator and any preceding `\r`.
    ///
    /// A `close()` from another task makes a pending read fail promptly
    /// with [`LinkError::Closed`].
    async fn read_line(&self) -> Result<String, LinkError>;

    /// Append the line terminator, write, and flush.
    ///
    /// Callers must not write before the matching field has been marked
    /// editable by a device signal.
    async fn write_line(&self, line: &str) -> Result<(), LinkError>;

    /// Release the port. Idempotent; any later operation fails with
    /// [`LinkError::Closed`].
    fn close(&self);

    /// Whether the link is still open.
    fn is_open(&self) -> bool;
}
