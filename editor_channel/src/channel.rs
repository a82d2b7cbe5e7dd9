//! Transport seam between sessions and the external editor

use thiserror::Error;

use crate::message::EditFrame;

/// Channel failures surfaced to the owning session
///
/// Every variant drives the session to Inactive; the core never retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("connection failed: {reason}")]
    ConnectFailed { reason: String },

    #[error("send failed: {reason}")]
    SendFailed { reason: String },

    #[error("channel already closed")]
    Closed,
}

/// One open duplex connection to the external editor
///
/// Outbound frames go through [`send`](EditorChannel::send); inbound
/// traffic is delivered by the host as classified
/// [`ChannelEvent`](crate::ChannelEvent)s, because the transport owns its
/// own read loop.
pub trait EditorChannel {
    /// Transmits one outbound frame
    fn send(&mut self, frame: &EditFrame) -> Result<(), ChannelError>;

    /// Closes the connection; safe to call more than once
    fn close(&mut self);
}

/// Opens channels on demand
///
/// Reconnect and backoff policy, if any, lives behind this trait, not in
/// the session.
pub trait ChannelConnector {
    /// Opens a fresh channel to the external editor
    fn connect(&mut self) -> Result<Box<dyn EditorChannel>, ChannelError>;
}
