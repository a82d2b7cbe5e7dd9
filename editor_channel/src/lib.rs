//! # Editor Channel
//!
//! Message schema and transport seam between a field session and the
//! external editor process.
//!
//! ## Philosophy
//!
//! - **Messages, not shared state**: both sides exchange whole-value frames
//! - **Typed, not stringly-typed**: frames are serde structs with a frozen
//!   wire shape, guarded by contract tests
//! - **Transport is a collaborator**: connecting, reconnecting and
//!   handshake mechanics live behind [`ChannelConnector`]; the core only
//!   sends frames and reacts to classified inbound events
//!
//! ## Wire shapes
//!
//! Outbound: `{ title, url, syntax, text, selections: [{start, end}] }`.
//! Inbound: `{ message: {...} }`, `{ close: true }` or `{ ready: true }`.

pub mod channel;
pub mod message;
pub mod sim;

pub use channel::{ChannelConnector, ChannelError, EditorChannel};
pub use message::{ChannelEvent, EditFrame, InboundFrame, ProtocolError, RemoteEdit};
pub use sim::{SimChannel, SimChannelProbe, SimConnector};
