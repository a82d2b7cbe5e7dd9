//! # Field Session
//!
//! The state machine pairing one editable surface with one channel to the
//! external editor.
//!
//! ## Philosophy
//!
//! - **Explicit transitions**: Inactive → Connecting → Active, with every
//!   exit path returning to Inactive; no hidden retry loops
//! - **One channel per session**: `Active` implies an open channel,
//!   `Inactive` implies none
//! - **Echoes are consumed in-turn**: the suppression flag is set
//!   immediately before a write's synthetic notification can be observed
//!   and cleared within the same synchronous turn

pub mod session;

pub use session::{
    ActivationOutcome, ApplyOutcome, DeactivationReason, FieldSession, LocalChangeOutcome,
    SessionState,
};
