//! # Sync Types
//!
//! Shared types for the field synchronization core.
//!
//! ## Philosophy
//!
//! - **Typed identities**: surfaces and sessions are identified by opaque
//!   ids, never by raw pointers or strings
//! - **Deterministic time**: all timing is logical ticks advanced explicitly
//!   by the host, never a wall clock
//! - **Explicit collaborators**: status and notification sinks are traits
//!   handed in at construction, not ambient singletons

pub mod clock;
pub mod config;
pub mod ids;
pub mod location;
pub mod report;
pub mod selection;

pub use clock::{LogicalClock, Tick};
pub use config::SyncConfig;
pub use ids::{SessionId, SurfaceId};
pub use location::{PageLocation, PageMeta};
pub use report::{
    notice_display_ticks, Notifier, RecordedNotice, RecordingNotifier, RecordingStatus, Severity,
    StatusSink,
};
pub use selection::Selection;
