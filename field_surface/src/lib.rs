//! # Field Surface
//!
//! Normalizes heterogeneous editable page surfaces behind one uniform
//! value/selection capability.
//!
//! ## Philosophy
//!
//! - **Capability polymorphism**: one [`EditableSurface`] trait, three
//!   concrete implementations; the session logic never branches on the
//!   surface kind
//! - **No ambient authority**: an embedded widget is reached only through
//!   the [`WidgetLink`] handed in with the candidate, never looked up
//! - **Deterministic timing**: the debounced widget write path runs on
//!   logical ticks the host advances explicitly
//!
//! ## Classification
//!
//! [`wrap`] inspects a candidate's structure in fixed precedence: a
//! rich-text editing region wraps as [`RichHtmlSurface`]; a known
//! embedded-widget input shim wraps as [`EmbeddedWidgetSurface`]; anything
//! else wraps as [`PlainSurface`].

pub mod debounce;
pub mod plain;
pub mod rich;
pub mod sim;
pub mod surface;
pub mod widget;
pub mod wrap;

pub use debounce::DebouncedWriter;
pub use plain::PlainSurface;
pub use rich::RichHtmlSurface;
pub use sim::SimWidget;
pub use surface::{EditableSurface, FieldMarker, FlushOutcome, SurfaceKind, WriteOutcome};
pub use widget::{EmbeddedWidgetSurface, WidgetError, WidgetLink, WidgetRequest};
pub use wrap::{wrap, CandidateField};
