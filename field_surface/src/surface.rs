//! The uniform surface capability

use serde::{Deserialize, Serialize};
use std::fmt;
use sync_types::{Selection, SurfaceId, Tick};

use crate::widget::WidgetError;

/// Which concrete wrapper a candidate was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Direct value get/set
    Plain,
    /// Value is the serialized inner markup
    RichHtml,
    /// Value lives inside an embedded widget behind a request/response link
    EmbeddedWidget,
}

/// Observable marker attribute used for styling and status
///
/// Follows the session lifecycle: `Loading` while the channel connects,
/// `Enabled` once the session is live, `Idle` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldMarker {
    Idle,
    Loading,
    Enabled,
}

impl fmt::Display for FieldMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMarker::Idle => write!(f, "idle"),
            FieldMarker::Loading => write!(f, "loading"),
            FieldMarker::Enabled => write!(f, "enabled"),
        }
    }
}

/// Outcome of a write request against a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Value stored immediately; a change notification was synthesized
    /// within this turn
    Applied,
    /// Coalesced into the debounced write path; dispatch happens on a
    /// later flush
    Scheduled,
    /// New value equals the known value; nothing was dispatched
    Unchanged,
}

/// Outcome of draining the debounced write path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No write was due
    Idle,
    /// The latest pending value was dispatched, synthesizing a change
    /// notification the widget's own internals can observe
    Dispatched,
    /// The widget internals rejected the synthetic dispatch
    Failed(WidgetError),
}

/// One editable page surface behind a uniform capability
///
/// A surface is owned by exactly one session for its lifetime and is never
/// copied. All mutation is driven from the single event-loop thread.
pub trait EditableSurface {
    /// Identity of the underlying element
    fn id(&self) -> SurfaceId;

    /// The wrapper classification
    fn kind(&self) -> SurfaceKind;

    /// Whether the wrapper finished initializing
    ///
    /// Plain and rich surfaces are ready immediately; an embedded widget is
    /// ready once its first value reply arrived.
    fn is_ready(&self) -> bool {
        true
    }

    /// Current text value
    fn value(&self) -> String;

    /// Current selection range
    fn selection(&self) -> Selection;

    /// Applies a selection range
    fn set_selection(&mut self, selection: Selection);

    /// Current marker attribute
    fn marker(&self) -> FieldMarker;

    /// Updates the marker attribute
    fn set_marker(&mut self, marker: FieldMarker);

    /// Removes focus from the surface
    fn blur(&mut self);

    /// Requests a write of `text`
    fn write(&mut self, text: &str, now: Tick) -> WriteOutcome;

    /// Drains the debounced write path if a dispatch is due
    fn flush(&mut self, now: Tick) -> FlushOutcome;

    /// Drops any pending debounced write
    fn cancel_pending_write(&mut self);

    /// Whether a debounced write is waiting for its quiet period
    fn has_pending_write(&self) -> bool {
        false
    }

    /// Records a user edit observed by the host
    fn apply_local_edit(&mut self, value: &str, selection: Selection);

    /// Delivers a value event from an embedded widget
    ///
    /// No-op for surfaces without a widget.
    fn deliver_widget_value(&mut self, _value: &str) {}
}
