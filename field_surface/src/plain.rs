//! Plain surface: direct value get/set

use sync_types::{Selection, SurfaceId, Tick};

use crate::surface::{EditableSurface, FieldMarker, FlushOutcome, SurfaceKind, WriteOutcome};

/// Wrapper for a simple text input
pub struct PlainSurface {
    id: SurfaceId,
    value: String,
    selection: Selection,
    marker: FieldMarker,
    blurred: bool,
}

impl PlainSurface {
    /// Wraps a plain text input with its current value
    pub fn new(id: SurfaceId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            selection: Selection::default(),
            marker: FieldMarker::Idle,
            blurred: false,
        }
    }

    /// Whether the surface was blurred since wrapping
    pub fn was_blurred(&self) -> bool {
        self.blurred
    }
}

impl EditableSurface for PlainSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Plain
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn marker(&self) -> FieldMarker {
        self.marker
    }

    fn set_marker(&mut self, marker: FieldMarker) {
        self.marker = marker;
    }

    fn blur(&mut self) {
        self.blurred = true;
    }

    fn write(&mut self, text: &str, _now: Tick) -> WriteOutcome {
        if self.value == text {
            return WriteOutcome::Unchanged;
        }
        self.value = text.to_string();
        WriteOutcome::Applied
    }

    fn flush(&mut self, _now: Tick) -> FlushOutcome {
        FlushOutcome::Idle
    }

    fn cancel_pending_write(&mut self) {}

    fn apply_local_edit(&mut self, value: &str, selection: Selection) {
        self.value = value.to_string();
        self.selection = selection;
        self.blurred = false;
    }
}
