//! Rich surface: value is the serialized inner markup

use sync_types::{Selection, SurfaceId, Tick};

use crate::surface::{EditableSurface, FieldMarker, FlushOutcome, SurfaceKind, WriteOutcome};

/// Wrapper for a content-editable region
///
/// Reads and writes go through the region's serialized markup, so the
/// session always sees markup, never a DOM tree. The site's transform pair
/// is responsible for converting that markup at the channel boundary.
pub struct RichHtmlSurface {
    id: SurfaceId,
    markup: String,
    selection: Selection,
    marker: FieldMarker,
    blurred: bool,
}

impl RichHtmlSurface {
    /// Wraps a content-editable region with its current serialized markup
    pub fn new(id: SurfaceId, markup: impl Into<String>) -> Self {
        Self {
            id,
            markup: markup.into(),
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

impl EditableSurface for RichHtmlSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::RichHtml
    }

    fn value(&self) -> String {
        self.markup.clone()
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
        if self.markup == text {
            return WriteOutcome::Unchanged;
        }
        self.markup = text.to_string();
        WriteOutcome::Applied
    }

    fn flush(&mut self, _now: Tick) -> FlushOutcome {
        FlushOutcome::Idle
    }

    fn cancel_pending_write(&mut self) {}

    fn apply_local_edit(&mut self, value: &str, selection: Selection) {
        self.markup = value.to_string();
        self.selection = selection;
        self.blurred = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_serialized_markup() {
        let surface = RichHtmlSurface::new(SurfaceId::new(), "<p>hello</p>");
        assert_eq!(surface.kind(), SurfaceKind::RichHtml);
        assert_eq!(surface.value(), "<p>hello</p>");
    }

    #[test]
    fn test_write_replaces_markup() {
        let mut surface = RichHtmlSurface::new(SurfaceId::new(), "<p>a</p>");
        assert_eq!(surface.write("<p>b</p>", 0), WriteOutcome::Applied);
        assert_eq!(surface.value(), "<p>b</p>");
        assert_eq!(surface.write("<p>b</p>", 0), WriteOutcome::Unchanged);
    }
}
