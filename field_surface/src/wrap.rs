//! Candidate classification
//!
//! Given a candidate element's structural facts, decide which wrapper it
//! gets. Page scanning itself is the host's job; this module only answers
//! "how do we wrap this one".

use sync_types::{Selection, SurfaceId, SyncConfig};

use crate::plain::PlainSurface;
use crate::rich::RichHtmlSurface;
use crate::surface::EditableSurface;
use crate::widget::{EmbeddedWidgetSurface, WidgetLink};

/// Structural facts about one candidate element
pub struct CandidateField {
    /// Identity of the element
    pub id: SurfaceId,
    /// The element is a direct rich-text editing region
    pub content_editable: bool,
    /// The element carries a known embedded-widget input-shim marker class
    pub widget_marker: bool,
    /// Link into the ancestor widget container, when one was found
    pub widget_link: Option<Box<dyn WidgetLink>>,
    /// Current text value (or serialized markup for rich regions)
    pub initial_value: String,
    /// Current selection range
    pub initial_selection: Selection,
}

impl CandidateField {
    /// Candidate facts for a plain text input
    pub fn text_input(id: SurfaceId, value: impl Into<String>) -> Self {
        Self {
            id,
            content_editable: false,
            widget_marker: false,
            widget_link: None,
            initial_value: value.into(),
            initial_selection: Selection::default(),
        }
    }

    /// Candidate facts for a content-editable region
    pub fn rich_region(id: SurfaceId, markup: impl Into<String>) -> Self {
        Self {
            content_editable: true,
            ..Self::text_input(id, markup)
        }
    }

    /// Candidate facts for an embedded-widget input shim
    pub fn widget_input(id: SurfaceId, link: Box<dyn WidgetLink>) -> Self {
        Self {
            widget_marker: true,
            widget_link: Some(link),
            ..Self::text_input(id, "")
        }
    }
}

/// Produces exactly one wrapper for a candidate
///
/// Precedence: (1) a rich-text editing region wraps as RichHtml; (2) a
/// widget input shim with a reachable container wraps as EmbeddedWidget,
/// which immediately requests the widget's current value; (3) everything
/// else wraps as Plain. A marker class without a reachable container falls
/// through to Plain: there is no one to talk to.
pub fn wrap(candidate: CandidateField, config: &SyncConfig) -> Box<dyn EditableSurface> {
    if candidate.content_editable {
        let mut surface = RichHtmlSurface::new(candidate.id, candidate.initial_value);
        surface.set_selection(candidate.initial_selection);
        return Box::new(surface);
    }
    if let Some(link) = candidate.widget_link {
        return Box::new(EmbeddedWidgetSurface::connect(
            candidate.id,
            link,
            config.write_debounce_ticks,
        ));
    }
    let mut surface = PlainSurface::new(candidate.id, candidate.initial_value);
    surface.set_selection(candidate.initial_selection);
    Box::new(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimWidget;
    use crate::surface::SurfaceKind;

    #[test]
    fn test_rich_region_takes_precedence() {
        // Content-editable wins even when widget facts are also present.
        let widget = SimWidget::new();
        let candidate = CandidateField {
            content_editable: true,
            widget_marker: true,
            widget_link: Some(widget.link()),
            ..CandidateField::text_input(SurfaceId::new(), "<p>x</p>")
        };
        let surface = wrap(candidate, &SyncConfig::default());
        assert_eq!(surface.kind(), SurfaceKind::RichHtml);
        assert_eq!(widget.fetch_count(), 0);
    }

    #[test]
    fn test_widget_shim_wraps_as_embedded_and_fetches() {
        let widget = SimWidget::new();
        let candidate = CandidateField::widget_input(SurfaceId::new(), widget.link());
        let surface = wrap(candidate, &SyncConfig::default());
        assert_eq!(surface.kind(), SurfaceKind::EmbeddedWidget);
        assert!(!surface.is_ready());
        assert_eq!(widget.fetch_count(), 1);
    }

    #[test]
    fn test_marker_without_container_falls_back_to_plain() {
        let candidate = CandidateField {
            widget_marker: true,
            ..CandidateField::text_input(SurfaceId::new(), "text")
        };
        let surface = wrap(candidate, &SyncConfig::default());
        assert_eq!(surface.kind(), SurfaceKind::Plain);
        assert_eq!(surface.value(), "text");
    }

    #[test]
    fn test_plain_input_wraps_as_plain() {
        let candidate = CandidateField::text_input(SurfaceId::new(), "hello");
        let surface = wrap(candidate, &SyncConfig::default());
        assert_eq!(surface.kind(), SurfaceKind::Plain);
        assert!(surface.is_ready());
    }
}
