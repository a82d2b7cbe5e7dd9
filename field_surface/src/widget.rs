//! Embedded-widget surface
//!
//! Some pages host a full code-editor widget that owns its text internally
//! and only exposes a custom event protocol. The wrapper talks to it
//! through a [`WidgetLink`]: it asks for the current value on wrap, keeps
//! the last value the widget reported, and pushes writes through a
//! debounced dispatch so a burst of remote echoes never starves the
//! widget's own editor with intermediate states.

use sync_types::{Selection, SurfaceId, Tick};
use thiserror::Error;

use crate::debounce::DebouncedWriter;
use crate::surface::{EditableSurface, FieldMarker, FlushOutcome, SurfaceKind, WriteOutcome};

/// Failures on the widget protocol
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("widget rejected the dispatch: {reason}")]
    DispatchRejected { reason: String },
}

/// One request on the widget's custom protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetRequest {
    /// Ask the widget for its current value; it answers with a value event
    FetchValue,
    /// Hand the widget a new value, synthesizing a native input-change
    /// notification its internals can observe
    Write { value: String },
    /// Ask the widget to drop focus
    Blur,
}

/// Dispatches requests into the embedded widget
///
/// Supplied by whoever identified the widget container around the
/// candidate element. Replies come back asynchronously through
/// [`EditableSurface::deliver_widget_value`].
pub trait WidgetLink {
    /// Delivers one request to the widget
    fn dispatch(&mut self, request: WidgetRequest) -> Result<(), WidgetError>;
}

/// Wrapper for an embedded code-editor widget
pub struct EmbeddedWidgetSurface {
    id: SurfaceId,
    link: Box<dyn WidgetLink>,
    /// Last value the widget reported; `None` until the first reply,
    /// which is also the wrapper's ready signal.
    last_known: Option<String>,
    selection: Selection,
    marker: FieldMarker,
    writer: DebouncedWriter,
}

impl EmbeddedWidgetSurface {
    /// Wraps a widget and requests its current value
    ///
    /// The wrapper is not ready until the widget's value reply arrives via
    /// [`EditableSurface::deliver_widget_value`]. A rejected fetch request
    /// just leaves the wrapper pending; a later value event still
    /// completes it.
    pub fn connect(id: SurfaceId, mut link: Box<dyn WidgetLink>, debounce_window: Tick) -> Self {
        let _ = link.dispatch(WidgetRequest::FetchValue);
        Self {
            id,
            link,
            last_known: None,
            selection: Selection::default(),
            marker: FieldMarker::Idle,
            writer: DebouncedWriter::new(debounce_window),
        }
    }
}

impl EditableSurface for EmbeddedWidgetSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::EmbeddedWidget
    }

    fn is_ready(&self) -> bool {
        self.last_known.is_some()
    }

    fn value(&self) -> String {
        self.last_known.clone().unwrap_or_default()
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
        let _ = self.link.dispatch(WidgetRequest::Blur);
    }

    fn write(&mut self, text: &str, now: Tick) -> WriteOutcome {
        if self.last_known.as_deref() == Some(text) {
            return WriteOutcome::Unchanged;
        }
        self.writer.schedule(text, now);
        WriteOutcome::Scheduled
    }

    fn flush(&mut self, now: Tick) -> FlushOutcome {
        let Some(value) = self.writer.take_due(now) else {
            return FlushOutcome::Idle;
        };
        // The no-op gate again at dispatch time: the widget may have caught
        // up through its own value events while the write sat in the window.
        if self.last_known.as_deref() == Some(value.as_str()) {
            return FlushOutcome::Idle;
        }
        match self.link.dispatch(WidgetRequest::Write {
            value: value.clone(),
        }) {
            Ok(()) => {
                self.last_known = Some(value);
                FlushOutcome::Dispatched
            }
            Err(err) => FlushOutcome::Failed(err),
        }
    }

    fn cancel_pending_write(&mut self) {
        self.writer.cancel();
    }

    fn has_pending_write(&self) -> bool {
        self.writer.is_pending()
    }

    fn apply_local_edit(&mut self, value: &str, selection: Selection) {
        self.last_known = Some(value.to_string());
        self.selection = selection;
    }

    fn deliver_widget_value(&mut self, value: &str) {
        self.last_known = Some(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimWidget;

    fn surface_with(widget: &SimWidget) -> EmbeddedWidgetSurface {
        EmbeddedWidgetSurface::connect(SurfaceId::new(), widget.link(), 100)
    }

    #[test]
    fn test_connect_requests_current_value() {
        let widget = SimWidget::new();
        let surface = surface_with(&widget);
        assert_eq!(widget.fetch_count(), 1);
        assert!(!surface.is_ready());
    }

    #[test]
    fn test_value_reply_completes_handshake() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("let x = 1;");
        assert!(surface.is_ready());
        assert_eq!(surface.value(), "let x = 1;");
    }

    #[test]
    fn test_write_is_debounced_to_last_value() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("");

        assert_eq!(surface.write("a", 0), WriteOutcome::Scheduled);
        assert_eq!(surface.write("ab", 30), WriteOutcome::Scheduled);
        assert_eq!(surface.write("abc", 60), WriteOutcome::Scheduled);

        // Nothing dispatched before the quiet period of the last write.
        assert_eq!(surface.flush(100), FlushOutcome::Idle);
        assert_eq!(surface.flush(160), FlushOutcome::Dispatched);
        assert_eq!(widget.written_values(), vec!["abc"]);
        assert_eq!(surface.value(), "abc");
    }

    #[test]
    fn test_write_equal_to_known_value_is_skipped() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("same");
        assert_eq!(surface.write("same", 0), WriteOutcome::Unchanged);
        assert!(!surface.has_pending_write());
    }

    #[test]
    fn test_flush_skips_if_widget_caught_up() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("old");

        surface.write("new", 0);
        // The widget reports the same text on its own before the window
        // elapses.
        surface.deliver_widget_value("new");
        assert_eq!(surface.flush(100), FlushOutcome::Idle);
        assert!(widget.written_values().is_empty());
    }

    #[test]
    fn test_rejected_dispatch_reported() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("");
        widget.reject_writes(true);

        surface.write("x", 0);
        assert!(matches!(surface.flush(100), FlushOutcome::Failed(_)));
        // The failed value is not recorded as known.
        assert_eq!(surface.value(), "");
    }

    #[test]
    fn test_cancel_clears_pending_write() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.deliver_widget_value("");
        surface.write("x", 0);
        assert!(surface.has_pending_write());

        surface.cancel_pending_write();
        assert!(!surface.has_pending_write());
        assert_eq!(surface.flush(1000), FlushOutcome::Idle);
    }

    #[test]
    fn test_blur_goes_through_link() {
        let widget = SimWidget::new();
        let mut surface = surface_with(&widget);
        surface.blur();
        assert_eq!(widget.blur_count(), 1);
    }
}
