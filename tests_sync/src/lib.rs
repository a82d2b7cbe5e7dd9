//! Sync Scenario Test Utilities
//!
//! Shared fixtures for the cross-crate scenario tests.
//!
//! ## Test Philosophy
//!
//! - **Deterministic end to end**: every scenario is driven by explicit
//!   events and explicit ticks; no sleeps, no wall clock
//! - **Probe, don't peek**: assertions go through the same collaborator
//!   seams a real host uses (channel probe, recording notifier/status)
//! - **One fixture per page**: a fixture owns the coordinator plus the
//!   probe halves of its collaborators

use editor_channel::{ChannelEvent, InboundFrame, SimConnector};
use field_surface::CandidateField;
use page_coordinator::PageCoordinator;
use site_transforms::default_table;
use sync_types::{
    LogicalClock, PageLocation, PageMeta, RecordingNotifier, RecordingStatus, SurfaceId,
    SyncConfig,
};

/// A coordinator wired to inspectable sim collaborators
pub struct PageFixture {
    pub coordinator: PageCoordinator,
    pub connector: SimConnector,
    pub notifier: RecordingNotifier,
    pub status: RecordingStatus,
    pub clock: LogicalClock,
}

/// Bootstrap helper for scenario tests
///
/// Builds a coordinator for a page on `host` with the built-in transform
/// table and default config, keeping probe handles to every collaborator.
pub fn page_bootstrap(host: &str) -> PageFixture {
    let connector = SimConnector::new();
    let notifier = RecordingNotifier::new();
    let status = RecordingStatus::new();
    let page = PageMeta::new("Scenario Page", PageLocation::from_host(host), "");
    let coordinator = PageCoordinator::new(
        page,
        &default_table(),
        SyncConfig::default(),
        Box::new(connector.clone()),
        Box::new(notifier.clone()),
        Box::new(status.clone()),
    );
    PageFixture {
        coordinator,
        connector,
        notifier,
        status,
        clock: LogicalClock::new(),
    }
}

/// Creates a plain text-input candidate and returns its identity
pub fn text_candidate(value: &str) -> (SurfaceId, CandidateField) {
    let id = SurfaceId::new();
    (id, CandidateField::text_input(id, value))
}

/// Delivers the remote ready signal to a session
pub fn deliver_ready(fixture: &mut PageFixture, id: SurfaceId) {
    fixture
        .coordinator
        .on_channel_event(id, ChannelEvent::Ready, fixture.clock.now());
}

/// Parses a raw wire frame and routes it to a session
pub fn deliver_wire_frame(fixture: &mut PageFixture, id: SurfaceId, json: &str) {
    let frame: InboundFrame = serde_json::from_str(json).expect("wire frame parses");
    let event = frame.classify().expect("wire frame classifies");
    fixture
        .coordinator
        .on_channel_event(id, event, fixture.clock.now());
}
