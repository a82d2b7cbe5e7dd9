//! # Page Coordinator
//!
//! Owns every field session on a page: discovery, activation policy, the
//! live-field count, and the structured event trail.
//!
//! ## Philosophy
//!
//! - **Explicit registry, not ambient state**: the known-surfaces map, the
//!   active set and the waiting flag live in one coordinator value,
//!   created at page load and torn down with [`stop`](PageCoordinator::stop)
//!   at page unload
//! - **One session per surface, forever**: registry entries persist while
//!   the surface stays known, so repeated focus events never duplicate
//!   sessions
//! - **Structured, not stdout**: lifecycle facts land in a typed event
//!   trail; human-facing strings go through the notifier collaborator
//!
//! ## Activation policy
//!
//! A single known surface auto-activates. With several, the coordinator
//! enters a page-wide waiting mode and the next focus event on an inactive
//! surface picks the field.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use editor_channel::{ChannelConnector, ChannelEvent};
use field_session::{ActivationOutcome, DeactivationReason, FieldSession, SessionState};
use field_surface::{wrap, CandidateField};
use site_transforms::{TransformPair, TransformTable};
use sync_types::{Notifier, PageMeta, Selection, Severity, StatusSink, SurfaceId, SyncConfig, Tick};

/// One entry in the coordinator's structured event trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// Discovery ran; `known` is the registry size afterwards
    ElementsDiscovered { known: usize },
    /// Waiting-for-click mode entered
    WaitingEntered,
    /// Waiting-for-click mode left
    WaitingCleared,
    /// An activation was requested for a surface
    ActivationRequested { surface: SurfaceId },
    /// A session reached Active
    SessionConnected { surface: SurfaceId },
    /// A session returned to Inactive
    SessionDisconnected {
        surface: SurfaceId,
        reason: DeactivationReason,
    },
    /// The active count changed and was reported
    CountReported { count: usize },
}

/// Outcome of [`PageCoordinator::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Discovery found nothing usable; a warning was raised
    NoCandidates,
    /// The only known surface was activated directly
    AutoActivated(SurfaceId),
    /// The only known surface failed to connect
    ActivationFailed(SurfaceId),
    /// The only known surface already has a live session
    AlreadyActive,
    /// Several candidates; waiting for a focus event to pick one
    WaitingForActivation,
}

/// Process-wide coordinator for one page
pub struct PageCoordinator {
    page: PageMeta,
    config: SyncConfig,
    /// Resolved once at construction; the site cannot change without a
    /// full page reload.
    transforms: TransformPair,
    sessions: HashMap<SurfaceId, FieldSession>,
    /// Discovery order, for deterministic iteration
    order: Vec<SurfaceId>,
    waiting: bool,
    connector: Box<dyn ChannelConnector>,
    notifier: Box<dyn Notifier>,
    status: Box<dyn StatusSink>,
    reported_count: usize,
    events: Vec<SyncEvent>,
}

impl PageCoordinator {
    /// Creates the coordinator for a page, resolving its transform pair
    pub fn new(
        page: PageMeta,
        table: &TransformTable,
        config: SyncConfig,
        connector: Box<dyn ChannelConnector>,
        notifier: Box<dyn Notifier>,
        status: Box<dyn StatusSink>,
    ) -> Self {
        let transforms = table.resolve(&page.location);
        Self {
            page,
            config,
            transforms,
            sessions: HashMap::new(),
            order: Vec::new(),
            waiting: false,
            connector,
            notifier,
            status,
            reported_count: 0,
            events: Vec::new(),
        }
    }

    /// Registers a session for every not-yet-known candidate
    ///
    /// Returns the number of known surfaces after discovery.
    pub fn discover(&mut self, candidates: Vec<CandidateField>) -> usize {
        for candidate in candidates {
            let id = candidate.id;
            if self.sessions.contains_key(&id) {
                continue;
            }
            let surface = wrap(candidate, &self.config);
            let session = FieldSession::new(surface, self.page.clone(), self.transforms);
            self.sessions.insert(id, session);
            self.order.push(id);
        }
        let known = self.sessions.len();
        self.events.push(SyncEvent::ElementsDiscovered { known });
        known
    }

    /// Discovers candidates and applies the activation policy
    ///
    /// `focused` names the surface currently holding focus, if any; it is
    /// blurred so a deliberate click can pick a field in waiting mode.
    pub fn start(&mut self, candidates: Vec<CandidateField>, focused: Option<SurfaceId>) -> StartOutcome {
        let known = self.discover(candidates);
        if known == 0 {
            self.notifier
                .notify(Severity::Warning, "No supported elements found!");
            return StartOutcome::NoCandidates;
        }

        if let Some(id) = focused {
            if let Some(session) = self.sessions.get_mut(&id) {
                session.surface_mut().blur();
            }
        }

        if known == 1 {
            let id = self.order[0];
            if self.active_count() == 0 {
                return match self.activate(id) {
                    ActivationOutcome::Connecting => StartOutcome::AutoActivated(id),
                    _ => StartOutcome::ActivationFailed(id),
                };
            }
            return StartOutcome::AlreadyActive;
        }

        self.waiting = true;
        self.events.push(SyncEvent::WaitingEntered);
        if self.active_count() == 0 {
            self.notifier.notify(
                Severity::Info,
                "Click on the desired element to activate it.",
            );
        } else {
            self.notifier.notify(
                Severity::Info,
                "Click on the desired element to activate it or stop the connection from the toolbar icon.",
            );
        }
        StartOutcome::WaitingForActivation
    }

    /// Handles a focus event on a surface
    ///
    /// Only meaningful in waiting mode: the first focus on an inactive
    /// surface requests its activation and clears the flag.
    pub fn on_focus(&mut self, id: SurfaceId) {
        if !self.waiting {
            return;
        }
        let Some(session) = self.sessions.get(&id) else {
            return;
        };
        if session.state() != SessionState::Inactive {
            return;
        }
        self.activate(id);
        self.waiting = false;
        self.events.push(SyncEvent::WaitingCleared);
    }

    /// Routes one classified inbound channel event to its session
    pub fn on_channel_event(&mut self, id: SurfaceId, event: ChannelEvent, now: Tick) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        let before = session.state();
        session.on_channel_event(event, now, self.notifier.as_mut());
        self.record_transition(id, before);
        self.update_count();
    }

    /// Routes a transport failure to its session
    pub fn on_channel_error(&mut self, id: SurfaceId) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        let before = session.state();
        session.on_channel_error(self.notifier.as_mut());
        self.record_transition(id, before);
        self.update_count();
    }

    /// Records a user edit on a surface (new value plus selection)
    ///
    /// The host calls this before [`on_local_change`](Self::on_local_change):
    /// by the time a change event fires, the surface already holds the new
    /// text.
    pub fn apply_local_edit(&mut self, id: SurfaceId, value: &str, selection: Selection) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.surface_mut().apply_local_edit(value, selection);
        }
    }

    /// Routes a local edit observed by the host
    pub fn on_local_change(&mut self, id: SurfaceId) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.on_local_change(self.notifier.as_mut());
        }
    }

    /// Routes a value event from an embedded widget
    pub fn deliver_widget_value(&mut self, id: SurfaceId, value: &str) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.surface_mut().deliver_widget_value(value);
        }
    }

    /// Advances every session's debounced write path
    pub fn tick(&mut self, now: Tick) {
        for session in self.sessions.values_mut() {
            session.tick(now, self.notifier.as_mut());
        }
    }

    /// Deactivates one session on explicit local request
    pub fn deactivate(&mut self, id: SurfaceId) -> bool {
        let Some(session) = self.sessions.get_mut(&id) else {
            return false;
        };
        let changed = session.deactivate(DeactivationReason::LocalRequest);
        if changed {
            self.events.push(SyncEvent::SessionDisconnected {
                surface: id,
                reason: DeactivationReason::LocalRequest,
            });
            self.update_count();
        }
        changed
    }

    /// Deactivates every session and clears waiting mode (page teardown)
    pub fn stop(&mut self) {
        let ids = self.order.clone();
        for id in ids {
            if let Some(session) = self.sessions.get_mut(&id) {
                if session.deactivate(DeactivationReason::GlobalStop) {
                    self.events.push(SyncEvent::SessionDisconnected {
                        surface: id,
                        reason: DeactivationReason::GlobalStop,
                    });
                }
            }
        }
        if self.waiting {
            self.waiting = false;
            self.events.push(SyncEvent::WaitingCleared);
        }
        self.update_count();
    }

    /// Number of sessions currently Active
    pub fn active_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_active()).count()
    }

    /// Number of known surfaces
    pub fn known_count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the page is waiting for a focus event to pick a field
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// The resolved transform pair for this page
    pub fn transforms(&self) -> TransformPair {
        self.transforms
    }

    /// The structured event trail
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    /// Looks up a session by surface identity
    pub fn session(&self, id: SurfaceId) -> Option<&FieldSession> {
        self.sessions.get(&id)
    }

    fn activate(&mut self, id: SurfaceId) -> ActivationOutcome {
        let Some(session) = self.sessions.get_mut(&id) else {
            return ActivationOutcome::Failed;
        };
        self.events
            .push(SyncEvent::ActivationRequested { surface: id });
        session.activate(self.connector.as_mut(), self.notifier.as_mut())
    }

    fn record_transition(&mut self, id: SurfaceId, before: SessionState) {
        let Some(session) = self.sessions.get(&id) else {
            return;
        };
        let after = session.state();
        if before != SessionState::Active && after == SessionState::Active {
            self.events.push(SyncEvent::SessionConnected { surface: id });
        }
        if before != SessionState::Inactive && after == SessionState::Inactive {
            let reason = session
                .last_deactivation()
                .unwrap_or(DeactivationReason::RemoteClose);
            self.events.push(SyncEvent::SessionDisconnected {
                surface: id,
                reason,
            });
        }
    }

    /// Recomputes the active count and reports it on change
    fn update_count(&mut self) {
        let count = self.active_count();
        if count == self.reported_count {
            return;
        }
        self.reported_count = count;
        self.status.active_count_changed(count);
        self.events.push(SyncEvent::CountReported { count });
        if count == 0 {
            self.notifier.notify(Severity::Info, "Disconnected!");
        }
    }
}
