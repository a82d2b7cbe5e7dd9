//! FieldSession state machine

use serde::{Deserialize, Serialize};
use std::fmt;

use editor_channel::{ChannelConnector, ChannelEvent, EditFrame, EditorChannel, RemoteEdit};
use field_surface::{EditableSurface, FieldMarker, FlushOutcome, WriteOutcome};
use site_transforms::{TransformFn, TransformPair};
use sync_types::{Notifier, PageMeta, SessionId, Severity, Tick};

/// Connection lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No channel; the surface is dormant
    Inactive,
    /// Channel opened, waiting for the remote ready signal
    Connecting,
    /// Channel ready; edits flow in both directions
    Active,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Inactive => write!(f, "inactive"),
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::Active => write!(f, "active"),
        }
    }
}

/// Why a session returned to Inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeactivationReason {
    /// Explicit local request
    LocalRequest,
    /// The remote end asked to disconnect
    RemoteClose,
    /// The channel failed
    ChannelError,
    /// Page-wide stop
    GlobalStop,
}

/// Outcome of an activation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Channel opened; now waiting for ready
    Connecting,
    /// The session was not Inactive; nothing happened
    AlreadyActive,
    /// The connector failed; the session stays Inactive
    Failed,
}

/// Outcome of processing one local-change event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalChangeOutcome {
    /// A frame was transmitted
    Sent,
    /// The change was an echo of the session's own write; swallowed
    SuppressedEcho,
    /// The session is not listening; ignored
    Ignored,
    /// The channel failed on send; the session went Inactive
    Disconnected,
}

/// Outcome of applying one remote edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The value was written (immediately or scheduled) and the selection
    /// applied
    Applied,
    /// The value already matched; only the selection moved
    SelectionOnly,
    /// The session is not Active; ignored
    Ignored,
}

/// One surface paired with at most one channel
pub struct FieldSession {
    id: SessionId,
    state: SessionState,
    surface: Box<dyn EditableSurface>,
    channel: Option<Box<dyn EditorChannel>>,
    transforms: TransformPair,
    page: PageMeta,
    listening: bool,
    own_write_in_flight: bool,
    last_deactivation: Option<DeactivationReason>,
}

impl FieldSession {
    /// Creates an Inactive session owning `surface`
    pub fn new(surface: Box<dyn EditableSurface>, page: PageMeta, transforms: TransformPair) -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Inactive,
            surface,
            channel: None,
            transforms,
            page,
            listening: false,
            own_write_in_flight: false,
            last_deactivation: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Whether the local-change listener is attached
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Whether a channel handle is currently held
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    pub fn surface(&self) -> &dyn EditableSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn EditableSurface {
        self.surface.as_mut()
    }

    /// Why the session last left Connecting/Active, if it ever did
    pub fn last_deactivation(&self) -> Option<DeactivationReason> {
        self.last_deactivation
    }

    /// Inactive → Connecting: mark the surface loading and open a channel
    ///
    /// A connect failure is surfaced like any channel error and leaves the
    /// session Inactive; retry policy belongs to the connector.
    pub fn activate(
        &mut self,
        connector: &mut dyn ChannelConnector,
        notifier: &mut dyn Notifier,
    ) -> ActivationOutcome {
        if self.state != SessionState::Inactive {
            return ActivationOutcome::AlreadyActive;
        }
        self.surface.set_marker(FieldMarker::Loading);
        match connector.connect() {
            Ok(channel) => {
                self.channel = Some(channel);
                self.state = SessionState::Connecting;
                ActivationOutcome::Connecting
            }
            Err(_) => {
                self.surface.set_marker(FieldMarker::Idle);
                notifier.notify(Severity::Info, "Disconnected! Could not reach the editor");
                ActivationOutcome::Failed
            }
        }
    }

    /// Processes one classified inbound event
    pub fn on_channel_event(
        &mut self,
        event: ChannelEvent,
        now: Tick,
        notifier: &mut dyn Notifier,
    ) {
        match event {
            ChannelEvent::Ready => self.on_ready(notifier),
            ChannelEvent::Edit(edit) => {
                self.apply_remote(&edit, now, notifier);
            }
            ChannelEvent::Close => {
                self.deactivate(DeactivationReason::RemoteClose);
            }
        }
    }

    /// The transport failed; identical to a remote close plus a notice
    pub fn on_channel_error(&mut self, notifier: &mut dyn Notifier) {
        if self.deactivate(DeactivationReason::ChannelError) {
            notifier.notify(Severity::Info, "Disconnected! The editor connection was lost");
        }
    }

    /// Processes one local-change event observed on the surface
    pub fn on_local_change(&mut self, notifier: &mut dyn Notifier) -> LocalChangeOutcome {
        if !self.listening || self.state != SessionState::Active {
            return LocalChangeOutcome::Ignored;
        }
        if self.own_write_in_flight {
            // Echo of the value this session just wrote; swallow it and
            // arm for the next genuine edit.
            self.own_write_in_flight = false;
            return LocalChangeOutcome::SuppressedEcho;
        }
        match self.transmit_current(notifier) {
            Ok(()) => LocalChangeOutcome::Sent,
            Err(()) => {
                self.on_channel_error(notifier);
                LocalChangeOutcome::Disconnected
            }
        }
    }

    /// Applies one remote edit to the surface
    ///
    /// The selection from the frame is applied even when the text is
    /// unchanged: remote cursor moves are meaningful on their own.
    pub fn apply_remote(
        &mut self,
        edit: &RemoteEdit,
        now: Tick,
        notifier: &mut dyn Notifier,
    ) -> ApplyOutcome {
        if self.state != SessionState::Active {
            return ApplyOutcome::Ignored;
        }
        let incoming = self.run_transform(self.transforms.receive, &edit.text, "receive", notifier);
        let outcome = if incoming != self.surface.value() {
            // The flag must be observable-set before the write can
            // synthesize its change notification.
            self.own_write_in_flight = true;
            match self.surface.write(&incoming, now) {
                WriteOutcome::Applied => {
                    self.consume_echo(notifier);
                    ApplyOutcome::Applied
                }
                WriteOutcome::Scheduled => {
                    // The dispatch happens on a later flush; the flag is
                    // re-armed there, in the turn that produces the echo.
                    self.own_write_in_flight = false;
                    ApplyOutcome::Applied
                }
                WriteOutcome::Unchanged => {
                    self.own_write_in_flight = false;
                    ApplyOutcome::SelectionOnly
                }
            }
        } else {
            ApplyOutcome::SelectionOnly
        };
        self.surface.set_selection(edit.primary_selection());
        outcome
    }

    /// Advances the surface's debounced write path
    pub fn tick(&mut self, now: Tick, notifier: &mut dyn Notifier) {
        if self.state != SessionState::Active || !self.surface.has_pending_write() {
            return;
        }
        self.own_write_in_flight = true;
        match self.surface.flush(now) {
            FlushOutcome::Dispatched => self.consume_echo(notifier),
            FlushOutcome::Idle => {
                self.own_write_in_flight = false;
            }
            FlushOutcome::Failed(_) => {
                // The widget rejected the synthetic write. Swallowed: the
                // next observed change must count as genuine.
                self.own_write_in_flight = false;
            }
        }
    }

    /// Any state → Inactive
    ///
    /// Returns whether the session actually left Connecting/Active.
    /// Idempotent.
    pub fn deactivate(&mut self, reason: DeactivationReason) -> bool {
        if self.state == SessionState::Inactive {
            return false;
        }
        self.listening = false;
        self.surface.cancel_pending_write();
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
        self.surface.set_marker(FieldMarker::Idle);
        self.state = SessionState::Inactive;
        self.own_write_in_flight = false;
        self.last_deactivation = Some(reason);
        true
    }

    /// Connecting → Active on the remote ready signal
    fn on_ready(&mut self, notifier: &mut dyn Notifier) {
        if self.state != SessionState::Connecting {
            return;
        }
        self.state = SessionState::Active;
        self.listening = true;
        self.own_write_in_flight = false;
        self.surface.set_marker(FieldMarker::Enabled);
        notifier.notify(Severity::Info, "Connected! You can switch to your editor");
        // The remote side has no prior state; hand it the full value now.
        if self.transmit_current(notifier).is_err() {
            self.on_channel_error(notifier);
        }
    }

    /// Sends the surface's current value and selection as one frame
    fn transmit_current(&mut self, notifier: &mut dyn Notifier) -> Result<(), ()> {
        let raw = self.surface.value();
        let text = self.run_transform(self.transforms.send, &raw, "send", notifier);
        let frame = EditFrame::new(&self.page, text, self.surface.selection());
        let Some(channel) = self.channel.as_mut() else {
            return Err(());
        };
        channel.send(&frame).map_err(|_| ())
    }

    /// Runs one transform direction, falling back to the original text
    ///
    /// A failing transform must never corrupt a message; the defect is
    /// reported at low severity and the text passes through untouched.
    fn run_transform(
        &self,
        transform: TransformFn,
        text: &str,
        direction: &str,
        notifier: &mut dyn Notifier,
    ) -> String {
        match transform(text) {
            Ok(out) => out,
            Err(err) => {
                notifier.notify(
                    Severity::Info,
                    &format!("Text transform defect ({}): {}", direction, err),
                );
                text.to_string()
            }
        }
    }

    /// Routes the synthetic change notification of our own write
    ///
    /// A programmatic write synthesizes exactly one change notification,
    /// delivered within the same synchronous turn; it takes the same path
    /// a host-observed change does and is swallowed by the flag guard.
    fn consume_echo(&mut self, notifier: &mut dyn Notifier) {
        let _ = self.on_local_change(notifier);
    }
}
