//! Frame types exchanged with the external editor

use serde::{Deserialize, Serialize};
use sync_types::{PageMeta, Selection};
use thiserror::Error;

/// Protocol violations in inbound traffic
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("edit payload carries no selections")]
    EmptySelections,

    #[error("inbound frame matches no known shape")]
    UnrecognizedFrame,
}

/// Outbound frame: the full local text plus page metadata and selection
///
/// Exactly one selection range per frame in the current design; the field
/// is a list on the wire for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFrame {
    /// Document title of the hosting page
    pub title: String,
    /// Host of the hosting page
    pub url: String,
    /// Syntax hint for the editor, empty when unknown
    pub syntax: String,
    /// Complete current text of the surface, already send-transformed
    pub text: String,
    /// Selection ranges, exactly one entry
    pub selections: Vec<Selection>,
}

impl EditFrame {
    /// Builds an outbound frame from page metadata, text and one selection
    pub fn new(meta: &PageMeta, text: impl Into<String>, selection: Selection) -> Self {
        Self {
            title: meta.title.clone(),
            url: meta.location.host.clone(),
            syntax: meta.syntax.clone(),
            text: text.into(),
            selections: vec![selection],
        }
    }
}

/// Inbound edit payload: remote text plus at least one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEdit {
    /// Complete remote text, not yet receive-transformed
    pub text: String,
    /// Selection ranges, at least one entry
    pub selections: Vec<Selection>,
}

impl RemoteEdit {
    /// Creates a remote edit with a single selection
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selections: vec![selection],
        }
    }

    /// Checks the payload invariants
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.selections.is_empty() {
            return Err(ProtocolError::EmptySelections);
        }
        Ok(())
    }

    /// Returns the primary selection range
    ///
    /// Call only after [`validate`](Self::validate); an unvalidated empty
    /// payload yields a caret at 0.
    pub fn primary_selection(&self) -> Selection {
        self.selections.first().copied().unwrap_or_default()
    }
}

/// Raw inbound frame as it appears on the wire
///
/// The remote side sends exactly one of the three fields per frame;
/// [`classify`](Self::classify) turns the raw shape into a typed event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundFrame {
    /// Present when the remote editor produced an edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<RemoteEdit>,
    /// Present (true) when the remote requested disconnect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    /// Present (true) when the handshake completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
}

impl InboundFrame {
    /// Wraps an edit payload
    pub fn edit(edit: RemoteEdit) -> Self {
        Self {
            message: Some(edit),
            ..Self::default()
        }
    }

    /// Builds a close frame
    pub fn close() -> Self {
        Self {
            close: Some(true),
            ..Self::default()
        }
    }

    /// Builds a ready frame
    pub fn ready() -> Self {
        Self {
            ready: Some(true),
            ..Self::default()
        }
    }

    /// Classifies the raw frame into a typed channel event
    ///
    /// An edit payload takes precedence, then close, then ready; a frame
    /// carrying none of the three is a protocol error.
    pub fn classify(self) -> Result<ChannelEvent, ProtocolError> {
        if let Some(edit) = self.message {
            edit.validate()?;
            return Ok(ChannelEvent::Edit(edit));
        }
        if self.close == Some(true) {
            return Ok(ChannelEvent::Close);
        }
        if self.ready == Some(true) {
            return Ok(ChannelEvent::Ready);
        }
        Err(ProtocolError::UnrecognizedFrame)
    }
}

/// Typed inbound event delivered to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Handshake complete, the session may become Active
    Ready,
    /// The remote editor produced new text and selection
    Edit(RemoteEdit),
    /// The remote requested disconnect
    Close,
}
