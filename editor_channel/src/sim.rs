//! Simulated channel for deterministic tests
//!
//! The sim connector hands out in-memory channels and keeps a probe for
//! each, so a test can inspect everything a session transmitted after the
//! channel box itself has been handed over. Single-threaded by design,
//! like the rest of the core.

use std::cell::RefCell;
use std::rc::Rc;

use crate::channel::{ChannelConnector, ChannelError, EditorChannel};
use crate::message::EditFrame;

#[derive(Debug, Default)]
struct SimChannelState {
    sent: Vec<EditFrame>,
    open: bool,
}

/// In-memory channel returned by [`SimConnector`]
pub struct SimChannel {
    state: Rc<RefCell<SimChannelState>>,
    fail_sends: bool,
}

impl EditorChannel for SimChannel {
    fn send(&mut self, frame: &EditFrame) -> Result<(), ChannelError> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Err(ChannelError::Closed);
        }
        if self.fail_sends {
            return Err(ChannelError::SendFailed {
                reason: "simulated send failure".to_string(),
            });
        }
        state.sent.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) {
        self.state.borrow_mut().open = false;
    }
}

/// Inspection handle for one simulated channel
#[derive(Clone)]
pub struct SimChannelProbe {
    state: Rc<RefCell<SimChannelState>>,
}

impl SimChannelProbe {
    /// Returns every frame sent through the channel, in order
    pub fn sent(&self) -> Vec<EditFrame> {
        self.state.borrow().sent.clone()
    }

    /// Returns the number of frames sent
    pub fn sent_count(&self) -> usize {
        self.state.borrow().sent.len()
    }

    /// Returns the most recently sent frame, if any
    pub fn last_sent(&self) -> Option<EditFrame> {
        self.state.borrow().sent.last().cloned()
    }

    /// Checks whether the channel is still open
    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }
}

/// Connector double producing inspectable in-memory channels
///
/// Clones share state, so a test keeps one handle as a probe and hands a
/// clone to the coordinator.
#[derive(Clone, Default)]
pub struct SimConnector {
    probes: Rc<RefCell<Vec<SimChannelProbe>>>,
    refuse: Rc<RefCell<bool>>,
    fail_sends: Rc<RefCell<bool>>,
}

impl SimConnector {
    /// Creates a connector that accepts every connection
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent connection attempts fail
    pub fn refuse_connections(&self, refuse: bool) {
        *self.refuse.borrow_mut() = refuse;
    }

    /// Makes channels opened from now on fail every send
    pub fn fail_sends(&self, fail: bool) {
        *self.fail_sends.borrow_mut() = fail;
    }

    /// Returns how many channels were opened
    pub fn connection_count(&self) -> usize {
        self.probes.borrow().len()
    }

    /// Returns the probe for the nth opened channel
    pub fn probe(&self, index: usize) -> Option<SimChannelProbe> {
        self.probes.borrow().get(index).cloned()
    }

    /// Returns the probe for the most recently opened channel
    pub fn last_probe(&self) -> Option<SimChannelProbe> {
        self.probes.borrow().last().cloned()
    }
}

impl ChannelConnector for SimConnector {
    fn connect(&mut self) -> Result<Box<dyn EditorChannel>, ChannelError> {
        if *self.refuse.borrow() {
            return Err(ChannelError::ConnectFailed {
                reason: "simulated connection refusal".to_string(),
            });
        }
        let state = Rc::new(RefCell::new(SimChannelState {
            sent: Vec::new(),
            open: true,
        }));
        self.probes.borrow_mut().push(SimChannelProbe {
            state: Rc::clone(&state),
        });
        Ok(Box::new(SimChannel {
            state,
            fail_sends: *self.fail_sends.borrow(),
        }))
    }
}
