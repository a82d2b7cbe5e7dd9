//! Simulated embedded widget for deterministic tests

use std::cell::RefCell;
use std::rc::Rc;

use crate::widget::{WidgetError, WidgetLink, WidgetRequest};

#[derive(Debug, Default)]
struct SimWidgetState {
    requests: Vec<WidgetRequest>,
    reject_writes: bool,
}

/// In-memory widget recording every request dispatched to it
///
/// Clones share state: keep one handle as a probe and build links for the
/// surface under test with [`link`](Self::link).
#[derive(Clone, Default)]
pub struct SimWidget {
    state: Rc<RefCell<SimWidgetState>>,
}

impl SimWidget {
    /// Creates a widget that accepts every request
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a boxed link sharing this widget's state
    pub fn link(&self) -> Box<dyn WidgetLink> {
        Box::new(self.clone())
    }

    /// Makes subsequent write dispatches fail
    pub fn reject_writes(&self, reject: bool) {
        self.state.borrow_mut().reject_writes = reject;
    }

    /// Returns every request received, in order
    pub fn requests(&self) -> Vec<WidgetRequest> {
        self.state.borrow().requests.clone()
    }

    /// Returns the values of accepted write requests, in order
    pub fn written_values(&self) -> Vec<String> {
        self.state
            .borrow()
            .requests
            .iter()
            .filter_map(|r| match r {
                WidgetRequest::Write { value } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns how many fetch-value requests were received
    pub fn fetch_count(&self) -> usize {
        self.count_matching(|r| matches!(r, WidgetRequest::FetchValue))
    }

    /// Returns how many blur requests were received
    pub fn blur_count(&self) -> usize {
        self.count_matching(|r| matches!(r, WidgetRequest::Blur))
    }

    fn count_matching(&self, predicate: impl Fn(&WidgetRequest) -> bool) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|r| predicate(r))
            .count()
    }
}

impl WidgetLink for SimWidget {
    fn dispatch(&mut self, request: WidgetRequest) -> Result<(), WidgetError> {
        let mut state = self.state.borrow_mut();
        if state.reject_writes && matches!(request, WidgetRequest::Write { .. }) {
            return Err(WidgetError::DispatchRejected {
                reason: "simulated rejection".to_string(),
            });
        }
        state.requests.push(request);
        Ok(())
    }
}
