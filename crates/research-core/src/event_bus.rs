//! Event bus between the streaming run tasks and the UI frame loop.
//!
//! Single-threaded (WASM constraint), interior mutability via RefCell.
//! Run tasks push session events as the backend emits them; the UI drains
//! the queue once per frame. FIFO order is the ordering guarantee the
//! session client relies on.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use research_types::event::SessionEvent;

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event. Called by the streaming run tasks.
    pub fn emit(&self, event: SessionEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events in emission order. Called by the UI
    /// layer each frame.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Check if there are pending events (useful for repaint triggers).
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
