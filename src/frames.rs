//! Frame scheduling seam. The browser backs it with
//! `requestAnimationFrame`; tests step frames by hand.

use std::cell::Cell;
use std::rc::Rc;

pub trait FrameScheduler {
    /// Ask the host to call `GameSession::on_frame` once more.
    fn request_frame(&mut self);
    /// Drop any outstanding request.
    fn cancel_frame(&mut self);
}

/// Records requests instead of scheduling them; clones share state.
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    pending: Rc<Cell<bool>>,
    requested: Rc<Cell<u64>>,
    cancelled: Rc<Cell<u64>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Consume the pending request, as the host does right before firing it.
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn requested(&self) -> u64 {
        self.requested.get()
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled.get()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) {
        self.pending.set(true);
        self.requested.set(self.requested.get() + 1);
    }

    fn cancel_frame(&mut self) {
        if self.pending.replace(false) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}
