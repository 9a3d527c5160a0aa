//! Millisecond clocks. Slow-motion expiry and pause bookkeeping are absolute
//! timestamps on this clock.

use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `performance.now()`; 0.0 when no window is present (native builds).
#[derive(Clone, Debug, Default)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self { performance: web_sys::window().and_then(|w| w.performance()) }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map(|p| p.now()).unwrap_or(0.0)
    }
}

/// Hand-advanced clock; clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new(100.0);
        let b = a.clone();
        a.advance(16.0);
        assert_eq!(b.now_ms(), 116.0);
        b.set(5.0);
        assert_eq!(a.now_ms(), 5.0);
    }
}
