// src/touch.rs
//! Touch sampling and debouncing.
//!
//! The raw touch interrupt is the only concurrent actor in the system and
//! is restricted to setting one flag: [`TouchIrqFlag::notify`] from the
//! signal context, [`TouchIrqFlag::take`] from the UI tick. Everything
//! else runs on the single UI thread.
//!
//! [`TouchDebouncer`] turns raw samples into a stable coordinate consumed
//! once per refresh cycle. `(0, 0)` is the no-touch sentinel: hit-tests
//! treat it as "nothing pressed", and the debounce window is bypassed
//! while the stored sample is the sentinel so the first press after a
//! reset is always accepted.

use core::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::config::TOUCH_DEBOUNCE_MS;

/// A raw or debounced touch coordinate. `(0, 0)` means "no touch".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
}

impl TouchSample {
    /// The no-touch sentinel.
    pub const NONE: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn is_none(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// Edge-triggered press flag shared between the touch signal context and
/// the UI loop.
///
/// The signal side must do nothing but [`notify`](Self::notify): no
/// drawing, no allocation, no state-machine calls.
pub struct TouchIrqFlag(AtomicBool);

impl TouchIrqFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record a raw press edge. Safe to call from interrupt context.
    pub fn notify(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume a pending press edge, clearing the flag.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for TouchIrqFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Rate-limits raw touch coordinates into a stable sample.
pub struct TouchDebouncer {
    sample: TouchSample,
    last_accept_ms: u64,
}

impl TouchDebouncer {
    pub const fn new() -> Self {
        Self {
            sample: TouchSample::NONE,
            last_accept_ms: 0,
        }
    }

    /// Offer a raw sample at time `now_ms`.
    ///
    /// The sample is accepted only if the debounce window has elapsed
    /// since the last accepted sample, or if the stored sample is the
    /// sentinel (a fresh press after [`reset`](Self::reset)). Otherwise
    /// the previous stable sample is kept.
    pub fn feed(&mut self, raw: TouchSample, now_ms: u64) {
        if now_ms.saturating_sub(self.last_accept_ms) >= TOUCH_DEBOUNCE_MS || self.sample.is_none()
        {
            self.sample = raw;
            self.last_accept_ms = now_ms;
            debug!("touch accepted at {} {}", raw.x, raw.y);
        }
    }

    /// The current stable sample.
    pub fn sample(&self) -> TouchSample {
        self.sample
    }

    /// Return to the no-touch sentinel.
    ///
    /// Called after a widget press has been handled so the same physical
    /// press cannot re-trigger a hit-test on the next refresh.
    pub fn reset(&mut self) {
        self.sample = TouchSample::NONE;
    }
}

impl Default for TouchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_detection() {
        assert!(TouchSample::NONE.is_none());
        assert!(!TouchSample::new(0, 1).is_none());
        assert!(!TouchSample::new(1, 0).is_none());
    }

    #[test]
    fn irq_flag_is_edge_triggered() {
        let flag = TouchIrqFlag::new();
        assert!(!flag.take());
        flag.notify();
        flag.notify();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn second_press_within_window_is_ignored() {
        let mut debouncer = TouchDebouncer::new();
        debouncer.feed(TouchSample::new(100, 100), 1000);
        assert_eq!(debouncer.sample(), TouchSample::new(100, 100));

        // 200 ms later: inside the 500 ms window, coordinates unchanged
        debouncer.feed(TouchSample::new(200, 200), 1200);
        assert_eq!(debouncer.sample(), TouchSample::new(100, 100));

        // once the window elapses the new coordinates win
        debouncer.feed(TouchSample::new(200, 200), 1500);
        assert_eq!(debouncer.sample(), TouchSample::new(200, 200));
    }

    #[test]
    fn sentinel_bypasses_window() {
        let mut debouncer = TouchDebouncer::new();
        debouncer.feed(TouchSample::new(50, 60), 1000);
        debouncer.reset();
        assert!(debouncer.sample().is_none());

        // immediately after a reset the next press must land
        debouncer.feed(TouchSample::new(70, 80), 1001);
        assert_eq!(debouncer.sample(), TouchSample::new(70, 80));
    }

    #[test]
    fn first_press_is_always_accepted() {
        let mut debouncer = TouchDebouncer::new();
        debouncer.feed(TouchSample::new(10, 20), 3);
        assert_eq!(debouncer.sample(), TouchSample::new(10, 20));
    }
}
