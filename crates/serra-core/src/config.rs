//! Device-wide tunable constants.
//!
//! These are shared by the firmware and the simulator so both drive the
//! screen manager with the same timing behavior.

/// Interval between radio polls for a new greenhouse frame, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 5000;

/// Touch debounce window in milliseconds.
///
/// A second raw press inside this window keeps the previous stable sample
/// unless the stored sample is the no-touch sentinel.
pub const TOUCH_DEBOUNCE_MS: u64 = 500;

/// Period of the cooperative UI tick loop in milliseconds.
pub const UI_TICK_MS: u64 = 20;
