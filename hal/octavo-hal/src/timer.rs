//! One-shot deadline abstraction
//!
//! A single armed-then-polled millisecond timer. The display engine
//! injects one instance and shares it between the availability probe's
//! retry delay and the debounced delayed-clear feature; the two uses
//! never overlap (the probe runs only during init).

/// One-shot millisecond timer, polled for expiry
pub trait OneShotTimer {
    /// Arm the timer to expire after `ms` milliseconds
    ///
    /// Re-arming a running timer restarts it from zero.
    fn arm(&mut self, ms: u16);

    /// Stop the timer without expiring; a pending expiry is discarded
    fn cancel(&mut self);

    /// Whether the timer is currently armed and counting
    fn is_armed(&self) -> bool;

    /// Poll for expiry
    ///
    /// Returns `true` once after the armed deadline passes, clearing
    /// the expiry flag; `false` otherwise. Never blocks.
    fn poll_expired(&mut self) -> bool;
}
