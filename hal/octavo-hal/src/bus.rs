//! Display transfer channel abstraction
//!
//! Models the single DMA-backed bus engine that carries display bursts.
//! The hardware behind this is one I2C peripheral fed by one DMA channel,
//! so at most one transfer is ever outstanding; the scheduler in
//! `octavo-core` owns that sequencing and only needs the three
//! observations below plus a startup presence probe.

/// Result of polling an in-progress availability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeStatus {
    /// No stop condition observed yet, keep polling
    Pending,
    /// Stop condition without NACK - a device acknowledged its address
    Present,
    /// Stop condition with NACK - no device at the address
    Absent,
}

/// DMA-backed display transfer channel
///
/// Implementations start a burst and let it run to completion in
/// hardware; none of these methods may block. `poll_complete` must
/// acknowledge the hardware completion flags so it reports `true`
/// exactly once per finished burst.
pub trait DisplayBus {
    /// Begin an address-only probe transaction
    ///
    /// Used once at startup to detect whether a display is attached.
    fn begin_probe(&mut self);

    /// Poll the outcome of the probe transaction started by `begin_probe`
    fn probe_status(&mut self) -> ProbeStatus;

    /// Tear down probe state, releasing the bus for normal transfers
    fn end_probe(&mut self);

    /// Start an asynchronous burst transfer of `bytes`
    ///
    /// Must only be called when `is_busy` reports `false`. The
    /// implementation owns getting the bytes out (typically by copying
    /// into a DMA-reachable buffer); the caller may reuse `bytes`
    /// as soon as this returns.
    fn start_transfer(&mut self, bytes: &[u8]);

    /// Whether a burst started by `start_transfer` is still in progress
    fn is_busy(&self) -> bool;

    /// Poll for burst completion
    ///
    /// Returns `true` once the DMA transfer has drained and the bus stop
    /// condition has been observed, clearing both hardware flags. Returns
    /// `false` at all other times, including when no transfer was started.
    fn poll_complete(&mut self) -> bool;
}
