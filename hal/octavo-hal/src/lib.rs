//! octavo Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32F0 today, others later). The display engine
//! in `octavo-core` is generic over these traits, which keeps all protocol
//! and buffering logic testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (octavo-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  octavo-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  octavo-hal-stm32f0                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::DisplayBus`] - DMA-backed display transfer channel
//! - [`timer::OneShotTimer`] - one-shot millisecond deadline
//! - [`led::StatusLed`] - indicator LED mode control

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod led;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use bus::{DisplayBus, ProbeStatus};
pub use led::{LedState, StatusLed};
pub use timer::OneShotTimer;
