//! Board-agnostic display engine for the octavo keypad firmware
//!
//! Everything here runs identically on the target and on the host: the
//! engine is generic over the [`octavo_hal::DisplayBus`] and
//! [`octavo_hal::OneShotTimer`] traits, so the buffering, layout, and
//! scheduling logic is tested off-hardware while the register-level
//! drivers stay in the chip HAL.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;

pub use display::{Display, DisplayError};
