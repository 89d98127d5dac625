//! STM32F0-specific HAL for the octavo keypad firmware
//!
//! Implements the `octavo-hal` traits for the STM32F042 parts the
//! keypad ships with. The display path goes straight to the registers
//! (I2C1 fed by DMA1 channel 2) because the engine's scheduler needs
//! the raw start/busy/complete observations, not a transactional I2C
//! API; the timers follow the same pattern.
//!
//! # Features
//!
//! - `stm32f042f6` / `stm32f042k6` - chip selection, set by the firmware
//! - `defmt` - debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod display_bus;
pub mod led;
pub mod timer;

pub use display_bus::I2cDmaBus;
pub use led::Tim3StatusLed;
pub use timer::Tim16OneShot;
