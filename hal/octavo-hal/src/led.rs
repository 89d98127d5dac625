//! Status LED abstraction
//!
//! The indicator LED is driven entirely by a hardware timer (PWM /
//! one-pulse blink patterns), so the interface is a single mode setter
//! with no polling loop behind it.

/// Status LED modes
///
/// Discriminants are the wire values used by host software in the
/// LED output report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedState {
    /// Solid on
    On = 1,
    /// Short single flash, then off
    Flash = 2,
    /// Continuous slow blink
    SlowBlink = 3,
    /// Continuous fast blink
    FastBlink = 4,
    /// Off
    Off = 5,
}

impl LedState {
    /// Decode a wire value
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(LedState::On),
            2 => Some(LedState::Flash),
            3 => Some(LedState::SlowBlink),
            4 => Some(LedState::FastBlink),
            5 => Some(LedState::Off),
            _ => None,
        }
    }
}

/// Indicator LED driver
pub trait StatusLed {
    /// Reconfigure the LED to the given mode
    fn set_state(&mut self, state: LedState);
}
