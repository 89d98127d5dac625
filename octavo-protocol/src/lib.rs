//! USB HID report protocol for the octavo keypad
//!
//! The USB transport itself (descriptors, endpoint handling) lives
//! outside this crate; what arrives here are raw report payloads. This
//! crate decodes host-to-device output reports into [`Command`] values
//! and encodes the device-to-host feature reports that advertise
//! display capabilities.
//!
//! Report map:
//! - Output 1: LED state (1 byte)
//! - Output 2: display line (line, alignment, 21 text bytes)
//! - Output 3: delayed display clear (u16 milliseconds, little endian)
//! - Feature 1: capability bitmask (bit 0 = display present)
//! - Feature 2: display geometry (line count, chars per line)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod reports;

pub use reports::{Capabilities, Command, DisplayInfo, ParseError};

/// Number of text lines on the display
pub const DISPLAY_LINES: u8 = 8;

/// Characters that fit in one display line
pub const DISPLAY_CHARS_PER_LINE: u8 = 21;

/// Horizontal alignment of a display line
///
/// Discriminants are the wire values used in the display line report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Align {
    /// Flush left (column 0)
    Left = 1,
    /// Flush right (last glyph cell ends at the panel edge)
    Right = 2,
    /// Centered, biased one pixel column left when the slack is odd
    Center = 3,
}

impl Align {
    /// Decode a wire value
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(Align::Left),
            2 => Some(Align::Right),
            3 => Some(Align::Center),
            _ => None,
        }
    }
}
