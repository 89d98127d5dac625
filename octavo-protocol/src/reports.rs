//! Report payload codecs
//!
//! Decoding is strict: a payload with the wrong length or an unknown
//! enum value is rejected whole, with no partial effect, so the command
//! dispatcher only ever sees well-formed commands.

use heapless::Vec;

use octavo_hal::LedState;

use crate::{Align, DISPLAY_CHARS_PER_LINE, DISPLAY_LINES};

/// Output report IDs (host to device)
pub const REPORT_LED: u8 = 1;
pub const REPORT_DISPLAY_LINE: u8 = 2;
pub const REPORT_DISPLAY_CLEAR: u8 = 3;

/// Feature report IDs (device to host)
pub const REPORT_CAPABILITIES: u8 = 1;
pub const REPORT_DISPLAY_INFO: u8 = 2;

/// Payload length of the display line report: line + alignment + text
pub const DISPLAY_LINE_REPORT_LEN: usize = 2 + DISPLAY_CHARS_PER_LINE as usize;

/// Errors from decoding a report payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Report ID not in the report map
    UnknownReport,
    /// Payload length does not match the report's fixed size
    BadLength,
    /// A field holds a value outside its enum range
    InvalidValue,
}

/// A decoded host-to-device command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the status LED mode
    Led(LedState),
    /// Replace the text of one display line
    DisplayLine {
        line: u8,
        align: Align,
        text: [u8; DISPLAY_CHARS_PER_LINE as usize],
    },
    /// Clear the whole display after the given delay
    DisplayClearDelay(u16),
}

impl Command {
    /// Decode an output report payload
    pub fn parse(report_id: u8, payload: &[u8]) -> Result<Self, ParseError> {
        match report_id {
            REPORT_LED => {
                if payload.len() != 1 {
                    return Err(ParseError::BadLength);
                }
                let state = LedState::from_byte(payload[0]).ok_or(ParseError::InvalidValue)?;
                Ok(Command::Led(state))
            }
            REPORT_DISPLAY_LINE => {
                if payload.len() != DISPLAY_LINE_REPORT_LEN {
                    return Err(ParseError::BadLength);
                }
                let align = Align::from_byte(payload[1]).ok_or(ParseError::InvalidValue)?;
                let mut text = [0u8; DISPLAY_CHARS_PER_LINE as usize];
                text.copy_from_slice(&payload[2..]);
                Ok(Command::DisplayLine {
                    line: payload[0],
                    align,
                    text,
                })
            }
            REPORT_DISPLAY_CLEAR => {
                if payload.len() != 2 {
                    return Err(ParseError::BadLength);
                }
                Ok(Command::DisplayClearDelay(u16::from_le_bytes([
                    payload[0], payload[1],
                ])))
            }
            _ => Err(ParseError::UnknownReport),
        }
    }
}

/// Build a display line report payload the way host software does:
/// text truncated to the line width and zero-padded to the fixed size.
pub fn line_report(
    line: u8,
    align: Align,
    text: &str,
) -> Vec<u8, DISPLAY_LINE_REPORT_LEN> {
    let mut payload = Vec::new();
    let _ = payload.push(line);
    let _ = payload.push(align as u8);
    let bytes = text.as_bytes();
    let len = bytes.len().min(DISPLAY_CHARS_PER_LINE as usize);
    let _ = payload.extend_from_slice(&bytes[..len]);
    while payload.len() < DISPLAY_LINE_REPORT_LEN {
        let _ = payload.push(0);
    }
    payload
}

/// Capability bitmask advertised through feature report 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// A display panel was detected at startup
    pub display: bool,
}

impl Capabilities {
    /// Encode into the feature report payload
    pub fn encode(&self) -> [u8; 1] {
        [if self.display { 1 << 0 } else { 0 }]
    }
}

/// Display geometry advertised through feature report 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    pub lines: u8,
    pub chars_per_line: u8,
}

impl DisplayInfo {
    /// Geometry of the panel this firmware drives
    pub const fn new() -> Self {
        Self {
            lines: DISPLAY_LINES,
            chars_per_line: DISPLAY_CHARS_PER_LINE,
        }
    }

    /// Encode into the feature report payload
    pub fn encode(&self) -> [u8; 2] {
        [self.lines, self.chars_per_line]
    }
}

impl Default for DisplayInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_led() {
        assert_eq!(
            Command::parse(REPORT_LED, &[1]),
            Ok(Command::Led(LedState::On))
        );
        assert_eq!(
            Command::parse(REPORT_LED, &[5]),
            Ok(Command::Led(LedState::Off))
        );
        assert_eq!(Command::parse(REPORT_LED, &[0]), Err(ParseError::InvalidValue));
        assert_eq!(Command::parse(REPORT_LED, &[6]), Err(ParseError::InvalidValue));
        assert_eq!(Command::parse(REPORT_LED, &[]), Err(ParseError::BadLength));
        assert_eq!(Command::parse(REPORT_LED, &[1, 1]), Err(ParseError::BadLength));
    }

    #[test]
    fn test_parse_display_line() {
        let payload = line_report(3, Align::Center, "HELLO");
        let cmd = Command::parse(REPORT_DISPLAY_LINE, &payload).unwrap();
        match cmd {
            Command::DisplayLine { line, align, text } => {
                assert_eq!(line, 3);
                assert_eq!(align, Align::Center);
                assert_eq!(&text[..5], b"HELLO");
                assert!(text[5..].iter().all(|&b| b == 0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_display_line_rejects_bad_length() {
        // One byte short and one byte long of the fixed 23-byte payload
        assert_eq!(
            Command::parse(REPORT_DISPLAY_LINE, &[0u8; DISPLAY_LINE_REPORT_LEN - 1]),
            Err(ParseError::BadLength)
        );
        assert_eq!(
            Command::parse(REPORT_DISPLAY_LINE, &[0u8; DISPLAY_LINE_REPORT_LEN + 1]),
            Err(ParseError::BadLength)
        );
    }

    #[test]
    fn test_parse_display_line_rejects_bad_align() {
        let mut payload = line_report(0, Align::Left, "x");
        payload[1] = 4;
        assert_eq!(
            Command::parse(REPORT_DISPLAY_LINE, &payload),
            Err(ParseError::InvalidValue)
        );
        payload[1] = 0;
        assert_eq!(
            Command::parse(REPORT_DISPLAY_LINE, &payload),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_parse_clear_delay() {
        assert_eq!(
            Command::parse(REPORT_DISPLAY_CLEAR, &[0x34, 0x12]),
            Ok(Command::DisplayClearDelay(0x1234))
        );
        assert_eq!(
            Command::parse(REPORT_DISPLAY_CLEAR, &[0]),
            Err(ParseError::BadLength)
        );
    }

    #[test]
    fn test_unknown_report() {
        assert_eq!(Command::parse(9, &[0]), Err(ParseError::UnknownReport));
    }

    #[test]
    fn test_line_report_truncates() {
        let payload = line_report(0, Align::Left, "this string is much longer than one line");
        assert_eq!(payload.len(), DISPLAY_LINE_REPORT_LEN);
        assert_eq!(&payload[2..], &b"this string is much l"[..]);
    }

    #[test]
    fn test_capability_encoding() {
        assert_eq!(Capabilities { display: true }.encode(), [0x01]);
        assert_eq!(Capabilities { display: false }.encode(), [0x00]);
        assert_eq!(DisplayInfo::new().encode(), [8, 21]);
    }

    proptest! {
        #[test]
        fn parse_never_panics(report_id: u8, payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = Command::parse(report_id, &payload);
        }

        #[test]
        fn line_report_round_trips(line in 0u8..8, text in "[ -~]{0,21}") {
            let payload = line_report(line, Align::Right, &text);
            let cmd = Command::parse(REPORT_DISPLAY_LINE, &payload).unwrap();
            match cmd {
                Command::DisplayLine { line: l, align, text: t } => {
                    prop_assert_eq!(l, line);
                    prop_assert_eq!(align, Align::Right);
                    prop_assert_eq!(&t[..text.len()], text.as_bytes());
                }
                _ => prop_assert!(false),
            }
        }
    }
}
