//! Display engine
//!
//! Drives a 128x64 monochrome OLED (SSD1306 class) over a DMA-backed
//! I2C channel without ever blocking the main loop. The panel is
//! organized as 8 pages of 128x8 pixels; each page is one text line.
//!
//! Writers stage text into per-line ping-pong buffers; a cooperative
//! scheduler, ticked once per main-loop iteration, drains staged lines
//! to the panel one DMA burst at a time.

mod engine;
mod font;
mod line;

pub use engine::{Display, INIT_COMMANDS, PROBE_ATTEMPTS, PROBE_RETRY_MS};
pub use font::glyph;
pub use line::{Line, SLOT_LEN};

/// Panel width in pixel columns
pub const SCREEN_WIDTH: usize = 128;

/// Panel height in pixel rows
pub const SCREEN_HEIGHT: usize = 64;

/// Number of text lines (hardware pages, 8 pixel rows each)
pub const LINES: usize = SCREEN_HEIGHT / 8;

/// Glyph width in pixel columns, without the spacer column
pub const FONT_WIDTH: usize = 5;

/// Glyph height in pixel rows
pub const FONT_HEIGHT: usize = 7;

/// Width of one character cell: glyph plus one blank spacer column
pub const CELL_WIDTH: usize = FONT_WIDTH + 1;

/// Characters that fit in one line
pub const CHARS_PER_LINE: usize = SCREEN_WIDTH / CELL_WIDTH;

/// 7-bit I2C address of the panel controller
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// Errors from staging display content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Line index outside 0..8
    LineOutOfRange,
}
