//! Display engine: staging, scheduling, lifecycle
//!
//! The engine owns the eight line buffers, the shared transfer channel,
//! and the one-shot timer. Writers stage content synchronously; the
//! [`Display::tick`] scheduler drains staged slots to the panel one DMA
//! burst at a time, round-robin across lines, without ever blocking.

use octavo_hal::{DisplayBus, OneShotTimer, ProbeStatus};
use octavo_protocol::Align;

use super::line::Line;
use super::{font, DisplayError, CELL_WIDTH, CHARS_PER_LINE, FONT_WIDTH, LINES, SCREEN_WIDTH};

/// One-time panel setup burst: command stream marker, segment remap
/// (reverse direction), COM scan direction (COM[N-1] to COM0), charge
/// pump enable, display on
pub const INIT_COMMANDS: [u8; 6] = [0x00, 0xA1, 0xC8, 0x8D, 0x14, 0xAF];

/// Availability probe attempts before reporting the panel absent
pub const PROBE_ATTEMPTS: usize = 10;

/// Delay between probe attempts, milliseconds
pub const PROBE_RETRY_MS: u16 = 50;

/// Status polls per probe attempt before giving up on the bus
const PROBE_POLL_BUDGET: u32 = 0xFFFF;

/// What the transfer channel is carrying right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum InFlight {
    /// Channel idle
    None,
    /// One-time panel setup burst
    Init,
    /// Contents of one line slot
    Slot { line: u8, slot: usize },
}

/// The display engine
///
/// Generic over the transfer channel and the one-shot timer so the
/// whole engine runs on the host. All methods return immediately; the
/// only blocking waits are the timer polls inside [`Display::init`],
/// which runs once before the main loop starts.
pub struct Display<B, T> {
    bus: B,
    timer: T,
    /// Panel detected at init; when false every operation is a no-op
    available: bool,
    /// Setup burst has landed on the panel
    initialized: bool,
    /// Jump the cursor back to line 0 before the next service step
    reset_line: bool,
    /// Round-robin cursor
    current_line: u8,
    in_flight: InFlight,
    lines: [Line; LINES],
}

impl<B: DisplayBus, T: OneShotTimer> Display<B, T> {
    pub fn new(bus: B, timer: T) -> Self {
        Self {
            bus,
            timer,
            available: false,
            initialized: false,
            reset_line: false,
            current_line: 0,
            in_flight: InFlight::None,
            lines: core::array::from_fn(|page| Line::new(page as u8)),
        }
    }

    /// Probe for the panel and stage the initial blank screen
    ///
    /// Returns whether a panel was found. On failure the engine enters
    /// headless mode: all later calls succeed as no-ops and the
    /// hardware is never touched again.
    pub fn init(&mut self) -> bool {
        if !self.probe() {
            return false;
        }
        self.available = true;
        self.clear();
        true
    }

    /// Whether a panel was detected at init
    pub fn is_available(&self) -> bool {
        self.available
    }

    fn probe(&mut self) -> bool {
        for _ in 0..PROBE_ATTEMPTS {
            self.bus.begin_probe();
            let mut budget = PROBE_POLL_BUDGET;
            while budget > 0 {
                match self.bus.probe_status() {
                    ProbeStatus::Present => {
                        self.bus.end_probe();
                        return true;
                    }
                    ProbeStatus::Absent => {
                        self.timer.arm(PROBE_RETRY_MS);
                        while !self.timer.poll_expired() {}
                        break;
                    }
                    ProbeStatus::Pending => budget -= 1,
                }
            }
            self.bus.end_probe();
        }
        false
    }

    /// Stage new text for a line
    ///
    /// Reads at most [`CHARS_PER_LINE`] bytes of `text`, stopping early
    /// at a NUL; longer text is truncated, not an error. All 128 data
    /// columns of the writable slot are rewritten: blanks outside the
    /// glyph span, glyph columns plus one spacer column per character
    /// inside it. Never blocks and never waits on the scheduler.
    pub fn line(&mut self, index: u8, text: &[u8], align: Align) -> Result<(), DisplayError> {
        if index as usize >= LINES {
            return Err(DisplayError::LineOutOfRange);
        }
        if !self.available {
            return Ok(());
        }

        // A pending delayed clear would wipe this write moments after
        // it lands; collapse it to an immediate clear instead
        if self.timer.is_armed() {
            self.timer.cancel();
            self.clear();
        }

        let len = staged_len(text);
        let start = match align {
            Align::Left => 0,
            Align::Right => (CHARS_PER_LINE - len) * CELL_WIDTH,
            // Truncating division: odd slack biases one column left
            Align::Center => ((CHARS_PER_LINE - len) * CELL_WIDTH) / 2,
        };

        let line = &mut self.lines[index as usize];
        let writable = line.writable();
        let data = line.data_mut();
        let mut i = 0;
        let mut j = 0;
        let mut k = 0;
        while i < SCREEN_WIDTH {
            if i < start || j >= len {
                data[i] = 0;
                i += 1;
                continue;
            }
            data[i] = font::glyph(text[j])[k];
            i += 1;
            k += 1;
            if k == FONT_WIDTH {
                data[i] = 0; // spacer column
                i += 1;
                j += 1;
                k = 0;
            }
        }
        line.set_pending(writable, true);

        if index == 0 {
            self.reset_line = true;
        }
        Ok(())
    }

    /// Stage a blank line, same contract as [`Display::line`] with
    /// empty text
    pub fn clear_line(&mut self, index: u8) -> Result<(), DisplayError> {
        if index as usize >= LINES {
            return Err(DisplayError::LineOutOfRange);
        }
        if self.available {
            self.stage_blank(index as usize);
        }
        Ok(())
    }

    /// Stage a blank screen
    pub fn clear(&mut self) {
        if !self.available {
            return;
        }
        for index in 0..LINES {
            self.stage_blank(index);
        }
    }

    /// Clear the screen after `ms` milliseconds
    ///
    /// Debounce pattern: re-arming replaces the previous deadline, so
    /// rapid repeated requests collapse into one clear. `ms <= 1`
    /// clears immediately.
    pub fn clear_with_delay(&mut self, ms: u16) {
        if !self.available {
            return;
        }
        if ms <= 1 {
            self.clear();
            return;
        }
        self.timer.arm(ms);
    }

    fn stage_blank(&mut self, index: usize) {
        let line = &mut self.lines[index];
        let writable = line.writable();
        line.data_mut().fill(0);
        line.set_pending(writable, true);
    }

    /// Scheduler tick, called once per main-loop iteration
    ///
    /// Cheap and non-blocking on every path. Priority order: delayed
    /// clear expiry, transfer completion, busy channel, cold-start
    /// setup burst, line-0 cursor reset, line service, round-robin
    /// advance.
    pub fn tick(&mut self) {
        if !self.available {
            return;
        }

        if self.timer.poll_expired() {
            self.clear();
            return;
        }

        if self.bus.poll_complete() {
            match core::mem::replace(&mut self.in_flight, InFlight::None) {
                InFlight::Init => self.initialized = true,
                InFlight::Slot { line, slot } => {
                    self.lines[line as usize].set_pending(slot, false);
                }
                InFlight::None => {}
            }
            return;
        }

        if self.bus.is_busy() {
            return;
        }

        if !self.initialized {
            self.in_flight = InFlight::Init;
            self.bus.start_transfer(&INIT_COMMANDS);
            return;
        }

        if self.reset_line {
            self.current_line = 0;
            self.reset_line = false;
        }

        let index = self.current_line as usize;
        let slot = self.lines[index].writable();
        if self.lines[index].pending(slot) {
            // Flip first so writes arriving mid-transfer land in the
            // other slot; the burst below is then never mutated
            self.lines[index].flip();
            self.in_flight = InFlight::Slot {
                line: self.current_line,
                slot,
            };
            self.bus.start_transfer(self.lines[index].burst(slot));
            return;
        }

        self.current_line += 1;
        if self.current_line as usize == LINES {
            self.current_line = 0;
        }
    }
}

/// Length of the text to stage: first NUL byte, capped at the line width
fn staged_len(text: &[u8]) -> usize {
    let mut len = 0;
    while len < CHARS_PER_LINE && len < text.len() && text[len] != 0 {
        len += 1;
    }
    len
}
