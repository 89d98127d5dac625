//! Per-line ping-pong buffers
//!
//! Each of the 8 panel pages owns two interchangeable slots. The
//! selector (`writable`) names the slot open for staging; the other
//! slot is the candidate for transmission. A slot never changes
//! content while it is on the bus: writers always go through the
//! writable slot, and only the scheduler flips the selector.

use super::SCREEN_WIDTH;

/// Command preamble length: three 2-byte commands plus the data marker
pub(crate) const PREAMBLE_LEN: usize = 7;

/// Full slot length: preamble plus one page of pixel columns
pub const SLOT_LEN: usize = PREAMBLE_LEN + SCREEN_WIDTH;

/// One physical transfer buffer: addressing preamble + 128 data bytes
///
/// The preamble addresses the page and resets the column pointer, so a
/// slot is transmittable as a single contiguous burst at any time.
struct Slot {
    buf: [u8; SLOT_LEN],
}

impl Slot {
    fn new(page: u8) -> Self {
        let mut buf = [0u8; SLOT_LEN];
        // Control byte 0x80 prefixes each command byte; 0x40 switches
        // the remainder of the transaction to data
        buf[0] = 0x80;
        buf[1] = 0xB0 | page; // set page address
        buf[2] = 0x80;
        buf[3] = 0x02; // column address, low nibble (panel RAM offset 2)
        buf[4] = 0x80;
        buf[5] = 0x10; // column address, high nibble
        buf[6] = 0x40;
        Self { buf }
    }
}

/// One panel page with double-buffered content
pub struct Line {
    slots: [Slot; 2],
    pending: [bool; 2],
    writable: usize,
}

impl Line {
    /// Create the buffers for page `page` (0..8)
    pub fn new(page: u8) -> Self {
        Self {
            slots: [Slot::new(page), Slot::new(page)],
            pending: [false, false],
            writable: 0,
        }
    }

    /// Index of the slot currently open for staging
    pub fn writable(&self) -> usize {
        self.writable
    }

    /// Swap which slot is open for staging
    ///
    /// Called by the scheduler at burst start, so writers arriving
    /// mid-transfer land in the other slot.
    pub fn flip(&mut self) {
        self.writable = 1 - self.writable;
    }

    /// Whether `slot` holds content not yet fully transmitted
    pub fn pending(&self, slot: usize) -> bool {
        self.pending[slot]
    }

    /// Mark or clear the pending flag of `slot`
    pub fn set_pending(&mut self, slot: usize, pending: bool) {
        self.pending[slot] = pending;
    }

    /// The 128 data bytes of the writable slot, for staging
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.slots[self.writable].buf[PREAMBLE_LEN..]
    }

    /// The 128 data bytes of `slot`
    pub fn data(&self, slot: usize) -> &[u8] {
        &self.slots[slot].buf[PREAMBLE_LEN..]
    }

    /// The full transfer burst (preamble + data) of `slot`
    pub fn burst(&self, slot: usize) -> &[u8] {
        &self.slots[slot].buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_addresses_page() {
        for page in 0..8u8 {
            let line = Line::new(page);
            let burst = line.burst(0);
            assert_eq!(burst.len(), SLOT_LEN);
            assert_eq!(
                &burst[..PREAMBLE_LEN],
                &[0x80, 0xB0 | page, 0x80, 0x02, 0x80, 0x10, 0x40]
            );
            assert_eq!(line.burst(1)[..PREAMBLE_LEN], burst[..PREAMBLE_LEN]);
        }
    }

    #[test]
    fn test_new_line_is_blank_and_idle() {
        let line = Line::new(3);
        assert!(!line.pending(0));
        assert!(!line.pending(1));
        assert_eq!(line.writable(), 0);
        assert!(line.data(0).iter().all(|&b| b == 0));
        assert!(line.data(1).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flip_alternates() {
        let mut line = Line::new(0);
        line.flip();
        assert_eq!(line.writable(), 1);
        line.flip();
        assert_eq!(line.writable(), 0);
    }

    #[test]
    fn test_staging_targets_writable_slot_only() {
        let mut line = Line::new(0);
        line.data_mut()[0] = 0xAB;
        assert_eq!(line.data(0)[0], 0xAB);
        assert_eq!(line.data(1)[0], 0x00);

        line.flip();
        line.data_mut()[0] = 0xCD;
        assert_eq!(line.data(0)[0], 0xAB);
        assert_eq!(line.data(1)[0], 0xCD);
    }
}
