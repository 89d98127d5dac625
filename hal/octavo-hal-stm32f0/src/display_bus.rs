//! Display transfer channel over I2C1 + DMA1 channel 2
//!
//! The panel hangs off I2C1 (PA9 = SCL, PA10 = SDA, AF4) clocked from
//! SYSCLK at ~1 MHz. Bursts are fed to the I2C transmit register by
//! DMA channel 2; completion is the pair of "DMA transfer complete"
//! and "bus stop condition" flags, polled by the display engine's
//! scheduler tick.

use embassy_stm32::pac::{self, DMA1, GPIOA, I2C1, RCC};

use octavo_hal::{DisplayBus, ProbeStatus};

/// 7-bit I2C address of the panel controller
const DISPLAY_ADDRESS: u8 = 0x3C;

/// DMA1 channel feeding I2C1_TX (index 1 = channel 2)
const TX_CHANNEL: usize = 1;

/// Largest burst: 7-byte line preamble + 128 data bytes
const BURST_CAPACITY: usize = 135;

/// DMA-backed display bus
///
/// Owns the staging buffer the DMA engine reads from, so the value
/// must stay at a stable address while a transfer runs. The firmware
/// keeps it inside the main task, whose locals live in the executor's
/// static task storage.
pub struct I2cDmaBus {
    buf: [u8; BURST_CAPACITY],
    configured: bool,
}

impl I2cDmaBus {
    /// Bring up clocks and pins for the display bus
    ///
    /// Leaves the peripheral disabled; the availability probe and the
    /// first transfer enable it as needed.
    pub fn new() -> Self {
        // I2C1 kernel clock from SYSCLK
        RCC.cfgr3().modify(|w| w.set_i2c1sw(pac::rcc::vals::I2c1sw::SYS));
        RCC.ahbenr().modify(|w| {
            w.set_dma1en(true);
            w.set_gpioaen(true);
        });
        RCC.apb1enr().modify(|w| w.set_i2c1en(true));

        // PA9/PA10 open-drain, pull-up, AF4
        GPIOA.otyper().modify(|w| {
            w.set_ot(9, pac::gpio::vals::Ot::OPENDRAIN);
            w.set_ot(10, pac::gpio::vals::Ot::OPENDRAIN);
        });
        GPIOA.pupdr().modify(|w| {
            w.set_pupdr(9, pac::gpio::vals::Pupdr::PULLUP);
            w.set_pupdr(10, pac::gpio::vals::Pupdr::PULLUP);
        });
        GPIOA.afr(1).modify(|w| {
            w.set_afr(1, 4);
            w.set_afr(2, 4);
        });
        GPIOA.moder().modify(|w| {
            w.set_moder(9, pac::gpio::vals::Moder::ALTERNATE);
            w.set_moder(10, pac::gpio::vals::Moder::ALTERNATE);
        });

        // ~1 MHz with a 48 MHz kernel clock
        I2C1.timingr().write(|w| w.0 = 0x0020_0C1E);

        Self {
            buf: [0; BURST_CAPACITY],
            configured: false,
        }
    }

    /// One-time transfer-mode setup after a successful probe
    fn configure(&mut self) {
        I2C1.cr1().write(|w| {
            w.set_txdmaen(true);
            w.set_pe(true);
        });

        let ch = DMA1.ch(TX_CHANNEL);
        ch.par().write_value(I2C1.txdr().as_ptr() as u32);
        ch.cr().write(|w| {
            w.set_dir(pac::bdma::vals::Dir::FROMMEMORY);
            w.set_pl(pac::bdma::vals::Pl::VERYHIGH);
            w.set_minc(true);
            w.set_tcie(true);
        });

        self.configured = true;
    }
}

impl Default for I2cDmaBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBus for I2cDmaBus {
    fn begin_probe(&mut self) {
        // Address-only transaction: a present panel ACKs and the bus
        // stops; an absent one leaves NACK alongside the stop flag
        I2C1.cr1().write(|w| w.set_pe(true));
        I2C1.cr2().write(|w| {
            w.set_sadd((DISPLAY_ADDRESS as u16) << 1);
            w.set_autoend(true);
            w.set_start(true);
        });
    }

    fn probe_status(&mut self) -> ProbeStatus {
        let isr = I2C1.isr().read();
        if isr.stopf() && isr.nackf() {
            ProbeStatus::Absent
        } else if isr.stopf() {
            ProbeStatus::Present
        } else {
            ProbeStatus::Pending
        }
    }

    fn end_probe(&mut self) {
        // Disabling the peripheral also clears the probe's flags
        I2C1.cr1().modify(|w| w.set_pe(false));
    }

    fn start_transfer(&mut self, bytes: &[u8]) {
        if !self.configured {
            self.configure();
        }

        let len = bytes.len().min(BURST_CAPACITY);
        self.buf[..len].copy_from_slice(&bytes[..len]);

        I2C1.cr2().write(|w| {
            w.set_sadd((DISPLAY_ADDRESS as u16) << 1);
            w.set_nbytes(len as u8);
            w.set_autoend(true);
            w.set_start(true);
        });

        let ch = DMA1.ch(TX_CHANNEL);
        ch.mar().write_value(self.buf.as_ptr() as u32);
        ch.ndtr().write(|w| w.set_ndt(len as u16));
        ch.cr().modify(|w| w.set_en(true));
    }

    fn is_busy(&self) -> bool {
        DMA1.ch(TX_CHANNEL).cr().read().en()
    }

    fn poll_complete(&mut self) -> bool {
        if DMA1.isr().read().tcif(TX_CHANNEL) && I2C1.isr().read().stopf() {
            I2C1.icr().write(|w| w.set_stopcf(true));
            DMA1.ifcr().write(|w| w.set_tcif(TX_CHANNEL, true));
            DMA1.ch(TX_CHANNEL).cr().modify(|w| w.set_en(false));
            true
        } else {
            false
        }
    }
}
