//! One-shot timer over TIM16
//!
//! TIM16 runs in one-pulse mode with a 1 kHz counter clock, so ARR is
//! the deadline in milliseconds. The display engine polls the update
//! flag; no interrupt handler is involved.

use embassy_stm32::pac::{self, RCC, TIM16};

use octavo_hal::OneShotTimer;

/// TIM16 in polled one-pulse mode
pub struct Tim16OneShot;

impl Tim16OneShot {
    /// Bring up TIM16 with a millisecond time base
    pub fn new(sysclk_hz: u32) -> Self {
        RCC.apb2enr().modify(|w| w.set_tim16en(true));

        TIM16.cr1().write(|w| {
            w.set_opm(true);
            w.set_urs(pac::timer::vals::Urs::COUNTERONLY);
        });
        TIM16.dier().write(|w| w.set_uie(true));
        TIM16.psc().write(|w| w.set_psc((sysclk_hz / 1000 - 1) as u16));

        Self
    }
}

impl OneShotTimer for Tim16OneShot {
    fn arm(&mut self, ms: u16) {
        TIM16.arr().write(|w| w.set_arr(ms.saturating_sub(1)));
        TIM16.egr().write(|w| w.set_ug(true));
        TIM16.cr1().modify(|w| w.set_cen(true));
    }

    fn cancel(&mut self) {
        TIM16.cr1().modify(|w| w.set_cen(false));
        TIM16.sr().modify(|w| w.set_uif(false));
    }

    fn is_armed(&self) -> bool {
        TIM16.cr1().read().cen()
    }

    fn poll_expired(&mut self) -> bool {
        if TIM16.sr().read().uif() {
            TIM16.sr().modify(|w| w.set_uif(false));
            true
        } else {
            false
        }
    }
}
