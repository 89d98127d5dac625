//! Status LED over TIM3 channel 3
//!
//! The LED sits on PB0 (TIM3_CH3, AF1) and is driven entirely by the
//! timer: solid states use the forced output modes, blinking uses
//! toggle-on-match, and the single flash is a one-pulse PWM cycle.
//! Once configured, a mode runs without any software involvement.

use embassy_stm32::pac::{self, GPIOB, RCC, TIM3};

use octavo_hal::{LedState, StatusLed};

/// Output compare channel for the LED (channel 3)
const LED_CHANNEL: usize = 2;

/// TIM3-driven indicator LED
pub struct Tim3StatusLed;

impl Tim3StatusLed {
    /// Bring up PB0 and TIM3 with a millisecond time base
    pub fn new(sysclk_hz: u32) -> Self {
        RCC.ahbenr().modify(|w| w.set_gpioben(true));
        RCC.apb1enr().modify(|w| w.set_tim3en(true));

        GPIOB.afr(0).modify(|w| w.set_afr(0, 1));
        GPIOB.moder().modify(|w| w.set_moder(0, pac::gpio::vals::Moder::ALTERNATE));

        TIM3.psc().write(|w| w.set_psc((sysclk_hz / 1000 - 1) as u16));

        Self
    }
}

impl StatusLed for Tim3StatusLed {
    fn set_state(&mut self, state: LedState) {
        // Stop and reset the channel before applying the new mode
        TIM3.cr1().write(|w| w.0 = 0);
        TIM3.arr().write(|w| w.set_arr(0));
        TIM3.ccr(LED_CHANNEL).write(|w| w.set_ccr(0));
        TIM3.ccmr_output(1).write(|w| w.0 = 0);
        TIM3.ccer().write(|w| w.set_cce(LED_CHANNEL, true));
        TIM3.cnt().write(|w| w.set_cnt(0));

        match state {
            LedState::On => {
                TIM3.ccmr_output(1)
                    .modify(|w| w.set_ocm(0, pac::timer::vals::Ocm::FORCEACTIVE));
            }
            LedState::Off => {
                TIM3.ccmr_output(1)
                    .modify(|w| w.set_ocm(0, pac::timer::vals::Ocm::FORCEINACTIVE));
            }
            LedState::Flash => {
                // One 50 ms active pulse, then the output idles low
                TIM3.arr().write(|w| w.set_arr(50));
                TIM3.ccr(LED_CHANNEL).write(|w| w.set_ccr(1));
                TIM3.ccmr_output(1)
                    .modify(|w| w.set_ocm(0, pac::timer::vals::Ocm::PWMMODE2));
                TIM3.egr().write(|w| w.set_ug(true));
                TIM3.cr1().write(|w| {
                    w.set_opm(true);
                    w.set_cen(true);
                });
            }
            LedState::SlowBlink | LedState::FastBlink => {
                let period = match state {
                    LedState::SlowBlink => 249,
                    _ => 99,
                };
                TIM3.arr().write(|w| w.set_arr(period));
                TIM3.ccr(LED_CHANNEL).write(|w| w.set_ccr(period));
                TIM3.ccmr_output(1)
                    .modify(|w| w.set_ocm(0, pac::timer::vals::Ocm::TOGGLE));
                TIM3.cr1().write(|w| w.set_cen(true));
            }
        }
    }
}
