//! octavo keypad firmware
//!
//! Firmware binary for the STM32F042-based octavo USB keypad. The main
//! loop is cooperative: it drains commands decoded by the USB transport
//! and gives the display engine one scheduler tick per iteration, so
//! USB servicing latency never waits on a display transfer.
//!
//! The USB transport (descriptors, endpoint handling, report plumbing)
//! lives outside this module; it pushes decoded [`Command`] values into
//! [`COMMANDS`] from its interrupt context and serves the capability
//! feature reports to the host.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use {defmt_rtt as _, panic_probe as _};

use octavo_core::Display;
use octavo_hal::{LedState, StatusLed};
use octavo_hal_stm32f0::{I2cDmaBus, Tim16OneShot, Tim3StatusLed};
use octavo_protocol::{Capabilities, Command, DisplayInfo};

/// Core clock after default bring-up (HSI); timers divide this to 1 kHz
const SYSCLK_HZ: u32 = 8_000_000;

/// Host commands decoded by the USB transport, drained by the main loop
static COMMANDS: Channel<CriticalSectionRawMutex, Command, 8> = Channel::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("octavo firmware starting...");

    let _p = embassy_stm32::init(Default::default());

    let mut led = Tim3StatusLed::new(SYSCLK_HZ);
    led.set_state(LedState::Off);

    let bus = I2cDmaBus::new();
    let timer = Tim16OneShot::new(SYSCLK_HZ);
    let mut display = Display::new(bus, timer);

    if display.init() {
        let info = DisplayInfo::new();
        info!(
            "display detected: {} lines x {} chars",
            info.lines, info.chars_per_line
        );
    } else {
        warn!("no display found, running headless");
    }

    let caps = Capabilities {
        display: display.is_available(),
    };
    info!("capability report: {:#x}", caps.encode()[0]);

    loop {
        while let Ok(cmd) = COMMANDS.try_receive() {
            match cmd {
                Command::Led(state) => led.set_state(state),
                Command::DisplayLine { line, align, text } => {
                    if display.line(line, &text, align).is_err() {
                        warn!("display line out of range: {}", line);
                    }
                }
                Command::DisplayClearDelay(ms) => display.clear_with_delay(ms),
            }
        }

        display.tick();
        yield_now().await;
    }
}
