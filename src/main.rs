//! BLE Identity Rotator Main Entry Point
//!
//! Single cooperative control loop on the main task.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  BleAdvertiser     LogEventSink   LcdDisplay     Esp32Clock    │
//! │  (AdvertiserPort)  (EventSink)    (DisplayPort)  (ClockPort)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            RotatorService (pure logic)                 │    │
//! │  │  OperatorPanel · RotationScheduler                     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Buttons (debounced) · Status LED · Task watchdog              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use heapless::Vec;
use log::{error, info};

use ble_rotator::adapters::advertiser::BleAdvertiser;
use ble_rotator::adapters::display::LcdDisplay;
use ble_rotator::adapters::log_sink::LogEventSink;
use ble_rotator::adapters::time::Esp32Clock;
use ble_rotator::app::commands::PanelCommand;
use ble_rotator::app::ports::ClockPort;
use ble_rotator::app::service::RotatorService;
use ble_rotator::config::RotatorConfig;
use ble_rotator::drivers::button::{ButtonDriver, ButtonEvent, GpioInput};
use ble_rotator::drivers::hw_init;
use ble_rotator::drivers::lcd::{self, LcdPins};
use ble_rotator::drivers::status_led::StatusLed;
use ble_rotator::drivers::watchdog::Watchdog;
use ble_rotator::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BLE Rotator v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration and watchdog ─────────────────────────
    let config = RotatorConfig::load();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    // ── 3. Peripherals (power hold first) ─────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the power latch the board turns off once the button is
        // released; halt and let the watchdog reset.
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    let mut lcd_buffer = [0u8; lcd::SPI_BUFFER_LEN];
    let panel = lcd::init_lcd(
        peripherals.spi2,
        LcdPins {
            sclk: peripherals.pins.gpio13,
            mosi: peripherals.pins.gpio15,
            cs: peripherals.pins.gpio5,
            dc: peripherals.pins.gpio14,
            rst: peripherals.pins.gpio12,
        },
        &mut lcd_buffer,
    )?;

    // ── 4. Adapters ───────────────────────────────────────────
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();
    let mut display = LcdDisplay::new(panel);
    let mut led = StatusLed::new();
    let mut button_a = ButtonDriver::active_low(GpioInput::new(pins::BUTTON_A_GPIO), config.debounce_ms);
    let mut button_b = ButtonDriver::active_low(GpioInput::new(pins::BUTTON_B_GPIO), config.debounce_ms);

    // ── 5. Service ────────────────────────────────────────────
    let mut service = RotatorService::new(&config);
    service.initialize(BleAdvertiser::new(), &mut sink);
    service.start(&mut display, &mut sink);

    info!("Control loop: {}ms", config.control_loop_interval_ms);

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();

        let mut commands: Vec<PanelCommand, 2> = Vec::new();
        if let Some(ButtonEvent::Pressed) = button_a.tick(now) {
            let _ = commands.push(PanelCommand::IncrementCount);
        }
        if let Some(ButtonEvent::Pressed) = button_b.tick(now) {
            let _ = commands.push(PanelCommand::ToggleEnabled);
        }

        service.tick(&commands, now, &mut display, &mut sink);
        led.set(service.settings().enabled);

        watchdog.feed();
        esp_idf_hal::delay::FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
