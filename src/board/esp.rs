//! ESP-IDF board: UART0 at 115200 8N1 on the USB-UART bridge pins.

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::gpio::AnyIOPin;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::uart::{config::Config, UartDriver, UartRxDriver, UartTxDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{self, EspError};

use serial_cli_console::console::SystemHooks;
use serial_cli_console::logging::timestamp_us;
use serial_cli_console::signal::BinarySemaphore;
use serial_cli_console::{rt_error, rt_info, ConsoleConfig, LOG_STREAM};

use super::{RxLine, TxLine};

pub type WakeSignal = BinarySemaphore;

pub const CONFIG: ConsoleConfig = ConsoleConfig::DEFAULT;

pub const HOOKS: SystemHooks = SystemHooks {
    ticks,
    reset,
};

const BAUD_RATE: u32 = 115_200;

pub fn init() {
    sys::link_patches();
    rt_info!(LOG_STREAM, timestamp_us(), "console starting");
}

pub fn wake_signal() -> &'static WakeSignal {
    match BinarySemaphore::new() {
        Some(sem) => Box::leak(Box::new(sem)),
        None => fatal("wake semaphore allocation failed"),
    }
}

pub fn uart() -> Result<(UartRx, UartTx), EspError> {
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;
    let config = Config::default().baudrate(Hertz(BAUD_RATE));

    #[cfg(feature = "esp32p4")]
    let (tx_pin, rx_pin) = (pins.gpio37, pins.gpio38);
    #[cfg(not(feature = "esp32p4"))]
    let (tx_pin, rx_pin) = (pins.gpio43, pins.gpio44);

    let driver = UartDriver::new(
        peripherals.uart0,
        tx_pin,
        rx_pin,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &config,
    )?;
    let (tx, rx) = driver.into_split();
    Ok((UartRx(rx), UartTx(tx)))
}

pub fn fatal(e: impl core::fmt::Display) -> ! {
    println!("console: {e}");
    // SAFETY: Plain ESP-IDF call, never returns.
    unsafe { sys::esp_restart() }
}

fn ticks() -> u32 {
    // SAFETY: Read-only scheduler query.
    unsafe { sys::xTaskGetTickCount() }
}

fn reset() {
    // SAFETY: Plain ESP-IDF call, never returns.
    unsafe { sys::esp_restart() }
}

pub struct UartRx(UartRxDriver<'static>);

impl RxLine for UartRx {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.0.read(&mut byte, BLOCK) {
                Ok(1) => return Some(byte[0]),
                Ok(_) => continue,
                Err(e) => rt_error!(LOG_STREAM, timestamp_us(), "uart read: {}", e),
            }
        }
    }
}

pub struct UartTx(UartTxDriver<'static>);

impl TxLine for UartTx {
    fn write_byte(&mut self, byte: u8) {
        if let Err(e) = self.0.write(&[byte]) {
            rt_error!(LOG_STREAM, timestamp_us(), "uart write: {}", e);
        }
    }
}
