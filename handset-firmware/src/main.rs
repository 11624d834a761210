//! Handset firmware
//!
//! Main binary for the RP2040 handset: a 240×280 ST7789 panel, an analog
//! stick, two buttons, a BMI160/BMM150 heading sensor and a serial link to
//! a companion device that supplies time, location, weather and photos.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, SPI0, UART0};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use handset_core::{CompanionLink, Handset, SharedBus};
use handset_display::{GraphicsCanvas, St7789};
use handset_drivers::sensor::{bmi160, Bmi160};
use handset_hal_rp2040::{AdcJoystick, ButtonLatch, ButtonLines};

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Panel behind the display lock
pub type Panel = GraphicsCanvas<St7789<Spi<'static, SPI0, spi::Blocking>, Output<'static>, Output<'static>>>;

/// Heading sensor behind the bus lock
pub type Compass = Bmi160<I2c<'static, I2C0, i2c::Async>, Delay>;

/// Shared context handed to every task
pub type Board = Handset<CriticalSectionRawMutex, Panel, BufferedUart, Compass>;

/// Panel SPI clock
const PANEL_SPI_HZ: u32 = 62_500_000;

// UART buffers; a photo row is 480 bytes
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

static BOARD: StaticCell<Board> = StaticCell::new();
static BUTTON_LATCH: ButtonLatch = ButtonLatch::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Handset firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load();
    info!("Link at {} baud", config.link.baud);

    // Companion link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baud;
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 1024]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config)
        .into_buffered(Irqs, tx_buf, rx_buf);

    // Heading sensor on I2C0 (SCL GPIO5, SDA GPIO4)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let compass = Bmi160::new(i2c, Delay, bmi160::DEFAULT_ADDRESS);

    // Panel
    let mut spi_config = spi::Config::default();
    spi_config.frequency = PANEL_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let dc = Output::new(p.PIN_16, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let mut rst = Output::new(p.PIN_20, Level::High);
    let mut backlight = Output::new(p.PIN_21, Level::Low);

    rst.set_low();
    Timer::after_millis(10).await;
    rst.set_high();
    Timer::after_millis(120).await;

    let mut panel = St7789::new(spi, dc, cs);
    match panel.init(&mut Delay) {
        Ok(()) => info!("Panel initialized"),
        Err(e) => error!("Panel init failed: {}", e),
    }
    backlight.set_high();
    // Reset and backlight stay driven for the life of the firmware
    core::mem::forget(rst);
    core::mem::forget(backlight);

    // Stick on ADC0/ADC1
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let stick_x = Channel::new_pin(p.PIN_26, Pull::None);
    let stick_y = Channel::new_pin(p.PIN_27, Pull::None);
    let stick = AdcJoystick::new(adc, stick_x, stick_y, config.stick.centered());

    // Buttons, active low
    let select = Input::new(p.PIN_14, Pull::Up);
    let home = Input::new(p.PIN_15, Pull::Up);
    let lines = ButtonLines::new(select, home);

    let bus = SharedBus::new(CompanionLink::new(uart), compass);
    let board: &'static Board = BOARD.init(Handset::new(GraphicsCanvas::new(panel), bus, config));

    info!("Spawning tasks...");

    spawner
        .spawn(tasks::button_watch_task(board, lines, &BUTTON_LATCH))
        .unwrap();
    spawner.spawn(tasks::input_task(board, &BUTTON_LATCH)).unwrap();
    spawner.spawn(tasks::home_task(board, stick)).unwrap();

    info!("All tasks spawned, handset running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
