//! ST7789V2 LCD bring-up (M5StickC Plus2, 135x240 over SPI2).
//!
//! Returns an `embedded-graphics` draw target; the panel layout lives in
//! [`LcdDisplay`](crate::adapters::display::LcdDisplay).  The backlight is
//! switched on by `hw_init`.

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyIOPin, Gpio5, Gpio12, Gpio13, Gpio14, Gpio15, Output, PinDriver};
use esp_idf_hal::spi::config::Config;
use esp_idf_hal::spi::{SPI2, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::FromValueType;
use log::info;
use mipidsi::Builder;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};

use crate::error::{Error, Result};
use crate::pins;

/// Native panel size (portrait).
const PANEL_WIDTH: u16 = 135;
const PANEL_HEIGHT: u16 = 240;
/// The 135x240 glass sits inside the controller's 240x320 RAM.
const PANEL_X_OFFSET: u16 = 52;
const PANEL_Y_OFFSET: u16 = 40;

/// Scratch buffer size for batching pixel writes over SPI.
pub const SPI_BUFFER_LEN: usize = 512;

pub type Lcd<'d> = mipidsi::Display<
    SpiInterface<'d, SpiDeviceDriver<'d, SpiDriver<'d>>, PinDriver<'d, Gpio14, Output>>,
    ST7789,
    PinDriver<'d, Gpio12, Output>,
>;

/// Pins wired to the panel (see [`pins`](crate::pins)).
pub struct LcdPins {
    pub sclk: Gpio13,
    pub mosi: Gpio15,
    pub cs: Gpio5,
    pub dc: Gpio14,
    pub rst: Gpio12,
}

/// Bring up SPI2 and run the ST7789 init sequence, landscape orientation.
pub fn init_lcd<'d>(spi: SPI2, pins: LcdPins, buffer: &'d mut [u8]) -> Result<Lcd<'d>> {
    let bus = SpiDriver::new(spi, pins.sclk, pins.mosi, None::<AnyIOPin>, &SpiDriverConfig::new())
        .map_err(|_| Error::Init("LCD SPI bus"))?;
    let device = SpiDeviceDriver::new(bus, Some(pins.cs), &Config::new().baudrate(40.MHz().into()))
        .map_err(|_| Error::Init("LCD SPI device"))?;
    let dc = PinDriver::output(pins.dc).map_err(|_| Error::Init("LCD DC pin"))?;
    let rst = PinDriver::output(pins.rst).map_err(|_| Error::Init("LCD reset pin"))?;

    let lcd = Builder::new(ST7789, SpiInterface::new(device, dc, buffer))
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .display_offset(PANEL_X_OFFSET, PANEL_Y_OFFSET)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .reset_pin(rst)
        .init(&mut Ets)
        .map_err(|_| Error::Init("ST7789 init sequence"))?;

    info!(
        "LCD: ST7789 ready ({}x{} landscape, sclk={} mosi={} cs={} dc={} rst={})",
        PANEL_HEIGHT,
        PANEL_WIDTH,
        pins::LCD_SCLK_GPIO,
        pins::LCD_MOSI_GPIO,
        pins::LCD_CS_GPIO,
        pins::LCD_DC_GPIO,
        pins::LCD_RST_GPIO,
    );
    Ok(lcd)
}
