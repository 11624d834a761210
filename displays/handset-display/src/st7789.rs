//! ST7789 TFT Display Driver
//!
//! Driver for the 240x280 ST7789 panel over a 4-wire SPI bus (SCK/MOSI plus
//! DC and CS pins). The controller RAM is 240x320; the visible window starts
//! at row 20. Pixels are written straight to panel RAM, there is no frame
//! buffer.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics::Pixel;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::canvas::DisplayError;
use crate::geometry::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// First visible controller row
const ROW_OFFSET: u16 = 20;

/// Pixels pushed per SPI write when filling
const CHUNK_PIXELS: usize = 32;

/// ST7789 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// ST7789 panel driver
pub struct St7789<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
    initialized: bool,
}

impl<SPI, DC, CS> St7789<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new driver; call [`St7789::init`] before drawing
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self {
            spi,
            dc,
            cs,
            initialized: false,
        }
    }

    /// Run the power-up sequence
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(10);
        // 16 bits per pixel
        self.command(cmd::COLMOD, &[0x55])?;
        // Row/column order: top-left origin, RGB
        self.command(cmd::MADCTL, &[0x00])?;
        self.command(cmd::INVON, &[])?;
        delay.delay_ms(10);
        self.command(cmd::NORON, &[])?;
        delay.delay_ms(10);
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(10);

        self.initialized = true;
        Ok(())
    }

    /// Turn the panel output on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPON } else { cmd::DISPOFF }, &[])
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        let result = self.command_selected(command, params);
        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        result
    }

    fn command_selected(&mut self, command: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(&[command])
            .map_err(|_| DisplayError::Communication)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| DisplayError::Communication)?;
            self.spi
                .write(params)
                .map_err(|_| DisplayError::Communication)?;
        }
        self.spi.flush().map_err(|_| DisplayError::Communication)
    }

    /// Select the inclusive RAM window and start a memory write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let y0 = y0 + ROW_OFFSET;
        let y1 = y1 + ROW_OFFSET;
        self.command(
            cmd::CASET,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )?;
        self.command(
            cmd::RASET,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )?;
        self.command(cmd::RAMWR, &[])
    }

    /// Stream pixel data into the current window
    fn write_pixels<I>(&mut self, colors: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = u16>,
    {
        self.cs.set_low().map_err(|_| DisplayError::Communication)?;
        self.dc.set_high().map_err(|_| DisplayError::Communication)?;

        let mut buf = [0u8; CHUNK_PIXELS * 2];
        let mut len = 0;
        let mut result = Ok(());
        for raw in colors {
            buf[len] = (raw >> 8) as u8;
            buf[len + 1] = raw as u8;
            len += 2;
            if len == buf.len() {
                result = self.spi.write(&buf).map_err(|_| DisplayError::Communication);
                if result.is_err() {
                    break;
                }
                len = 0;
            }
        }
        if result.is_ok() && len > 0 {
            result = self
                .spi
                .write(&buf[..len])
                .map_err(|_| DisplayError::Communication);
        }
        if result.is_ok() {
            result = self.spi.flush().map_err(|_| DisplayError::Communication);
        }

        self.cs.set_high().map_err(|_| DisplayError::Communication)?;
        result
    }

    fn check_ready(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Clip an area to the panel, as an inclusive window
    fn window(area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let visible = area.intersection(&Rectangle::new(
            embedded_graphics::geometry::Point::zero(),
            Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
        ));
        let bottom_right = visible.bottom_right()?;
        Some((
            visible.top_left.x as u16,
            visible.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        ))
    }
}

impl<SPI, DC, CS> OriginDimensions for St7789<SPI, DC, CS> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl<SPI, DC, CS> DrawTarget for St7789<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.check_ready()?;
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= SCREEN_WIDTH || p.y >= SCREEN_HEIGHT {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_pixels([color.into_storage()])?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.check_ready()?;
        let Some((x0, y0, x1, y1)) = Self::window(area) else {
            return Ok(());
        };

        // Whole area visible: stream it in one window
        if x0 as i32 == area.top_left.x
            && y0 as i32 == area.top_left.y
            && (x1 - x0 + 1) as u32 == area.size.width
            && (y1 - y0 + 1) as u32 == area.size.height
        {
            self.set_window(x0, y0, x1, y1)?;
            return self.write_pixels(colors.into_iter().map(|c| c.into_storage()));
        }

        // Partially visible: fall back to per-pixel clipping
        let pixels = area
            .points()
            .zip(colors)
            .map(|(p, c)| Pixel(p, c));
        self.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.check_ready()?;
        let Some((x0, y0, x1, y1)) = Self::window(area) else {
            return Ok(());
        };
        let count = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize;
        self.set_window(x0, y0, x1, y1)?;
        let raw = color.into_storage();
        self.write_pixels(core::iter::repeat(raw).take(count))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::geometry::Point;
    use embedded_graphics::pixelcolor::raw::RawU16;
    use std::vec::Vec;

    /// Byte stream seen by the panel, tagged with the DC level
    #[derive(Default)]
    struct Wire {
        dc_high: bool,
        commands: Vec<u8>,
        data: Vec<u8>,
    }

    struct Bus<'a>(&'a core::cell::RefCell<Wire>);
    struct Dc<'a>(&'a core::cell::RefCell<Wire>);
    struct Cs;

    impl embedded_hal::spi::ErrorType for Bus<'_> {
        type Error = Infallible;
    }

    impl SpiBus<u8> for Bus<'_> {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            let mut wire = self.0.borrow_mut();
            if wire.dc_high {
                wire.data.extend_from_slice(words);
            } else {
                wire.commands.extend_from_slice(words);
            }
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for Dc<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Dc<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for Cs {
        type Error = Infallible;
    }

    impl OutputPin for Cs {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn rgb(raw: u16) -> Rgb565 {
        Rgb565::from(RawU16::new(raw))
    }

    #[test]
    fn test_draw_before_init_fails() {
        let wire = core::cell::RefCell::new(Wire::default());
        let mut panel = St7789::new(Bus(&wire), Dc(&wire), Cs);
        let area = Rectangle::new(Point::zero(), Size::new(1, 1));
        assert_eq!(
            panel.fill_solid(&area, rgb(0xFFFF)),
            Err(DisplayError::NotInitialized)
        );
    }

    #[test]
    fn test_init_sequence() {
        let wire = core::cell::RefCell::new(Wire::default());
        let mut panel = St7789::new(Bus(&wire), Dc(&wire), Cs);
        panel.init(&mut NoDelay).unwrap();

        let wire = wire.borrow();
        assert_eq!(
            wire.commands,
            [
                cmd::SWRESET,
                cmd::SLPOUT,
                cmd::COLMOD,
                cmd::MADCTL,
                cmd::INVON,
                cmd::NORON,
                cmd::DISPON
            ]
        );
        assert_eq!(wire.data, [0x55, 0x00]);
    }

    #[test]
    fn test_fill_applies_row_offset_and_clips() {
        let wire = core::cell::RefCell::new(Wire::default());
        let mut panel = St7789::new(Bus(&wire), Dc(&wire), Cs);
        panel.init(&mut NoDelay).unwrap();
        wire.borrow_mut().commands.clear();
        wire.borrow_mut().data.clear();

        // Two pixels hang off the right edge
        let area = Rectangle::new(Point::new(238, 0), Size::new(4, 1));
        panel.fill_solid(&area, rgb(0xF800)).unwrap();

        let wire = wire.borrow();
        assert_eq!(wire.commands, [cmd::CASET, cmd::RASET, cmd::RAMWR]);
        assert_eq!(
            wire.data,
            [0, 238, 0, 239, 0, 20, 0, 20, 0xF8, 0x00, 0xF8, 0x00]
        );
    }

    #[test]
    fn test_offscreen_fill_is_dropped() {
        let wire = core::cell::RefCell::new(Wire::default());
        let mut panel = St7789::new(Bus(&wire), Dc(&wire), Cs);
        panel.init(&mut NoDelay).unwrap();
        wire.borrow_mut().commands.clear();

        let area = Rectangle::new(Point::new(-40, 10), Size::new(20, 20));
        panel.fill_solid(&area, rgb(0xFFFF)).unwrap();
        assert!(wire.borrow().commands.is_empty());
    }
}
