//! SSD1306 OLED backend
//!
//! Character cells are 6×10 pixels, giving 21 columns × 6 rows on the
//! 128×64 panel. Drawing goes to the driver's frame buffer; only
//! [`DisplayBackend::flush`] touches the bus.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use pocketcalc_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

use crate::board::OLED_I2C_ADDRESS;

const GLYPH_WIDTH: u32 = 6;
const GLYPH_HEIGHT: u32 = 10;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Text-cell backend over a buffered SSD1306
pub struct Oled<I2C> {
    driver: Driver<I2C>,
    ready: bool,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Bring up the panel
    ///
    /// A panel that does not answer is left uninitialised; every flush
    /// retries the init sequence until it does.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_I2C_ADDRESS);
        let driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let mut oled = Self {
            driver,
            ready: false,
        };
        oled.ready = oled.driver.init().is_ok();
        oled
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn origin(row: u8, col: u8) -> Result<Point, DisplayError> {
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(Point::new(
            (col as u32 * GLYPH_WIDTH) as i32,
            (row as u32 * GLYPH_HEIGHT) as i32,
        ))
    }

    fn draw_with(
        &mut self,
        origin: Point,
        text: &str,
        style: MonoTextStyle<'static, BinaryColor>,
    ) -> Result<(), DisplayError> {
        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(&mut self.driver)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }
}

fn text_style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color)
        .build()
}

impl<I2C> DisplayBackend for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.driver.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let origin = Self::origin(row, col)?;
        self.draw_with(origin, text, text_style(BinaryColor::On))
    }

    fn draw_inverted(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let origin = Self::origin(row, col)?;
        let width = text.chars().count() as u32 * GLYPH_WIDTH;
        Rectangle::new(origin, Size::new(width, GLYPH_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.driver)
            .map_err(|_| DisplayError::Communication)?;
        self.draw_with(origin, text, text_style(BinaryColor::Off))
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            // Init wipes the frame buffer, so this frame is lost either way
            self.ready = self.driver.init().is_ok();
            return Err(DisplayError::NotInitialized);
        }
        match self.driver.flush() {
            Ok(()) => Ok(()),
            Err(_) => {
                self.ready = false;
                Err(DisplayError::Communication)
            }
        }
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
