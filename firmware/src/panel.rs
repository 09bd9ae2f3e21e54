use core::fmt::Debug;

use co2_history_chart::{GraphicsSurface, Surface};
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use epd_waveshare::color::Color;
use epd_waveshare::epd4in2::{Display4in2, Epd4in2};
use epd_waveshare::graphics::{Display, DisplayRotation};
use epd_waveshare::prelude::*;

use crate::config::{FULL_REFRESH_EVERY, HEIGHT, WIDTH};

/// The 4.2" e-paper panel as a chart [`Surface`].
///
/// Drawing goes into the in-memory frame; `present` pushes the frame with the
/// quick LUT and falls back to a full refresh every `FULL_REFRESH_EVERY` frames.
pub struct Panel<SPI, CS, BUSY, DC, RST, DELAY> {
    driver: Epd4in2<SPI, CS, BUSY, DC, RST, DELAY>,
    spi: SPI,
    delay: DELAY,
    canvas: GraphicsSurface<Display4in2>,
    frames: u16,
}

impl<SPI, CS, BUSY, DC, RST, DELAY, E> Panel<SPI, CS, BUSY, DC, RST, DELAY>
where
    E: Debug,
    SPI: embedded_hal::blocking::spi::Write<u8, Error = E>,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayMs<u8>,
{
    pub fn new(driver: Epd4in2<SPI, CS, BUSY, DC, RST, DELAY>, spi: SPI, delay: DELAY) -> Self {
        let mut display = Display4in2::default();
        display.set_rotation(DisplayRotation::Rotate0);
        let canvas =
            GraphicsSurface::new(display, Color::Black, Color::White).with_font(&FONT_10X20);
        let mut s = Self {
            driver,
            spi,
            delay,
            canvas,
            frames: 0,
        };
        s.canvas.target_mut().clear_buffer(Color::White);
        s.flush(RefreshLut::Full);
        s
    }

    pub fn render_boot(&mut self) {
        self.canvas.target_mut().clear_buffer(Color::White);
        self.canvas.draw_text(WIDTH / 2 - 70, HEIGHT / 2, "Booting");
        self.flush(RefreshLut::Full);
    }

    fn flush(&mut self, lut: RefreshLut) {
        if let Err(e) = self.driver.set_lut(&mut self.spi, Some(lut)) {
            defmt::warn!("epd: set lut failed: {:?}", defmt::Debug2Format(&e));
        }
        if let Err(e) = self.driver.update_and_display_frame(
            &mut self.spi,
            self.canvas.target().buffer(),
            &mut self.delay,
        ) {
            defmt::warn!("epd: frame update failed: {:?}", defmt::Debug2Format(&e));
        }
    }
}

impl<SPI, CS, BUSY, DC, RST, DELAY, E> Surface for Panel<SPI, CS, BUSY, DC, RST, DELAY>
where
    E: Debug,
    SPI: embedded_hal::blocking::spi::Write<u8, Error = E>,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayMs<u8>,
{
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool) {
        self.canvas.draw_vertical_run(column, row_start, length, on);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool) {
        self.canvas.fill_rect(x, y, width, height, on);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.canvas.draw_text(x, y, text);
    }

    fn present(&mut self) {
        self.frames += 1;
        let lut = if self.frames >= FULL_REFRESH_EVERY {
            self.frames = 0;
            RefreshLut::Full
        } else {
            RefreshLut::Quick
        };
        self.flush(lut);
    }
}
