use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyleBuilder},
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};

use crate::surface::Surface;

/// [`Surface`] over any `embedded-graphics` draw target, e.g. a display
/// driver's frame buffer.
///
/// Draw errors are dropped: buffered targets never fail and a failed direct
/// write only costs pixels that the next cycle repaints.
pub struct GraphicsSurface<D>
where
    D: DrawTarget,
{
    target: D,
    on: D::Color,
    off: D::Color,
    font: &'static MonoFont<'static>,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget,
{
    pub fn new(target: D, on: D::Color, off: D::Color) -> Self {
        Self {
            target,
            on,
            off,
            font: &FONT_6X10,
        }
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn color(&self, on: bool) -> D::Color {
        if on {
            self.on
        } else {
            self.off
        }
    }
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget,
{
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool) {
        let area = Rectangle::new(
            Point::new(column, row_start),
            Size::new(1, u32::from(length)),
        );
        let color = self.color(on);
        let _ = self.target.fill_solid(&area, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool) {
        let area = Rectangle::new(
            Point::new(x, y),
            Size::new(u32::from(width), u32::from(height)),
        );
        let color = self.color(on);
        let _ = self.target.fill_solid(&area, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(self.on)
            .background_color(self.off)
            .build();
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target);
    }
}
