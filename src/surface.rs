/// Pixel primitives the chart draws with.
///
/// Coordinates are absolute pixels on the panel, `on` is the foreground colour.
/// Implementations swallow their own transport errors: a frame that failed to
/// draw is simply redrawn by the next cycle's overlay and readout.
pub trait Surface {
    /// Sets `length` pixels of `column` starting at `row_start` and going down.
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool);

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool);

    /// Renders `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Flushes buffered pixels to the physical display.
    fn present(&mut self) {}
}

/// Stands in for a panel that is not fitted.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw_vertical_run(&mut self, _column: i32, _row_start: i32, _length: u16, _on: bool) {}

    fn fill_rect(&mut self, _x: i32, _y: i32, _width: u16, _height: u16, _on: bool) {}

    fn draw_text(&mut self, _x: i32, _y: i32, _text: &str) {}
}

/// `None` is a display that was not detected at boot.
impl<S: Surface> Surface for Option<S> {
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool) {
        if let Some(surface) = self {
            surface.draw_vertical_run(column, row_start, length, on);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool) {
        if let Some(surface) = self {
            surface.fill_rect(x, y, width, height, on);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        if let Some(surface) = self {
            surface.draw_text(x, y, text);
        }
    }

    fn present(&mut self) {
        if let Some(surface) = self {
            surface.present();
        }
    }
}
