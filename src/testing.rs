//! Surfaces used by the unit tests.

use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run {
        column: i32,
        row: i32,
        length: u16,
        on: bool,
    },
    Fill {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        on: bool,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
    },
    Present,
}

/// Remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Drains the log and keeps only the vertical runs.
    pub fn take_runs(&mut self) -> Vec<Command> {
        self.take()
            .into_iter()
            .filter(|c| matches!(c, Command::Run { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool) {
        self.commands.push(Command::Run {
            column,
            row: row_start,
            length,
            on,
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool) {
        self.commands.push(Command::Fill {
            x,
            y,
            width,
            height,
            on,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.commands.push(Command::Text {
            x,
            y,
            text: text.into(),
        });
    }

    fn present(&mut self) {
        self.commands.push(Command::Present);
    }
}

/// A monochrome frame buffer that panics on out-of-bounds writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    texts: Vec<(i32, i32, String)>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
            texts: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
        self.texts.clear();
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.pixels[self.offset(x, y)]
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height,
            "pixel ({}, {}) outside {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width + x as usize
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        let offset = self.offset(x, y);
        self.pixels[offset] = on;
    }
}

impl Surface for PixelSurface {
    fn draw_vertical_run(&mut self, column: i32, row_start: i32, length: u16, on: bool) {
        for row in row_start..row_start + i32::from(length) {
            self.set(column, row, on);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, on: bool) {
        for row in y..y + i32::from(height) {
            for column in x..x + i32::from(width) {
                self.set(column, row, on);
            }
        }
        self.texts.retain(|&(tx, ty, _)| {
            !(tx >= x && tx < x + i32::from(width) && ty >= y && ty < y + i32::from(height))
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.offset(x, y);
        self.texts.push((x, y, text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_surface_tracks_runs() {
        let mut surface = PixelSurface::new(4, 4);
        surface.draw_vertical_run(1, 1, 3, true);
        surface.draw_vertical_run(1, 2, 1, false);
        assert!(surface.pixel(1, 1));
        assert!(!surface.pixel(1, 2));
        assert!(surface.pixel(1, 3));
    }
}
