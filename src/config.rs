use crate::error::ConfigError;
use crate::geometry::BarGeometry;
use crate::Sample;

/// CO2 alert bands shared by the status LEDs and the chart's threshold lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Readings above this (and below `red`) are yellow.
    pub yellow: Sample,
    /// Readings at or above this are red.
    pub red: Sample,
}

impl Thresholds {
    pub const fn new(yellow: Sample, red: Sample) -> Self {
        Self { yellow, red }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(1000, 1500)
    }
}

/// Layout and scaling of a [`HistoryChart`](crate::HistoryChart).
///
/// The chart width is the const generic `W` of the chart itself; everything
/// else lives here so the firmware can describe the whole chart in one `const`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChartConfig {
    /// Top-left pixel of the bar area.
    pub origin: (i32, i32),
    /// Bar area height in pixels, which is also the tallest possible bar.
    pub height: u16,
    /// Readings at or below this draw no bar.
    pub min: Sample,
    /// Readings at or above this draw a full height bar.
    pub max: Sample,
    pub thresholds: Thresholds,
    /// Draw dotted horizontal lines at the yellow and red thresholds.
    pub threshold_lines: bool,
    pub sample_interval_s: u16,
    /// Spacing of the dotted vertical time markers, `None` disables them.
    pub grid_interval_s: Option<u16>,
    /// Height of the text strip directly above the bar area, 0 disables the readout.
    pub text_height: u16,
    /// Advance of one readout glyph, text is clipped to what fits the chart width.
    pub char_width: u16,
    /// With `false` nothing is drawn but the window keeps rolling.
    pub display_enabled: bool,
}

impl ChartConfig {
    pub const fn new(origin: (i32, i32), height: u16, min: Sample, max: Sample) -> Self {
        Self {
            origin,
            height,
            min,
            max,
            thresholds: Thresholds::new(1000, 1500),
            threshold_lines: true,
            sample_interval_s: 15,
            grid_interval_s: Some(300),
            text_height: 10,
            char_width: 6,
            display_enabled: true,
        }
    }

    pub const fn with_thresholds(mut self, thresholds: Thresholds, lines: bool) -> Self {
        self.thresholds = thresholds;
        self.threshold_lines = lines;
        self
    }

    pub const fn with_intervals(mut self, sample_s: u16, grid_s: Option<u16>) -> Self {
        self.sample_interval_s = sample_s;
        self.grid_interval_s = grid_s;
        self
    }

    pub const fn with_text_height(mut self, text_height: u16) -> Self {
        self.text_height = text_height;
        self
    }

    pub const fn with_char_width(mut self, char_width: u16) -> Self {
        self.char_width = char_width;
        self
    }

    pub const fn with_display(mut self, enabled: bool) -> Self {
        self.display_enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max <= self.min {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.sample_interval_s == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if self.text_height > 0 && self.char_width == 0 {
            return Err(ConfigError::ZeroCharWidth);
        }
        if let Some(grid) = self.grid_interval_s {
            if grid < self.sample_interval_s {
                return Err(ConfigError::GridIntervalTooShort {
                    grid,
                    sample: self.sample_interval_s,
                });
            }
        }
        if self.thresholds.yellow >= self.thresholds.red {
            return Err(ConfigError::ThresholdsOutOfOrder {
                yellow: self.thresholds.yellow,
                red: self.thresholds.red,
            });
        }
        Ok(())
    }

    /// Number of columns between two gridlines.
    pub fn grid_spacing(&self) -> Option<usize> {
        let grid = self.grid_interval_s?;
        match (grid / self.sample_interval_s.max(1)) as usize {
            0 => None,
            n => Some(n),
        }
    }

    pub fn geometry(&self) -> BarGeometry {
        BarGeometry::new(self.min, self.max, self.height)
    }
}

impl Default for ChartConfig {
    /// 40px tall bars from 400 to 2000 ppm, one sample every 15s, a gridline every 5 minutes.
    fn default() -> Self {
        Self::new((0, 10), 40, 400, 2000)
    }
}
