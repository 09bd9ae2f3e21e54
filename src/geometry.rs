use crate::Sample;

/// Maps a reading onto a bar height in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BarGeometry {
    min: Sample,
    max: Sample,
    max_height: u16,
}

impl BarGeometry {
    /// `max` must be greater than `min`; [`ChartConfig::validate`](crate::ChartConfig::validate)
    /// guarantees that for every chart.
    pub const fn new(min: Sample, max: Sample, max_height: u16) -> Self {
        Self {
            min,
            max,
            max_height,
        }
    }

    pub fn max_height(&self) -> u16 {
        self.max_height
    }

    /// Linear between `min` and `max`, truncating toward zero.
    pub fn height(&self, value: Sample) -> u16 {
        if value <= self.min {
            0
        } else if value >= self.max {
            self.max_height
        } else {
            let span = u32::from(self.max - self.min);
            let offset = u32::from(value - self.min);
            (offset * u32::from(self.max_height) / span) as u16
        }
    }
}
