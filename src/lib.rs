#![cfg_attr(not(test), no_std)]

pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod leds;
pub mod readout;
pub mod rendering;
pub mod scd30;
pub mod sensor;
pub mod surface;

#[cfg(test)]
mod testing;

pub use chart::{HistoryChart, Redraw};
pub use config::{ChartConfig, Thresholds};
pub use error::{ConfigError, Scd30Error};
pub use geometry::BarGeometry;
pub use history::RollingBuffer;
pub use leds::{AlertLevel, SelfCheckFailure, StatusLeds};
pub use readout::Reading;
pub use rendering::GraphicsSurface;
pub use sensor::Sensor;
pub use surface::{NullSurface, Surface};

/// A single CO2 reading in ppm.
pub type Sample = u16;
