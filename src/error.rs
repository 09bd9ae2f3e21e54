use core::fmt;

/// Rejected [`ChartConfig`](crate::ChartConfig) values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max` must be strictly greater than `min`.
    EmptyRange { min: u16, max: u16 },
    ZeroHeight,
    ZeroSampleInterval,
    /// A readout strip needs a glyph width to clip its text.
    ZeroCharWidth,
    /// The grid interval is shorter than one sample, so no column could carry a gridline.
    GridIntervalTooShort { grid: u16, sample: u16 },
    /// The yellow band must start below the red one.
    ThresholdsOutOfOrder { yellow: u16, red: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRange { min, max } => {
                write!(f, "bar range is empty: min {} >= max {}", min, max)
            }
            ConfigError::ZeroHeight => f.write_str("chart height is zero"),
            ConfigError::ZeroSampleInterval => f.write_str("sample interval is zero"),
            ConfigError::ZeroCharWidth => f.write_str("readout glyph width is zero"),
            ConfigError::GridIntervalTooShort { grid, sample } => write!(
                f,
                "grid interval {}s is shorter than sample interval {}s",
                grid, sample
            ),
            ConfigError::ThresholdsOutOfOrder { yellow, red } => write!(
                f,
                "yellow threshold {} must be below red threshold {}",
                yellow, red
            ),
        }
    }
}

/// Errors returned by the [`Scd30`](crate::scd30::Scd30) driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scd30Error<E> {
    /// The underlying bus transaction failed.
    I2c(E),
    /// A received word did not match its checksum.
    Crc { expected: u8, received: u8 },
    /// The measurement interval must be within 2..=1800 seconds.
    InvalidInterval(u16),
}

impl<E> From<E> for Scd30Error<E> {
    fn from(e: E) -> Self {
        Scd30Error::I2c(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Scd30Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scd30Error::I2c(e) => write!(f, "i2c error: {:?}", e),
            Scd30Error::Crc { expected, received } => write!(
                f,
                "crc mismatch: expected {:#04x}, received {:#04x}",
                expected, received
            ),
            Scd30Error::InvalidInterval(s) => {
                write!(f, "measurement interval {}s out of range", s)
            }
        }
    }
}
