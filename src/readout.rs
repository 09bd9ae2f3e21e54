use arrayvec::ArrayString;
use core::fmt::Write;

use crate::Sample;

/// Longest line the readout strip shows.
pub type ReadoutText = ArrayString<32>;

/// One measurement of every sensor channel.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub co2: Sample,
    pub temperature: f32,
    pub humidity: f32,
}

impl Reading {
    /// Substituted when the sensor had nothing new this period.
    pub const SENTINEL: Reading = Reading {
        co2: 0,
        temperature: 0.0,
        humidity: 0.0,
    };

    pub fn text(&self) -> ReadoutText {
        let mut buf = ReadoutText::new();
        let _ = write!(
            &mut buf,
            "{} ppm {:.1}C {:.0}%",
            self.co2, self.temperature, self.humidity
        );
        buf
    }
}

pub fn co2_text(co2: Sample) -> ReadoutText {
    let mut buf = ReadoutText::new();
    let _ = write!(&mut buf, "CO2: {} ppm", co2);
    buf
}
