use crate::readout::Reading;

/// Anything that produces CO2 / temperature / humidity readings.
pub trait Sensor {
    fn has_new_reading(&mut self) -> bool;

    /// `None` when the read itself failed.
    fn read_value(&mut self) -> Option<Reading>;
}

/// The fresh reading, or `None` when the sensor had nothing this period.
///
/// A real 0 ppm reading comes back as `Some`, so callers can tell it apart
/// from a missed period.
pub fn read_if_ready<S: Sensor>(sensor: &mut S) -> Option<Reading> {
    if !sensor.has_new_reading() {
        #[cfg(feature = "defmt")]
        defmt::warn!("sensor: no new reading");
        return None;
    }
    let reading = sensor.read_value();
    #[cfg(feature = "defmt")]
    if reading.is_none() {
        defmt::warn!("sensor: read failed");
    }
    reading
}

/// The next reading, or [`Reading::SENTINEL`] when there is none this period.
///
/// The sentinel shows up in the chart as a drop to zero.
pub fn next_reading<S: Sensor>(sensor: &mut S) -> Reading {
    read_if_ready(sensor).unwrap_or(Reading::SENTINEL)
}
