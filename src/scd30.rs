//! Blocking driver for the Sensirion SCD30 NDIR CO2 sensor.
//!
//! Only what continuous measurement needs: start, interval, data ready,
//! read, firmware version and soft reset. Every 16-bit word on the wire is
//! big endian and followed by a CRC-8 byte.

use byteorder::{BigEndian, ByteOrder};
use crc::{Crc, CRC_8_NRSC_5};
use embedded_hal::blocking::i2c::{Read, Write};

use crate::error::Scd30Error;
use crate::readout::Reading;
use crate::sensor::Sensor;

pub const ADDRESS: u8 = 0x61;

/// Sensirion's CRC-8: polynomial 0x31, init 0xff, no reflection, no final xor.
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_NRSC_5);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
enum Command {
    StartContinuousMeasurement = 0x0010,
    SetMeasurementInterval = 0x4600,
    GetDataReady = 0x0202,
    ReadMeasurement = 0x0300,
    ReadFirmwareVersion = 0xd100,
    SoftReset = 0xd304,
}

pub struct Scd30<I2C> {
    i2c: I2C,
}

impl<I2C, E> Scd30<I2C>
where
    I2C: Write<Error = E> + Read<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// `pressure_mbar` of 0 disables pressure compensation.
    pub fn start_continuous_measurement(
        &mut self,
        pressure_mbar: u16,
    ) -> Result<(), Scd30Error<E>> {
        self.write_with_argument(Command::StartContinuousMeasurement, pressure_mbar)
    }

    pub fn set_measurement_interval(&mut self, seconds: u16) -> Result<(), Scd30Error<E>> {
        if !(2..=1800).contains(&seconds) {
            return Err(Scd30Error::InvalidInterval(seconds));
        }
        self.write_with_argument(Command::SetMeasurementInterval, seconds)
    }

    pub fn data_ready(&mut self) -> Result<bool, Scd30Error<E>> {
        self.write_command(Command::GetDataReady)?;
        let mut word = [0u8; 2];
        self.read_words(&mut word)?;
        Ok(BigEndian::read_u16(&word) == 1)
    }

    pub fn read_measurement(&mut self) -> Result<Reading, Scd30Error<E>> {
        self.write_command(Command::ReadMeasurement)?;
        let mut data = [0u8; 12];
        self.read_words(&mut data)?;

        let co2 = BigEndian::read_f32(&data[0..4]);
        let temperature = BigEndian::read_f32(&data[4..8]);
        let humidity = BigEndian::read_f32(&data[8..12]);
        Ok(Reading {
            // `as` saturates, which also maps NaN to 0
            co2: (co2 + 0.5) as u16,
            temperature,
            humidity,
        })
    }

    /// `(major, minor)`.
    pub fn firmware_version(&mut self) -> Result<(u8, u8), Scd30Error<E>> {
        self.write_command(Command::ReadFirmwareVersion)?;
        let mut word = [0u8; 2];
        self.read_words(&mut word)?;
        Ok((word[0], word[1]))
    }

    pub fn soft_reset(&mut self) -> Result<(), Scd30Error<E>> {
        self.write_command(Command::SoftReset)
    }

    fn write_command(&mut self, command: Command) -> Result<(), Scd30Error<E>> {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, command as u16);
        self.i2c.write(ADDRESS, &buf)?;
        Ok(())
    }

    fn write_with_argument(&mut self, command: Command, argument: u16) -> Result<(), Scd30Error<E>> {
        let mut buf = [0u8; 5];
        BigEndian::write_u16(&mut buf[0..2], command as u16);
        BigEndian::write_u16(&mut buf[2..4], argument);
        buf[4] = crc8(&buf[2..4]);
        self.i2c.write(ADDRESS, &buf)?;
        Ok(())
    }

    /// Reads `data.len() / 2` words, checking and stripping their CRC bytes.
    fn read_words(&mut self, data: &mut [u8]) -> Result<(), Scd30Error<E>> {
        let mut raw = [0u8; 18];
        let raw = &mut raw[..data.len() / 2 * 3];
        self.i2c.read(ADDRESS, raw)?;
        for (word, chunk) in data.chunks_exact_mut(2).zip(raw.chunks_exact(3)) {
            let expected = crc8(&chunk[..2]);
            if expected != chunk[2] {
                return Err(Scd30Error::Crc {
                    expected,
                    received: chunk[2],
                });
            }
            word.copy_from_slice(&chunk[..2]);
        }
        Ok(())
    }
}

impl<I2C, E> Sensor for Scd30<I2C>
where
    I2C: Write<Error = E> + Read<Error = E>,
{
    fn has_new_reading(&mut self) -> bool {
        self.data_ready().unwrap_or(false)
    }

    fn read_value(&mut self) -> Option<Reading> {
        self.read_measurement().ok()
    }
}

pub(crate) fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}
