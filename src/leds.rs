use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::Thresholds;
use crate::Sample;

/// Which of the three status LEDs a reading lights.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertLevel {
    Green,
    Yellow,
    Red,
}

impl AlertLevel {
    pub fn classify(co2: Sample, thresholds: &Thresholds) -> Self {
        if co2 >= thresholds.red {
            AlertLevel::Red
        } else if co2 > thresholds.yellow {
            AlertLevel::Yellow
        } else {
            AlertLevel::Green
        }
    }
}

/// Why the power-on self check stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfCheckFailure {
    /// SCL or SDA does not idle high.
    PullUp,
    /// Nothing acknowledges at the sensor address.
    Bus,
    /// The sensor answered but would not start measuring.
    SensorInit,
}

impl SelfCheckFailure {
    /// `(steady, blinking)`: the LED held on, if any, and the LED that blinks.
    pub fn pattern(self) -> (Option<AlertLevel>, AlertLevel) {
        match self {
            SelfCheckFailure::PullUp => (None, AlertLevel::Red),
            SelfCheckFailure::Bus => (Some(AlertLevel::Red), AlertLevel::Yellow),
            SelfCheckFailure::SensorInit => (None, AlertLevel::Yellow),
        }
    }
}

/// Half period of the failure blink.
pub const FAILURE_BLINK_MS: u16 = 500;
/// Half period of the three green blinks of a passed self check.
pub const PASS_BLINK_MS: u16 = 300;

pub struct StatusLeds<R, Y, G> {
    red: R,
    yellow: Y,
    green: G,
}

impl<R, Y, G, E> StatusLeds<R, Y, G>
where
    R: OutputPin<Error = E>,
    Y: OutputPin<Error = E>,
    G: OutputPin<Error = E>,
{
    pub fn new(red: R, yellow: Y, green: G) -> Self {
        Self { red, yellow, green }
    }

    /// Lights exactly the LED for `level`.
    pub fn show(&mut self, level: AlertLevel) -> Result<(), E> {
        Self::set(&mut self.red, level == AlertLevel::Red)?;
        Self::set(&mut self.yellow, level == AlertLevel::Yellow)?;
        Self::set(&mut self.green, level == AlertLevel::Green)
    }

    pub fn all_on(&mut self) -> Result<(), E> {
        self.red.set_high()?;
        self.yellow.set_high()?;
        self.green.set_high()
    }

    pub fn all_off(&mut self) -> Result<(), E> {
        self.red.set_low()?;
        self.yellow.set_low()?;
        self.green.set_low()
    }

    /// Switches a single LED, leaving the other two alone.
    pub fn set_level(&mut self, level: AlertLevel, on: bool) -> Result<(), E> {
        match level {
            AlertLevel::Red => Self::set(&mut self.red, on),
            AlertLevel::Yellow => Self::set(&mut self.yellow, on),
            AlertLevel::Green => Self::set(&mut self.green, on),
        }
    }

    /// Flashes one LED `times` times, `half_period_ms` on then `half_period_ms` off.
    pub fn blink<D: DelayMs<u16>>(
        &mut self,
        level: AlertLevel,
        times: u8,
        half_period_ms: u16,
        delay: &mut D,
    ) -> Result<(), E> {
        for _ in 0..times {
            self.set_level(level, true)?;
            delay.delay_ms(half_period_ms);
            self.set_level(level, false)?;
            delay.delay_ms(half_period_ms);
        }
        Ok(())
    }

    /// The self check passed.
    pub fn signal_pass<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<(), E> {
        self.all_off()?;
        self.blink(AlertLevel::Green, 3, PASS_BLINK_MS, delay)
    }

    /// Shows the failure pattern and never returns.
    pub fn signal_failure<D: DelayMs<u16>>(&mut self, failure: SelfCheckFailure, delay: &mut D) -> ! {
        #[cfg(feature = "defmt")]
        defmt::error!("self check failed: {}", failure);
        let (steady, blinking) = failure.pattern();
        let _ = self.all_off();
        if let Some(level) = steady {
            let _ = self.set_level(level, true);
        }
        loop {
            let _ = self.blink(blinking, 1, FAILURE_BLINK_MS, delay);
        }
    }

    pub fn release(self) -> (R, Y, G) {
        (self.red, self.yellow, self.green)
    }

    fn set<P: OutputPin<Error = E>>(pin: &mut P, high: bool) -> Result<(), E> {
        if high {
            pin.set_high()
        } else {
            pin.set_low()
        }
    }
}
