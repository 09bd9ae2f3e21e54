#![no_main]
#![no_std]

use co2_monitor as _; // global logger + panicking-behavior + memory layout

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [EXTI0, EXTI1])]
mod app {
    use co2_history_chart::scd30::Scd30;
    use co2_history_chart::sensor::read_if_ready;
    use co2_history_chart::{AlertLevel, HistoryChart, SelfCheckFailure, StatusLeds};
    use co2_monitor::config::{
        BLINK_PERIOD_MS, CHART, CHART_WIDTH, PRESSURE_OFFSET, SAMPLE_INTERVAL_S, THRESHOLDS,
    };
    use co2_monitor::panel::Panel;
    use embedded_hal::blocking::delay::DelayMs;
    use epd_waveshare::epd4in2::Epd4in2;
    use epd_waveshare::prelude::WaveshareDisplay;
    use stm32f4xx_hal::gpio::{
        Alternate, ErasedPin, Input, OpenDrain, Output, PushPull, PB13, PB15, PB8, PB9,
    };
    use stm32f4xx_hal::i2c::I2c;
    use stm32f4xx_hal::pac::{self, I2C1, SPI2, TIM10};
    use stm32f4xx_hal::prelude::*;
    use stm32f4xx_hal::rcc::Clocks;
    use stm32f4xx_hal::spi::{NoMiso, Spi};
    use stm32f4xx_hal::timer::CounterHz;
    use systick_monotonic::{fugit::ExtU64, Systick};

    pub struct Delay {
        timer: CounterHz<TIM10>,
    }

    impl Delay {
        pub fn new(tim: TIM10, clocks: &Clocks) -> Self {
            let mut timer = tim.counter_hz(clocks);
            let _ = timer.start(1.kHz());
            Self { timer }
        }
    }

    impl DelayMs<u16> for Delay {
        fn delay_ms(&mut self, ms: u16) {
            let _ = self.timer.wait(); // clear UIF flag and reset counting
            for _ in 0..ms {
                let _ = nb::block!(self.timer.wait());
            }
        }
    }

    impl DelayMs<u8> for Delay {
        fn delay_ms(&mut self, ms: u8) {
            self.delay_ms(u16::from(ms));
        }
    }

    type SPI = Spi<SPI2, (PB13<Alternate<5>>, NoMiso, PB15<Alternate<5>>)>;
    type OutPin = ErasedPin<Output<PushPull>>;

    pub type EPDisplay = Panel<SPI, OutPin, ErasedPin<Input>, OutPin, OutPin, Delay>;
    type CO2Sensor = Scd30<I2c<I2C1, (PB8<Alternate<4, OpenDrain>>, PB9<Alternate<4, OpenDrain>>)>>;
    type Chart = HistoryChart<Option<EPDisplay>, CHART_WIDTH>;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        led: OutPin,
        leds: StatusLeds<OutPin, OutPin, OutPin>,
        sensor: CO2Sensor,
        chart: Chart,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        let device: pac::Peripherals = cx.device;

        let rcc = device.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(84.MHz()).hclk(84.MHz()).freeze();
        let mono = Systick::new(cx.core.SYST, clocks.sysclk().raw());

        let gpioa = device.GPIOA.split();
        let gpiob = device.GPIOB.split();

        let led = gpioa.pa7.into_push_pull_output().erase();
        let mut leds = StatusLeds::new(
            gpioa.pa0.into_push_pull_output().erase(),
            gpioa.pa1.into_push_pull_output().erase(),
            gpioa.pa4.into_push_pull_output().erase(),
        );

        let cs = gpiob.pb10.into_push_pull_output().erase();
        let spiclk = gpiob.pb13.into_alternate();
        let spimosi = gpiob.pb15.into_alternate();
        let dc = gpiob.pb2.into_push_pull_output().erase();
        let busy = gpiob.pb0.into_floating_input().erase();
        let rst = gpiob.pb1.into_push_pull_output().erase();

        defmt::info!("startup");

        let mut delay = Delay::new(device.TIM10, &clocks);

        let _ = leds.all_on();
        delay.delay_ms(500u16);
        let _ = leds.all_off();
        delay.delay_ms(500u16);

        // both lines must idle high before the bus is handed to the peripheral
        let scl = gpiob.pb8.into_floating_input();
        let sda = gpiob.pb9.into_floating_input();
        let scl_ok = scl.is_high();
        let sda_ok = sda.is_high();
        if !scl_ok {
            defmt::error!("pull-up check for i2c scl failed");
        }
        if !sda_ok {
            defmt::error!("pull-up check for i2c sda failed");
        }
        if !(scl_ok && sda_ok) {
            leds.signal_failure(SelfCheckFailure::PullUp, &mut delay);
        }

        // the i2c must be initialized after all of the pins are initialized, otherwise it won't boot after startup.
        // There might be another reason, but the solution is to reorder initialization of peripherals.
        let i2c = I2c::new(
            device.I2C1,
            (scl.into_alternate_open_drain(), sda.into_alternate_open_drain()),
            45.kHz(),
            &clocks,
        );
        let mut sensor = Scd30::new(i2c);

        match sensor.firmware_version() {
            Ok((major, minor)) => defmt::info!("scd30 firmware {=u8}.{=u8}", major, minor),
            Err(e) => {
                defmt::error!("scd30 not responding: {}", e);
                leds.signal_failure(SelfCheckFailure::Bus, &mut delay);
            }
        }
        delay.delay_ms(200u16);
        if let Err(e) = sensor
            .set_measurement_interval(SAMPLE_INTERVAL_S)
            .and_then(|_| sensor.start_continuous_measurement(PRESSURE_OFFSET))
        {
            defmt::error!("scd30 start: {}", e);
            leds.signal_failure(SelfCheckFailure::SensorInit, &mut delay);
        }

        let _ = leds.signal_pass(&mut delay);

        let mut spi = Spi::new(
            device.SPI2,
            (spiclk, NoMiso {}, spimosi),
            embedded_hal::spi::MODE_0,
            4.MHz(),
            &clocks,
        );

        // a panel that does not come up leaves the chart drawing into nothing
        let panel = if CHART.display_enabled {
            match Epd4in2::new(&mut spi, cs, busy, dc, rst, &mut delay) {
                Ok(epd) => {
                    let mut panel = Panel::new(epd, spi, delay);
                    panel.render_boot();
                    Some(panel)
                }
                Err(e) => {
                    defmt::error!("epd init failed: {:?}", defmt::Debug2Format(&e));
                    None
                }
            }
        } else {
            None
        };

        let mut chart = match HistoryChart::new(CHART, panel) {
            Ok(chart) => chart,
            Err(e) => defmt::panic!("invalid chart config: {}", e),
        };
        chart.redraw();

        blink::spawn_after(BLINK_PERIOD_MS.millis()).ok();
        update_sensor::spawn_after(u64::from(SAMPLE_INTERVAL_S).secs()).ok();

        (
            Shared {},
            Local {
                led,
                leds,
                sensor,
                chart,
            },
            init::Monotonics(mono),
        )
    }

    #[task(local = [led])]
    fn blink(cx: blink::Context) {
        cx.local.led.toggle();
        blink::spawn_after(BLINK_PERIOD_MS.millis()).ok();
    }

    #[task(local = [sensor, leds, chart])]
    fn update_sensor(cx: update_sensor::Context) {
        update_sensor::spawn_after(u64::from(SAMPLE_INTERVAL_S).secs()).ok();

        let redraw = match read_if_ready(cx.local.sensor) {
            Some(reading) => {
                defmt::info!(
                    "co2(ppm): {=u16} temp(C): {=f32} humidity(%): {=f32}",
                    reading.co2,
                    reading.temperature,
                    reading.humidity
                );
                let _ = cx
                    .local
                    .leds
                    .show(AlertLevel::classify(reading.co2, &THRESHOLDS));
                cx.local.chart.push_reading(&reading)
            }
            None => cx.local.chart.push_missing(),
        };
        defmt::debug!("{}", redraw);
    }
}
