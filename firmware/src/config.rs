use co2_history_chart::{ChartConfig, Thresholds};

pub const SAMPLE_INTERVAL_S: u16 = 15;
pub const GRID_INTERVAL_S: u16 = 300;
pub const BLINK_PERIOD_MS: u64 = 100;

pub const PRESSURE_OFFSET: u16 = 1031; // Brno, 17.11

pub const THRESHOLDS: Thresholds = Thresholds::new(1000, 1500);

/// Set to false on boards without the e-paper panel.
pub const DISPLAY_ENABLED: bool = true;

/// Quick refreshes ghost, do a full one every this many frames.
pub const FULL_REFRESH_EVERY: u16 = 20;

pub const WIDTH: i32 = 400;
pub const HEIGHT: i32 = 300;

pub const CHART_WIDTH: usize = 380;

pub const CHART: ChartConfig = ChartConfig::new((10, 70), 200, 400, 2000)
    .with_thresholds(THRESHOLDS, true)
    .with_intervals(SAMPLE_INTERVAL_S, Some(GRID_INTERVAL_S))
    .with_text_height(20)
    .with_char_width(10)
    .with_display(DISPLAY_ENABLED);
