//! Scrolling bar chart of the most recent readings.
//!
//! Every sample period the caller pushes one reading. The chart compares each
//! column's bar before and after the window scrolls by one and touches only the
//! rows whose state flips, so a steady reading costs no bar drawing at all.
//! Gridlines, threshold lines and the text readout are cheap and are redrawn
//! every cycle because shrinking bars may have erased some of their dots.

use crate::config::ChartConfig;
use crate::error::ConfigError;
use crate::geometry::BarGeometry;
use crate::history::RollingBuffer;
use crate::readout::{co2_text, ReadoutText, Reading};
use crate::surface::Surface;
use crate::Sample;

/// Bar drawing done by one push.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Redraw {
    /// Columns whose bar height changed.
    pub columns: u16,
    /// Pixels switched on or off across those columns.
    pub pixels: u32,
}

pub struct HistoryChart<S, const W: usize> {
    surface: S,
    config: ChartConfig,
    geometry: BarGeometry,
    buffer: RollingBuffer<W>,
    readout: ReadoutText,
}

impl<S, const W: usize> HistoryChart<S, W>
where
    S: Surface,
{
    /// Starts with a zero-filled window. The surface is expected to be blank,
    /// otherwise call [`redraw`](Self::redraw) once before the first push.
    pub fn new(config: ChartConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            surface,
            geometry: config.geometry(),
            config,
            buffer: RollingBuffer::new(),
            readout: ReadoutText::new(),
        })
    }

    /// Scrolls `value` into the chart and shows it in the readout strip.
    pub fn push_sample(&mut self, value: Sample) -> Redraw {
        self.push(value, Some(co2_text(value)))
    }

    /// Scrolls `reading.co2` into the chart and shows every channel in the readout strip.
    pub fn push_reading(&mut self, reading: &Reading) -> Redraw {
        self.push(reading.co2, Some(reading.text()))
    }

    /// Scrolls the sentinel in for a period without a reading. The readout
    /// keeps showing the last real reading.
    pub fn push_missing(&mut self) -> Redraw {
        self.push(Reading::SENTINEL.co2, None)
    }

    fn push(&mut self, value: Sample, text: Option<ReadoutText>) -> Redraw {
        if let Some(text) = text {
            self.readout = text;
        }
        self.buffer.set_pending(value);
        if !self.config.display_enabled {
            self.buffer.shift();
            return Redraw::default();
        }

        let redraw = self.draw_deltas();
        self.buffer.shift();
        self.draw_overlay();
        self.draw_readout();
        self.surface.present();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "chart: pushed {=u16}, {=u16} columns / {=u32} pixels redrawn",
            value,
            redraw.columns,
            redraw.pixels
        );

        redraw
    }

    /// Draws the whole chart region from the current window.
    pub fn redraw(&mut self) {
        if !self.config.display_enabled {
            return;
        }
        let (x, y) = self.config.origin;
        let bottom = y + i32::from(self.geometry.max_height());
        self.surface
            .fill_rect(x, y, W as u16, self.geometry.max_height(), false);
        for (i, &value) in self.buffer.window().iter().enumerate() {
            let height = self.geometry.height(value);
            if height > 0 {
                self.surface
                    .draw_vertical_run(x + i as i32, bottom - i32::from(height), height, true);
            }
        }
        self.draw_overlay();
        self.draw_readout();
        self.surface.present();
    }

    /// Compares every column against its right neighbour, which is where it
    /// will be after the shift, and draws only the rows that differ.
    fn draw_deltas(&mut self) -> Redraw {
        let Self {
            surface,
            config,
            geometry,
            buffer,
            ..
        } = self;
        let (x, y) = config.origin;
        // one past the lowest row of the bar area
        let bottom = y + i32::from(geometry.max_height());

        let mut redraw = Redraw::default();
        for (i, (old, new)) in buffer.pairs().enumerate() {
            let old = geometry.height(old);
            let new = geometry.height(new);
            if old == new {
                continue;
            }
            let column = x + i as i32;
            if new > old {
                surface.draw_vertical_run(column, bottom - i32::from(new), new - old, true);
            } else {
                surface.draw_vertical_run(column, bottom - i32::from(old), old - new, false);
            }
            redraw.columns += 1;
            redraw.pixels += u32::from(old.abs_diff(new));
        }
        redraw
    }

    fn draw_overlay(&mut self) {
        let (x, y) = self.config.origin;
        let height = self.geometry.max_height();

        // gridlines count back from the newest column so each marks a fixed age
        if let Some(spacing) = self.config.grid_spacing() {
            for age in (spacing..W).step_by(spacing) {
                let column = x + (W - 1 - age) as i32;
                for row in (0..height).step_by(2) {
                    self.surface
                        .draw_vertical_run(column, y + i32::from(row), 1, true);
                }
            }
        }

        if self.config.threshold_lines {
            let thresholds = self.config.thresholds;
            for threshold in [thresholds.yellow, thresholds.red] {
                let bar = self.geometry.height(threshold);
                if bar == 0 {
                    continue;
                }
                let row = y + i32::from(height - bar);
                for column in (0..W).step_by(2) {
                    self.surface.draw_vertical_run(x + column as i32, row, 1, true);
                }
            }
        }
    }

    fn draw_readout(&mut self) {
        let text_height = self.config.text_height;
        if text_height == 0 {
            return;
        }
        let (x, y) = self.config.origin;
        let top = y - i32::from(text_height);
        self.surface.fill_rect(x, top, W as u16, text_height, false);

        // clip to the strip so nothing is left standing past its right edge
        let fits = W / usize::from(self.config.char_width);
        let text = match self.readout.char_indices().nth(fits) {
            Some((end, _)) => &self.readout[..end],
            None => &self.readout[..],
        };
        if !text.is_empty() {
            self.surface.draw_text(x, top, text);
        }
    }

    /// Visible samples, oldest first.
    pub fn window(&self) -> &[Sample; W] {
        self.buffer.window()
    }

    pub fn buffer(&self) -> &RollingBuffer<W> {
        &self.buffer
    }

    pub fn latest(&self) -> Sample {
        self.buffer.latest()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::testing::{Command, PixelSurface, RecordingSurface};
    use proptest::prelude::*;

    fn plain_config() -> ChartConfig {
        ChartConfig::new((0, 10), 40, 400, 1700)
            .with_thresholds(Thresholds::new(1000, 1500), false)
            .with_intervals(15, None)
    }

    fn chart<const W: usize>(config: ChartConfig) -> HistoryChart<RecordingSurface, W> {
        HistoryChart::new(config, RecordingSurface::default()).unwrap()
    }

    fn run(column: i32, row: i32, length: u16, on: bool) -> Command {
        Command::Run {
            column,
            row,
            length,
            on,
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ChartConfig::new((0, 10), 40, 1700, 400);
        assert!(HistoryChart::<_, 4>::new(config, RecordingSurface::default()).is_err());
    }

    #[test]
    fn draws_one_run_per_changed_column() {
        let mut chart = chart::<4>(plain_config());

        assert_eq!(chart.push_sample(400), Redraw::default());
        assert!(chart.surface_mut().take_runs().is_empty());

        let redraw = chart.push_sample(1050);
        assert_eq!(chart.geometry().height(1050), 20);
        assert_eq!(redraw, Redraw { columns: 1, pixels: 20 });
        assert_eq!(chart.surface_mut().take_runs(), vec![run(3, 30, 20, true)]);

        let redraw = chart.push_sample(1700);
        assert_eq!(redraw, Redraw { columns: 2, pixels: 40 });
        assert_eq!(
            chart.surface_mut().take_runs(),
            vec![run(2, 30, 20, true), run(3, 10, 20, true)]
        );

        let redraw = chart.push_sample(400);
        assert_eq!(redraw, Redraw { columns: 3, pixels: 80 });
        assert_eq!(
            chart.surface_mut().take_runs(),
            vec![run(1, 30, 20, true), run(2, 10, 20, true), run(3, 10, 40, false)]
        );

        let heights: Vec<u16> = chart
            .window()
            .iter()
            .map(|&v| chart.geometry().height(v))
            .collect();
        assert_eq!(heights, vec![0, 20, 40, 0]);
    }

    #[test]
    fn steady_value_redraws_nothing_but_still_shifts() {
        let mut chart = chart::<4>(plain_config());
        for _ in 0..4 {
            chart.push_sample(500);
        }
        assert_eq!(chart.buffer().iter().collect::<Vec<_>>(), vec![500; 5]);
        chart.surface_mut().take();

        assert_eq!(chart.push_sample(500), Redraw::default());
        assert!(chart.surface_mut().take_runs().is_empty());

        let redraw = chart.push_sample(1700);
        assert_eq!(redraw.columns, 1);
        assert_eq!(chart.window(), &[500, 500, 500, 1700]);
        let height = chart.geometry().height(500);
        assert_eq!(
            chart.surface_mut().take_runs(),
            vec![run(3, 10, 40 - height, true)]
        );
    }

    #[test]
    fn repeated_push_after_settling_is_a_no_op() {
        let mut chart = chart::<8>(plain_config());
        for _ in 0..8 {
            chart.push_sample(1333);
        }
        chart.surface_mut().take();
        assert_eq!(chart.push_sample(1333), Redraw::default());
        assert_eq!(chart.push_sample(1333), Redraw::default());
        assert!(chart.surface_mut().take_runs().is_empty());
    }

    #[test]
    fn gridlines_are_dotted_every_grid_interval() {
        let config = ChartConfig::new((0, 10), 16, 400, 1700)
            .with_thresholds(Thresholds::default(), false)
            .with_intervals(15, Some(300));
        let mut chart = chart::<64>(config);
        chart.push_sample(0);

        let runs = chart.surface_mut().take_runs();
        let mut columns: Vec<i32> = Vec::new();
        for command in &runs {
            let &Command::Run {
                column,
                row,
                length,
                on,
            } = command
            else {
                unreachable!()
            };
            assert_eq!(length, 1);
            assert!(on);
            assert_eq!((row - 10) % 2, 0);
            assert!((10..26).contains(&row));
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns.sort_unstable();
        assert_eq!(columns, vec![3, 23, 43]);
        assert_eq!(runs.len(), 3 * 8);
    }

    #[test]
    fn threshold_lines_sit_on_their_bar_tops() {
        let config = ChartConfig::new((5, 10), 40, 400, 2000)
            .with_thresholds(Thresholds::new(1000, 1500), true)
            .with_intervals(15, None);
        let mut chart = chart::<8>(config);
        chart.push_sample(0);

        let runs = chart.surface_mut().take_runs();
        let yellow_row = 10 + 40 - 15;
        let red_row = 10 + 40 - 27;
        let expected: Vec<Command> = [yellow_row, red_row]
            .iter()
            .flat_map(|&row| [5, 7, 9, 11].map(|column| run(column, row, 1, true)))
            .collect();
        assert_eq!(runs, expected);
    }

    #[test]
    fn readout_strip_is_cleared_then_written() {
        let mut chart = chart::<128>(plain_config());
        chart.push_sample(812);
        let commands = chart.surface_mut().take();
        let tail = &commands[commands.len() - 3..];
        assert_eq!(
            tail,
            &[
                Command::Fill {
                    x: 0,
                    y: 0,
                    width: 128,
                    height: 10,
                    on: false
                },
                Command::Text {
                    x: 0,
                    y: 0,
                    text: "CO2: 812 ppm".into()
                },
                Command::Present,
            ]
        );
    }

    #[test]
    fn reading_readout_shows_every_channel() {
        let mut chart = chart::<128>(plain_config());
        let reading = Reading {
            co2: 950,
            temperature: 22.5,
            humidity: 40.2,
        };
        chart.push_reading(&reading);
        assert_eq!(chart.latest(), 950);
        assert!(chart
            .surface()
            .commands()
            .contains(&Command::Text {
                x: 0,
                y: 0,
                text: "950 ppm 22.5C 40%".into()
            }));
    }

    #[test]
    fn readout_is_clipped_to_the_chart_width() {
        let mut chart = chart::<48>(plain_config());
        chart.push_sample(1500);
        chart.push_sample(412);
        let texts: Vec<Command> = chart
            .surface_mut()
            .take()
            .into_iter()
            .filter(|c| matches!(c, Command::Text { .. }))
            .collect();
        assert_eq!(
            texts,
            vec![
                Command::Text {
                    x: 0,
                    y: 0,
                    text: "CO2: 150".into()
                },
                Command::Text {
                    x: 0,
                    y: 0,
                    text: "CO2: 412".into()
                },
            ]
        );
    }

    #[test]
    fn readout_narrower_than_one_glyph_draws_no_text() {
        let mut chart = chart::<4>(plain_config());
        chart.push_sample(1500);
        assert!(!chart
            .surface()
            .commands()
            .iter()
            .any(|c| matches!(c, Command::Text { .. })));
    }

    #[test]
    fn missing_reading_keeps_last_readout() {
        let mut chart = chart::<128>(plain_config());
        let reading = Reading {
            co2: 950,
            temperature: 22.5,
            humidity: 40.2,
        };
        chart.push_reading(&reading);
        chart.surface_mut().take();

        chart.push_missing();
        assert_eq!(chart.latest(), 0);
        let commands = chart.surface_mut().take();
        assert!(commands.contains(&Command::Text {
            x: 0,
            y: 0,
            text: "950 ppm 22.5C 40%".into()
        }));
        assert!(commands.contains(&run(127, 10 + 40 - 16, 16, false)));
    }

    #[test]
    fn disabled_display_draws_nothing_but_still_rolls() {
        let config = ChartConfig::default().with_display(false);
        let mut chart = chart::<8>(config);
        assert_eq!(chart.push_sample(1500), Redraw::default());
        chart.push_sample(1700);
        chart.redraw();
        assert!(chart.surface().commands().is_empty());
        assert_eq!(chart.window(), &[0, 0, 0, 0, 0, 0, 1500, 1700]);
    }

    #[test]
    fn absent_display_still_rolls() {
        let mut chart: HistoryChart<Option<RecordingSurface>, 3> =
            HistoryChart::new(plain_config().with_display(false), None).unwrap();
        for v in [700, 800, 900, 1000] {
            chart.push_sample(v);
        }
        assert_eq!(chart.window(), &[800, 900, 1000]);
        assert!(chart.into_surface().is_none());
    }

    #[test]
    fn redraw_paints_full_bars() {
        let mut chart = chart::<3>(plain_config().with_text_height(0));
        for v in [1050, 1700] {
            chart.push_sample(v);
        }
        chart.surface_mut().take();
        chart.redraw();
        assert_eq!(
            chart.surface_mut().take(),
            vec![
                Command::Fill {
                    x: 0,
                    y: 10,
                    width: 3,
                    height: 40,
                    on: false
                },
                run(1, 30, 20, true),
                run(2, 10, 40, true),
                Command::Present,
            ]
        );
    }

    fn overlay_config() -> ChartConfig {
        ChartConfig::new((2, 12), 24, 400, 1700)
            .with_thresholds(Thresholds::new(1000, 1500), true)
            .with_intervals(15, Some(60))
    }

    proptest! {
        #[test]
        fn incremental_matches_full_redraw(values in prop::collection::vec(0u16..2500, 1..120)) {
            let mut incremental: HistoryChart<PixelSurface, 24> =
                HistoryChart::new(overlay_config(), PixelSurface::new(40, 40)).unwrap();
            let mut full: HistoryChart<PixelSurface, 24> =
                HistoryChart::new(overlay_config(), PixelSurface::new(40, 40)).unwrap();
            for &v in &values {
                incremental.push_sample(v);
                full.push_sample(v);
            }

            full.surface_mut().clear();
            full.redraw();
            prop_assert_eq!(incremental.surface(), full.surface());
        }

        #[test]
        fn newest_value_is_rightmost(values in prop::collection::vec(any::<u16>(), 1..64)) {
            let mut chart: HistoryChart<Option<RecordingSurface>, 10> =
                HistoryChart::new(plain_config(), None).unwrap();
            for &v in &values {
                chart.push_sample(v);
                prop_assert_eq!(chart.buffer().len(), 11);
                prop_assert_eq!(chart.window()[9], v);
            }
        }
    }
}
