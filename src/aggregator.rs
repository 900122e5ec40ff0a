//! Rolls per-day samples from a [`WeatherDataSource`] into multi-day rainfall sums and
//! a rolling temperature average, over fixed windows relative to "today".

use crate::data_source::error::WeatherDataError;
use crate::data_source::WeatherDataSource;
use crate::types::clock::{Clock, SystemClock};
use crate::types::day_window::{DayWindow, StartEndDate};
use crate::types::lat_lon::LatLon;
use crate::types::observation::DailyObservation;
use crate::types::weather_window::WeatherWindow;
use chrono::NaiveDate;
use log::debug;

/// The 3 days strictly before today.
pub const ACCUMULATION_WINDOW: DayWindow = DayWindow::trailing(3);
/// Today and the 3 days after it.
pub const EXPECTATION_WINDOW: DayWindow = DayWindow::upcoming(4);
/// 3 days before through 3 days after today.
pub const TEMPERATURE_WINDOW: DayWindow = DayWindow::centered(3);

/// Computes windowed weather aggregates for a location.
///
/// Holds no state between calls: every method reads the clock again and queries the
/// data source one date at a time. Absent rainfall samples count as zero; absent
/// temperature samples are left out of the average.
#[derive(Debug, Clone)]
pub struct WeatherAggregator<S, C = SystemClock> {
    source: S,
    clock: C,
}

impl<S: WeatherDataSource> WeatherAggregator<S, SystemClock> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: WeatherDataSource, C: Clock> WeatherAggregator<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rain observed over the 3 days before today, in inches.
    pub fn accumulated_rainfall(&self, location: LatLon) -> Result<f64, WeatherDataError> {
        self.rainfall_over(location, ACCUMULATION_WINDOW, self.clock.today())
    }

    /// Rain expected over today and the next 3 days, in inches.
    pub fn expected_rainfall(&self, location: LatLon) -> Result<f64, WeatherDataError> {
        self.rainfall_over(location, EXPECTATION_WINDOW, self.clock.today())
    }

    /// Mean daily temperature over the 7 days centered on today, in °F.
    ///
    /// `Ok(None)` means every sample in the window was absent. That is not the same
    /// as an average of zero and must not be treated as one.
    pub fn average_temperature(&self, location: LatLon) -> Result<Option<f64>, WeatherDataError> {
        self.temperature_over(location, TEMPERATURE_WINDOW, self.clock.today())
    }

    /// All three aggregates, computed against a single reading of the clock.
    pub fn window(&self, location: LatLon) -> Result<WeatherWindow, WeatherDataError> {
        let today = self.clock.today();
        Ok(WeatherWindow {
            location,
            span: resolve(TEMPERATURE_WINDOW, today),
            accumulated_rainfall: self.rainfall_over(location, ACCUMULATION_WINDOW, today)?,
            expected_rainfall: self.rainfall_over(location, EXPECTATION_WINDOW, today)?,
            average_temperature: self.temperature_over(location, TEMPERATURE_WINDOW, today)?,
        })
    }

    /// Raw per-day samples for every date in `range`, in date order.
    pub fn observations(
        &self,
        location: LatLon,
        range: StartEndDate,
    ) -> Result<Vec<DailyObservation>, WeatherDataError> {
        range
            .iter()
            .map(|date| {
                Ok::<_, WeatherDataError>(DailyObservation {
                    location,
                    date,
                    rainfall_inches: self.source.get_rainfall(location, date)?,
                    average_temperature: self.source.get_average_temperature(location, date)?,
                })
            })
            .collect()
    }

    fn rainfall_over(
        &self,
        location: LatLon,
        window: DayWindow,
        today: NaiveDate,
    ) -> Result<f64, WeatherDataError> {
        let mut total = 0.0;
        for date in resolve(window, today).iter() {
            match self.source.get_rainfall(location, date)? {
                Some(inches) => total += inches,
                None => debug!("No rainfall sample for {} on {}", location, date),
            }
        }
        Ok(total)
    }

    fn temperature_over(
        &self,
        location: LatLon,
        window: DayWindow,
        today: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for date in resolve(window, today).iter() {
            match self.source.get_average_temperature(location, date)? {
                Some(temperature) => {
                    sum += temperature;
                    count += 1;
                }
                None => debug!("No temperature sample for {} on {}", location, date),
            }
        }
        Ok((count > 0).then(|| sum / count as f64))
    }
}

// The fixed windows are non-empty, so resolution only fails at the edge of chrono's
// date range; collapsing to today there keeps the aggregates defined.
fn resolve(window: DayWindow, today: NaiveDate) -> StartEndDate {
    window.resolve(today).unwrap_or(StartEndDate {
        start: today,
        end: today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::fixed::FixedDataSource;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        if offset < 0 {
            today() - Days::new(offset.unsigned_abs())
        } else {
            today() + Days::new(offset as u64)
        }
    }

    fn here() -> LatLon {
        LatLon(42.36, -71.06)
    }

    #[test]
    fn test_accumulated_rainfall_sums_three_prior_days() {
        let source = FixedDataSource::new()
            .with_rainfall(day(-4), 9.0) // outside the window
            .with_rainfall(day(-3), 0.1)
            .with_rainfall(day(-2), 0.2)
            .with_rainfall(day(-1), 0.3)
            .with_rainfall(day(0), 5.0); // today belongs to the expected window
        let aggregator = WeatherAggregator::with_clock(&source, today());

        let total = aggregator.accumulated_rainfall(here()).unwrap();
        assert!((total - 0.6).abs() < 1e-9, "got {total}");
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_expected_rainfall_includes_today() {
        let source = FixedDataSource::new()
            .with_rainfall(day(-1), 9.0)
            .with_rainfall(day(0), 0.1)
            .with_rainfall(day(3), 0.4)
            .with_rainfall(day(4), 9.0);
        let aggregator = WeatherAggregator::with_clock(&source, today());

        let total = aggregator.expected_rainfall(here()).unwrap();
        assert!((total - 0.5).abs() < 1e-9, "got {total}");
        assert_eq!(source.calls(), 4);
    }

    #[test]
    fn test_absent_rainfall_counts_as_zero() {
        let source = FixedDataSource::new();
        let aggregator = WeatherAggregator::with_clock(&source, today());
        assert_eq!(aggregator.accumulated_rainfall(here()).unwrap(), 0.0);
        assert_eq!(aggregator.expected_rainfall(here()).unwrap(), 0.0);
    }

    #[test]
    fn test_average_temperature_skips_absent_samples() {
        let source = FixedDataSource::new()
            .with_temperature(day(-3), 60.0)
            .with_temperature(day(0), 70.0)
            .with_temperature(day(3), 80.0)
            .with_temperature(day(4), -100.0); // outside the window
        let aggregator = WeatherAggregator::with_clock(&source, today());

        assert_eq!(aggregator.average_temperature(here()).unwrap(), Some(70.0));
        assert_eq!(source.calls(), 7);
    }

    #[test]
    fn test_average_temperature_all_absent_is_undefined() {
        let source = FixedDataSource::new().with_rainfall(day(0), 1.0);
        let aggregator = WeatherAggregator::with_clock(&source, today());
        assert_eq!(aggregator.average_temperature(here()).unwrap(), None);
    }

    #[test]
    fn test_window_is_idempotent() {
        let source = FixedDataSource::new()
            .with_rainfall(day(-2), 0.25)
            .with_rainfall(day(1), 0.5)
            .with_temperature(day(-1), 65.0)
            .with_temperature(day(2), 75.0);
        let aggregator = WeatherAggregator::with_clock(&source, today());

        let first = aggregator.window(here()).unwrap();
        let second = aggregator.window(here()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.start_date(), day(-3));
        assert_eq!(first.end_date(), day(3));
        assert!((first.total_rainfall() - 0.75).abs() < 1e-9);
        assert_eq!(first.average_temperature, Some(70.0));
    }

    #[test]
    fn test_windows_follow_the_clock() {
        let source = FixedDataSource::new().with_rainfall(day(-1), 0.3);

        let on_day = WeatherAggregator::with_clock(&source, today());
        assert!((on_day.accumulated_rainfall(here()).unwrap() - 0.3).abs() < 1e-9);

        // Three days later the sample has left the trailing window.
        let later = WeatherAggregator::with_clock(&source, day(3));
        assert_eq!(later.accumulated_rainfall(here()).unwrap(), 0.0);
    }

    #[test]
    fn test_rainfall_totals_are_non_negative() {
        let mut source = FixedDataSource::new();
        for (i, inches) in [0.0, 0.01, 0.5, 2.25, 0.0, 1.0, 0.125].iter().enumerate() {
            source = source.with_rainfall(day(i as i64 - 3), *inches);
        }
        let window = WeatherAggregator::with_clock(&source, today())
            .window(here())
            .unwrap();
        assert!(window.accumulated_rainfall >= 0.0);
        assert!(window.expected_rainfall >= 0.0);
        assert!(window.total_rainfall() >= 0.0);
    }

    #[test]
    fn test_observations_cover_range() {
        let source = FixedDataSource::new()
            .with_rainfall(day(0), 0.2)
            .with_temperature(day(1), 71.0);
        let aggregator = WeatherAggregator::with_clock(&source, today());
        let range = StartEndDate {
            start: day(0),
            end: day(1),
        };

        let observations = aggregator.observations(here(), range).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].rainfall_inches, Some(0.2));
        assert_eq!(observations[0].average_temperature, None);
        assert_eq!(observations[1].rainfall_inches, None);
        assert_eq!(observations[1].average_temperature, Some(71.0));
    }
}
