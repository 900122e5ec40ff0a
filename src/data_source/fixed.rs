//! An in-memory [`WeatherDataSource`] with canned answers, for tests and benchmarks.

use crate::data_source::error::WeatherDataError;
use crate::data_source::WeatherDataSource;
use crate::types::lat_lon::LatLon;
use chrono::NaiveDate;
use std::cell::Cell;
use std::collections::HashMap;

/// Serves preset per-date rainfall and temperature, identically for every location.
///
/// Dates without a preset value answer `None`. Every query is counted so tests can
/// assert how often the aggregation layer asked.
///
/// # Examples
///
/// ```
/// use gardenbot::{FixedDataSource, LatLon, WeatherDataSource};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let source = FixedDataSource::new().with_rainfall(day, 0.25);
///
/// assert_eq!(source.get_rainfall(LatLon(0.0, 0.0), day).unwrap(), Some(0.25));
/// assert_eq!(source.calls(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FixedDataSource {
    rainfall: HashMap<NaiveDate, f64>,
    temperature: HashMap<NaiveDate, f64>,
    calls: Cell<usize>,
}

impl FixedDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rainfall(mut self, date: NaiveDate, inches: f64) -> Self {
        self.rainfall.insert(date, inches);
        self
    }

    pub fn with_temperature(mut self, date: NaiveDate, fahrenheit: f64) -> Self {
        self.temperature.insert(date, fahrenheit);
        self
    }

    /// Number of queries answered so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn count(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl WeatherDataSource for FixedDataSource {
    fn get_rainfall(
        &self,
        _location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        self.count();
        Ok(self.rainfall.get(&date).copied())
    }

    fn get_average_temperature(
        &self,
        _location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        self.count();
        Ok(self.temperature.get(&date).copied())
    }
}
