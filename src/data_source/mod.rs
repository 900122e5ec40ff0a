//! Weather data sources: the provider-agnostic query contract and its implementations.

pub mod cache;
pub mod error;
pub mod fixed;
pub mod forecast_io;
pub mod response;

use crate::types::lat_lon::LatLon;
use chrono::NaiveDate;
use error::WeatherDataError;

/// Answers rainfall and temperature queries for a single (location, date) pair.
///
/// An absent sample (`Ok(None)`) means the provider had nothing to say, including
/// when it was unreachable or answered with a non-success status. `Err` is reserved
/// for failures that must not be mistaken for "no data", such as a payload that
/// cannot be parsed.
pub trait WeatherDataSource {
    /// Rain depth in inches that fell (or is forecast to fall) on `date`.
    fn get_rainfall(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError>;

    /// Average temperature in °F on `date`.
    fn get_average_temperature(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError>;
}

impl<S: WeatherDataSource + ?Sized> WeatherDataSource for &S {
    fn get_rainfall(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        (**self).get_rainfall(location, date)
    }

    fn get_average_temperature(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        (**self).get_average_temperature(location, date)
    }
}

impl<S: WeatherDataSource + ?Sized> WeatherDataSource for Box<S> {
    fn get_rainfall(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        (**self).get_rainfall(location, date)
    }

    fn get_average_temperature(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        (**self).get_average_temperature(location, date)
    }
}
