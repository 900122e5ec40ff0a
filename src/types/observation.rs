use crate::types::lat_lon::LatLon;
use chrono::NaiveDate;

/// Rainfall and temperature for one location on one day.
///
/// Either value may be absent when the provider had no data or failed; absence is
/// an ordinary outcome, not an error.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DailyObservation {
    pub location: LatLon,
    pub date: NaiveDate,
    pub rainfall_inches: Option<f64>,    // sum of hourly rain intensity
    pub average_temperature: Option<f64>, // °F
}
