use crate::types::day_window::StartEndDate;
use crate::types::lat_lon::LatLon;
use chrono::NaiveDate;

/// Aggregated rainfall and temperature around "today" for one location.
///
/// Computed fresh on every request and never stored.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct WeatherWindow {
    pub location: LatLon,
    /// Full span the aggregates were drawn from (today - 3 through today + 3).
    pub span: StartEndDate,
    /// Rain already observed over the 3 days before today, in inches.
    pub accumulated_rainfall: f64,
    /// Rain forecast for today and the next 3 days, in inches.
    pub expected_rainfall: f64,
    /// Mean daily temperature over the span in °F. `None` if every sample was absent.
    pub average_temperature: Option<f64>,
}

impl WeatherWindow {
    pub fn total_rainfall(&self) -> f64 {
        self.accumulated_rainfall + self.expected_rainfall
    }

    pub fn start_date(&self) -> NaiveDate {
        self.span.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.span.end
    }
}
