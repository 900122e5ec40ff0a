//! Serde model of the Forecast.io (Dark Sky) response, and the reductions the data
//! source applies to it.
//!
//! Only the fields the watering engine reads are modelled; everything else in the
//! payload is ignored.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastIoResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    /// Hours from UTC of the location's local time.
    pub offset: Option<f64>,
    pub hourly: Option<DataBlock<HourlyPoint>>,
    pub daily: Option<DataBlock<DailyPoint>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataBlock<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipType {
    Rain,
    Snow,
    Sleet,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    pub time: i64,
    pub precip_intensity: Option<f64>, // inches per hour
    pub precip_type: Option<PrecipType>,
    pub temperature: Option<f64>, // °F
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub time: i64,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
}

impl ForecastIoResponse {
    /// Total rain over every hourly sample in the payload, in inches.
    ///
    /// Samples of other precipitation types are skipped, a missing intensity counts
    /// as zero and negative readings are clamped to zero. `None` when the payload has
    /// no hourly block at all.
    pub fn rain_total(&self) -> Option<f64> {
        let hourly = self.hourly.as_ref()?;
        Some(
            hourly
                .data
                .iter()
                .filter(|hr| hr.precip_type == Some(PrecipType::Rain))
                .map(|hr| hr.precip_intensity.unwrap_or(0.0).max(0.0))
                .sum(),
        )
    }

    /// Mean of all hourly temperature readings, or `None` if there are none.
    pub fn mean_hourly_temperature(&self) -> Option<f64> {
        let hourly = self.hourly.as_ref()?;
        mean(hourly.data.iter().filter_map(|hr| hr.temperature))
    }

    /// Midpoint of the min/max temperature of the daily entry for `date`.
    ///
    /// An entry stamped at UTC midnight of `date` wins. Forecast.io stamps daily
    /// entries at *local* midnight though, so when no entry matches and the payload
    /// reports its UTC offset, the entry at local midnight is accepted instead.
    pub fn daily_mean_temperature(&self, date: NaiveDate) -> Option<f64> {
        let daily = self.daily.as_ref()?;
        let utc_midnight = date.and_time(NaiveTime::MIN).and_utc().timestamp();

        let entry = daily
            .data
            .iter()
            .find(|day| day.time == utc_midnight)
            .or_else(|| {
                let offset_secs = (self.offset? * 3600.0).round() as i64;
                let local_midnight = utc_midnight - offset_secs;
                daily.data.iter().find(|day| day.time == local_midnight)
            })?;

        Some((entry.temperature_min? + entry.temperature_max?) / 2.0)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORICAL: &str = include_str!("../../testdata/historical_response.json");
    const FORECAST: &str = include_str!("../../testdata/forecast_response.json");

    fn parse(raw: &str) -> ForecastIoResponse {
        serde_json::from_str(raw).expect("fixture should parse")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_historical_rain_excludes_snow() {
        let rain = parse(HISTORICAL).rain_total().unwrap();
        assert!((rain - 0.03).abs() < 1e-9, "got {rain}");
    }

    #[test]
    fn test_historical_mean_temperature() {
        let temp = parse(HISTORICAL).mean_hourly_temperature().unwrap();
        assert!((temp - 1048.0 / 24.0).abs() < 1e-9, "got {temp}");
    }

    #[test]
    fn test_forecast_rain_sums_whole_hourly_block() {
        let rain = parse(FORECAST).rain_total().unwrap();
        assert!((rain - 0.1625).abs() < 1e-9, "got {rain}");
    }

    #[test]
    fn test_daily_temperature_matches_utc_midnight() {
        let temp = parse(FORECAST).daily_mean_temperature(date(2017, 3, 15));
        assert_eq!(temp, Some(54.0));
    }

    #[test]
    fn test_daily_temperature_falls_back_to_local_midnight() {
        let temp = parse(FORECAST).daily_mean_temperature(date(2017, 3, 16));
        assert_eq!(temp, Some(60.0));
    }

    #[test]
    fn test_daily_temperature_without_matching_entry_is_absent() {
        assert_eq!(parse(FORECAST).daily_mean_temperature(date(2017, 3, 17)), None);
    }

    #[test]
    fn test_daily_temperature_needs_both_bounds() {
        assert_eq!(parse(FORECAST).daily_mean_temperature(date(2017, 3, 18)), None);
    }

    #[test]
    fn test_no_offset_means_utc_only() {
        let mut response = parse(FORECAST);
        response.offset = None;
        assert_eq!(response.daily_mean_temperature(date(2017, 3, 16)), None);
        assert_eq!(response.daily_mean_temperature(date(2017, 3, 15)), Some(54.0));
    }

    #[test]
    fn test_missing_blocks_are_absent() {
        let response = parse(r#"{"latitude": 1.0, "longitude": 2.0}"#);
        assert_eq!(response.rain_total(), None);
        assert_eq!(response.mean_hourly_temperature(), None);
        assert_eq!(response.daily_mean_temperature(date(2017, 3, 15)), None);
    }

    #[test]
    fn test_unknown_precip_type_is_not_rain() {
        let response = parse(
            r#"{"hourly": {"data": [
                {"time": 0, "precipIntensity": 0.4, "precipType": "hail"},
                {"time": 3600, "precipIntensity": -0.2, "precipType": "rain"},
                {"time": 7200, "precipIntensity": 0.1, "precipType": "rain"}
            ]}}"#,
        );
        let rain = response.rain_total().unwrap();
        assert!((rain - 0.1).abs() < 1e-9, "got {rain}");
    }
}
