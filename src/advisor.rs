//! Turns aggregated weather into a watering recommendation.
//!
//! The decision itself is the pure function [`recommend`]; [`WateringAdvisor`] only
//! gathers its inputs from a [`WeatherAggregator`].

use crate::aggregator::WeatherAggregator;
use crate::data_source::error::WeatherDataError;
use crate::data_source::WeatherDataSource;
use crate::irrigation::profile::IrrigationProfile;
use crate::types::clock::{Clock, SystemClock};
use crate::types::day_window::StartEndDate;
use crate::types::lat_lon::LatLon;
use crate::types::weather_window::WeatherWindow;
use chrono::NaiveDate;
use log::{info, warn};
use thiserror::Error;

/// Weekly water depth a garden needs at the base temperature, in inches.
pub const BASE_INCHES: f64 = 1.0;
/// Temperature at which no adjustment applies, in °F.
pub const BASE_TEMPERATURE: f64 = 60.0;
/// Every this many °F away from the base temperature...
pub const TEMPERATURE_INCREMENT: f64 = 10.0;
/// ...moves the requirement by this many inches.
pub const INCH_INCREMENT: f64 = 0.5;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("No temperature data for {location} between {start} and {end}")]
    InsufficientData {
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),
}

/// Inches added to (or, below the base temperature, removed from) the base requirement.
pub fn temperature_adjustment(average_temperature: f64) -> f64 {
    (average_temperature - BASE_TEMPERATURE) / TEMPERATURE_INCREMENT * INCH_INCREMENT
}

/// Minimum weekly watering requirement at the given average temperature, in inches.
pub fn minimum_requirement(average_temperature: f64) -> f64 {
    BASE_INCHES + temperature_adjustment(average_temperature)
}

/// The outcome of a watering decision, plus the figures it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WateringRecommendation {
    pub location: LatLon,
    pub span: StartEndDate,
    pub accumulated_rainfall: f64,
    pub expected_rainfall: f64,
    pub average_temperature: f64,
    pub temperature_adjustment: f64,
    pub minimum_requirement_inches: f64,
    /// Water still needed on top of natural rainfall. Negative when rain alone
    /// already exceeds the requirement.
    pub required_external_water_inches: f64,
    /// Irrigation run time, present only when a profile was supplied. Never negative:
    /// when no water is needed this is `0.0`.
    pub minutes_to_irrigate: Option<f64>,
}

impl WateringRecommendation {
    pub fn total_rainfall(&self) -> f64 {
        self.accumulated_rainfall + self.expected_rainfall
    }

    pub fn watering_needed(&self) -> bool {
        self.required_external_water_inches > 0.0
    }

    pub fn start_date(&self) -> NaiveDate {
        self.span.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.span.end
    }
}

/// Decides how much water a site needs given its weather window.
///
/// # Errors
///
/// Returns [`AdviceError::InsufficientData`] when the window has no average
/// temperature, rather than guessing one.
pub fn recommend(
    window: &WeatherWindow,
    profile: Option<&IrrigationProfile>,
) -> Result<WateringRecommendation, AdviceError> {
    let average_temperature =
        window
            .average_temperature
            .ok_or(AdviceError::InsufficientData {
                location: window.location,
                start: window.span.start,
                end: window.span.end,
            })?;

    let adjustment = temperature_adjustment(average_temperature);
    let minimum = BASE_INCHES + adjustment;
    let required = minimum - window.accumulated_rainfall - window.expected_rainfall;
    let minutes = profile.map(|p| p.minutes_to_irrigate(required).max(0.0));

    Ok(WateringRecommendation {
        location: window.location,
        span: window.span,
        accumulated_rainfall: window.accumulated_rainfall,
        expected_rainfall: window.expected_rainfall,
        average_temperature,
        temperature_adjustment: adjustment,
        minimum_requirement_inches: minimum,
        required_external_water_inches: required,
        minutes_to_irrigate: minutes,
    })
}

/// Gathers weather aggregates for a location and applies [`recommend`].
#[derive(Debug, Clone)]
pub struct WateringAdvisor<S, C = SystemClock> {
    aggregator: WeatherAggregator<S, C>,
}

impl<S: WeatherDataSource, C: Clock> WateringAdvisor<S, C> {
    pub fn new(aggregator: WeatherAggregator<S, C>) -> Self {
        Self { aggregator }
    }

    pub fn aggregator(&self) -> &WeatherAggregator<S, C> {
        &self.aggregator
    }

    /// # Errors
    ///
    /// [`AdviceError::InsufficientData`] if no temperature could be found for the
    /// window, or [`AdviceError::WeatherData`] if the provider sent an unreadable payload.
    pub fn advise(
        &self,
        location: LatLon,
        profile: Option<&IrrigationProfile>,
    ) -> Result<WateringRecommendation, AdviceError> {
        let window = self.aggregator.window(location)?;
        let recommendation = recommend(&window, profile).inspect_err(|e| {
            warn!("Cannot advise on watering: {}", e);
        })?;
        info!(
            "Watering advice for {}: {:.2} in needed ({:.2} in rain, {:.1}°F average)",
            location,
            recommendation.required_external_water_inches,
            recommendation.total_rainfall(),
            recommendation.average_temperature
        );
        Ok(recommendation)
    }
}
