//! Watering advice for gardens from recent and forecasted weather.
//!
//! Data flows one way: a [`WeatherDataSource`] answers per-day rainfall and temperature
//! queries, a [`WeatherAggregator`] rolls them into windows around today, and
//! [`recommend`] turns a window (plus an optional [`IrrigationProfile`]) into a
//! [`WateringRecommendation`]. [`GardenBot`] wires all of it to Forecast.io.
//!
//! All quantities are US customary: inches of water, gallons per minute, °F.

mod advisor;
mod aggregator;
mod config;
mod data_source;
mod error;
mod garden_bot;
mod irrigation;
mod types;
mod utils;

pub use error::GardenBotError;
pub use garden_bot::*;

pub use advisor::{
    minimum_requirement, recommend, temperature_adjustment, AdviceError, WateringAdvisor,
    WateringRecommendation, BASE_INCHES, BASE_TEMPERATURE, INCH_INCREMENT, TEMPERATURE_INCREMENT,
};
pub use aggregator::{
    WeatherAggregator, ACCUMULATION_WINDOW, EXPECTATION_WINDOW, TEMPERATURE_WINDOW,
};
pub use config::{
    ForecastIoConfig, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_CACHE_SIZE, DEFAULT_TIMEOUT, UNITS,
};

pub use data_source::cache::LruCache;
pub use data_source::error::WeatherDataError;
pub use data_source::fixed::FixedDataSource;
pub use data_source::forecast_io::{ForecastIoDataSource, QueryPath};
pub use data_source::response::{DailyPoint, DataBlock, ForecastIoResponse, HourlyPoint, PrecipType};
pub use data_source::WeatherDataSource;

pub use irrigation::error::ProfileError;
pub use irrigation::profile::{IrrigationProfile, GALLONS_PER_SQFT_INCH};
pub use irrigation::store::{register_profile, FileProfileStore, MemoryProfileStore, ProfileStore};

pub use types::clock::{Clock, SystemClock};
pub use types::day_window::{DayWindow, StartEndDate};
pub use types::lat_lon::LatLon;
pub use types::observation::DailyObservation;
pub use types::weather_window::WeatherWindow;
