//! [`WeatherDataSource`] backed by the Forecast.io (Dark Sky) REST API.
//!
//! Dates up to and including today are answered from the "time machine" endpoint, one
//! request per (location, date). Later dates are answered from the rolling forecast,
//! one request per location. Both kinds of response are kept in bounded LRU caches so
//! overlapping day windows do not hit the network twice.

use crate::config::{ForecastIoConfig, UNITS};
use crate::data_source::cache::LruCache;
use crate::data_source::error::WeatherDataError;
use crate::data_source::response::ForecastIoResponse;
use crate::data_source::WeatherDataSource;
use crate::types::clock::{Clock, SystemClock};
use crate::types::lat_lon::LatLon;
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use std::cell::RefCell;
use std::rc::Rc;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const HISTORICAL_EXCLUDE: &str = "currently,minutely,daily,alerts,flags";
const FORECAST_EXCLUDE: &str = "currently,minutely,alerts,flags";

type Payload = Rc<ForecastIoResponse>;

/// Which regime a dated query falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPath {
    Historical,
    Forecast,
}

impl QueryPath {
    /// Today still counts as historical; only strictly later dates are forecasts.
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date <= today {
            QueryPath::Historical
        } else {
            QueryPath::Forecast
        }
    }
}

/// Blocking Forecast.io client with per-instance response caching.
///
/// The caches use interior mutability without locking, so an instance is neither
/// `Send` nor `Sync`. Use one instance per worker thread.
pub struct ForecastIoDataSource<C: Clock = SystemClock> {
    config: ForecastIoConfig,
    client: Client,
    clock: C,
    historical: RefCell<LruCache<(LatLon, NaiveDate), Payload>>,
    forecast: RefCell<LruCache<LatLon, Payload>>,
}

impl ForecastIoDataSource<SystemClock> {
    /// Creates a data source whose "today" is the local calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::ClientBuild`] if the HTTP client cannot be created.
    pub fn new(config: ForecastIoConfig) -> Result<Self, WeatherDataError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ForecastIoDataSource<C> {
    /// Creates a data source that reads "today" from `clock` on every query.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::ClientBuild`] if the HTTP client cannot be created.
    pub fn with_clock(config: ForecastIoConfig, clock: C) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self {
            historical: RefCell::new(LruCache::new(config.cache_size)),
            forecast: RefCell::new(LruCache::new(config.cache_size)),
            config,
            client,
            clock,
        })
    }

    pub fn config(&self) -> &ForecastIoConfig {
        &self.config
    }

    /// Number of cached (historical, forecast) responses.
    pub fn cached_responses(&self) -> (usize, usize) {
        (self.historical.borrow().len(), self.forecast.borrow().len())
    }

    pub fn clear_cache(&self) {
        self.historical.borrow_mut().clear();
        self.forecast.borrow_mut().clear();
    }

    fn historical_data(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<Payload>, WeatherDataError> {
        let key = (location, date);
        if let Some(hit) = self.historical.borrow_mut().get(&key) {
            debug!("Cache hit for historical data at {} on {}", location, date);
            return Ok(Some(hit));
        }

        let time = date.and_time(NaiveTime::MIN).format(TIME_FORMAT);
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.config.base_url, self.config.api_key, location, time
        );
        let Some(payload) = self.fetch(&url, HISTORICAL_EXCLUDE)? else {
            return Ok(None);
        };
        if let Some(evicted) = self.historical.borrow_mut().insert(key, payload.clone()) {
            debug!("Evicted historical data for {} on {}", evicted.0, evicted.1);
        }
        Ok(Some(payload))
    }

    fn forecast_data(&self, location: LatLon) -> Result<Option<Payload>, WeatherDataError> {
        if let Some(hit) = self.forecast.borrow_mut().get(&location) {
            debug!("Cache hit for forecast data at {}", location);
            return Ok(Some(hit));
        }

        let url = format!(
            "{}/forecast/{}/{}",
            self.config.base_url, self.config.api_key, location
        );
        let Some(payload) = self.fetch(&url, FORECAST_EXCLUDE)? else {
            return Ok(None);
        };
        if let Some(evicted) = self.forecast.borrow_mut().insert(location, payload.clone()) {
            debug!("Evicted forecast data for {}", evicted);
        }
        Ok(Some(payload))
    }

    /// Performs one request. Provider failures come back as `Ok(None)`; only an
    /// unparseable 2xx body is an error.
    fn fetch(&self, url: &str, exclude: &str) -> Result<Option<Payload>, WeatherDataError> {
        let shown_url = self.config.redact(url);
        info!("Requesting weather data from {}", shown_url);

        match self.request(url, &shown_url, exclude) {
            Ok(body) => serde_json::from_str::<ForecastIoResponse>(&body)
                .map(|parsed| Some(Rc::new(parsed)))
                .map_err(|source| WeatherDataError::MalformedPayload {
                    url: shown_url,
                    source,
                }),
            Err(e) if e.is_provider_unavailable() => {
                warn!("{}; treating as no data", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn request(&self, url: &str, shown_url: &str, exclude: &str) -> Result<String, WeatherDataError> {
        let response = self
            .client
            .get(url)
            .query(&[("units", UNITS), ("exclude", exclude)])
            .send()
            .map_err(|e| WeatherDataError::NetworkRequest(shown_url.to_string(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url: shown_url.to_string(),
                        status,
                        source: e.without_url(),
                    }
                } else {
                    WeatherDataError::NetworkRequest(shown_url.to_string(), e.without_url())
                });
            }
        };

        // A body cut off mid-transfer is a transport failure, not a malformed payload
        response
            .text()
            .map_err(|e| WeatherDataError::NetworkRequest(shown_url.to_string(), e.without_url()))
    }
}

impl<C: Clock> WeatherDataSource for ForecastIoDataSource<C> {
    fn get_rainfall(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        let payload = match QueryPath::for_date(date, self.clock.today()) {
            QueryPath::Historical => self.historical_data(location, date)?,
            // The whole hourly forecast block, whatever the requested date
            QueryPath::Forecast => self.forecast_data(location)?,
        };
        Ok(payload.and_then(|p| p.rain_total()))
    }

    fn get_average_temperature(
        &self,
        location: LatLon,
        date: NaiveDate,
    ) -> Result<Option<f64>, WeatherDataError> {
        match QueryPath::for_date(date, self.clock.today()) {
            QueryPath::Historical => Ok(self
                .historical_data(location, date)?
                .and_then(|p| p.mean_hourly_temperature())),
            QueryPath::Forecast => Ok(self
                .forecast_data(location)?
                .and_then(|p| p.daily_mean_temperature(date))),
        }
    }
}
