//! The main entry point: a Forecast.io-backed watering advisor.
//!
//! [`GardenBot`] wires a [`ForecastIoDataSource`] into a [`WeatherAggregator`] and a
//! [`WateringAdvisor`], sharing one clock between them so the historical/forecast
//! boundary and the day windows always agree on what "today" is.

use crate::advisor::{WateringAdvisor, WateringRecommendation};
use crate::aggregator::WeatherAggregator;
use crate::config::ForecastIoConfig;
use crate::data_source::forecast_io::ForecastIoDataSource;
use crate::error::GardenBotError;
use crate::irrigation::profile::IrrigationProfile;
use crate::irrigation::store::ProfileStore;
use crate::types::clock::{Clock, SystemClock};
use crate::types::lat_lon::LatLon;
use crate::types::weather_window::WeatherWindow;
use bon::bon;
use log::debug;

/// Client that answers "how much should I water?" for a location.
///
/// Not thread-safe: the underlying response cache is owned by this instance. Create
/// one per worker if advice is needed concurrently.
///
/// # Examples
///
/// ```no_run
/// use gardenbot::{GardenBot, GardenBotError, IrrigationProfile, LatLon};
///
/// # fn main() -> Result<(), GardenBotError> {
/// let bot = GardenBot::from_env()?;
/// let profile = IrrigationProfile::new(1000.0, 5.0)?;
///
/// let advice = bot
///     .water_advice(LatLon(42.3601, -71.0589))
///     .profile(profile)
///     .call()?;
///
/// println!(
///     "Add {:.2} inches ({:?} minutes of irrigation)",
///     advice.required_external_water_inches, advice.minutes_to_irrigate
/// );
/// # Ok(())
/// # }
/// ```
pub struct GardenBot<C: Clock + Clone = SystemClock> {
    advisor: WateringAdvisor<ForecastIoDataSource<C>, C>,
}

impl GardenBot<SystemClock> {
    /// Creates a client that uses the local calendar date as "today".
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::WeatherData`] if the HTTP client cannot be built.
    pub fn new(config: ForecastIoConfig) -> Result<Self, GardenBotError> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a client configured from the environment (see [`ForecastIoConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::MissingApiKey`] if no API key is configured.
    pub fn from_env() -> Result<Self, GardenBotError> {
        Self::new(ForecastIoConfig::from_env()?)
    }
}

#[bon]
impl<C: Clock + Clone> GardenBot<C> {
    /// Creates a client whose notion of "today" comes from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::WeatherData`] if the HTTP client cannot be built.
    pub fn with_clock(config: ForecastIoConfig, clock: C) -> Result<Self, GardenBotError> {
        let source = ForecastIoDataSource::with_clock(config, clock.clone())?;
        let aggregator = WeatherAggregator::with_clock(source, clock);
        Ok(Self {
            advisor: WateringAdvisor::new(aggregator),
        })
    }

    /// Aggregated rainfall and temperature around today, without a recommendation.
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::WeatherData`] if the provider sent an unreadable payload.
    pub fn weather_window(&self, location: LatLon) -> Result<WeatherWindow, GardenBotError> {
        Ok(self.advisor.aggregator().window(location)?)
    }

    /// Builds a watering recommendation for a location.
    ///
    /// Start the builder with `.water_advice(location)`, optionally pass
    /// `.profile(IrrigationProfile)` to get a run time, then `.call()`.
    ///
    /// # Errors
    ///
    /// *   [`GardenBotError::Advice`] wrapping `InsufficientData` if no temperature was
    ///     available anywhere in the 7-day window. Check with
    ///     [`GardenBotError::is_insufficient_data`].
    /// *   [`GardenBotError::Advice`] wrapping `WeatherData` for unreadable payloads.
    #[builder(start_fn = water_advice)]
    #[doc(hidden)]
    pub fn build_water_advice(
        &self,
        #[builder(start_fn)] location: LatLon,
        profile: Option<IrrigationProfile>,
    ) -> Result<WateringRecommendation, GardenBotError> {
        Ok(self.advisor.advise(location, profile.as_ref())?)
    }

    /// Looks up the profile registered for `user` and advises with it, if there is one.
    ///
    /// # Errors
    ///
    /// As for [`GardenBot::water_advice`], plus [`GardenBotError::Profile`] if the
    /// store cannot be read.
    pub fn water_advice_for_user<S: ProfileStore + ?Sized>(
        &self,
        store: &S,
        user: &str,
        location: LatLon,
    ) -> Result<WateringRecommendation, GardenBotError> {
        let profile = store.get(user)?;
        if profile.is_none() {
            debug!("No irrigation profile registered for user {}", user);
        }
        self.water_advice(location).maybe_profile(profile).call()
    }

    /// Cached provider responses as (historical, forecast).
    pub fn cached_responses(&self) -> (usize, usize) {
        self.advisor.aggregator().source().cached_responses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irrigation::store::{register_profile, MemoryProfileStore};
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HISTORICAL: &str = include_str!("../testdata/historical_response.json");
    const FORECAST: &str = include_str!("../testdata/forecast_response.json");

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 3, 14).unwrap()
    }

    async fn provider() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/forecast/key/44,44,[0-9T:-]+$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HISTORICAL))
            // 2017-03-11 through 2017-03-14, each fetched once
            .expect(4)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/forecast/key/44,44$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FORECAST))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_advice_from_fixtures() {
        let server = provider().await;
        let (window, advice, cached) = {
            let uri = server.uri();
            tokio::task::spawn_blocking(move || {
                let config = ForecastIoConfig::builder().api_key("key").base_url(uri).build();
                let bot = GardenBot::with_clock(config, today()).unwrap();
                let window = bot.weather_window(LatLon(44.0, 44.0)).unwrap();
                let profile = IrrigationProfile::new(1000.0, 5.0).unwrap();
                let advice = bot
                    .water_advice(LatLon(44.0, 44.0))
                    .profile(profile)
                    .call()
                    .unwrap();
                (window, advice, bot.cached_responses())
            })
            .await
            .unwrap()
        };

        // Each historical day carries 0.03 in of rain; each forecast day reuses the
        // whole 0.1625 in hourly block.
        assert!((window.accumulated_rainfall - 0.09).abs() < 1e-9);
        assert!((window.expected_rainfall - (0.03 + 3.0 * 0.1625)).abs() < 1e-9);

        // Four historical days at 1048/24 °F plus the 54 °F and 60 °F forecast days;
        // 2017-03-17 has no daily entry and drops out of the average.
        let expected_temp = (4.0 * 1048.0 / 24.0 + 54.0 + 60.0) / 6.0;
        let temp = window.average_temperature.unwrap();
        assert!((temp - expected_temp).abs() < 1e-9, "got {temp}");

        // About 48 °F lowers the requirement below the rain already counted.
        assert_eq!(advice.average_temperature, temp);
        assert!(!advice.watering_needed());
        assert!(advice.required_external_water_inches < 0.0);
        assert_eq!(advice.minutes_to_irrigate, Some(0.0));
        assert_eq!(cached, (4, 1));
    }

    #[tokio::test]
    async fn test_advice_for_registered_user() {
        let server = provider().await;
        let uri = server.uri();
        let (with_profile, without_profile) = tokio::task::spawn_blocking(move || {
            let config = ForecastIoConfig::builder().api_key("key").base_url(uri).build();
            let bot = GardenBot::with_clock(config, today()).unwrap();
            let mut store = MemoryProfileStore::new();
            register_profile(&mut store, "U1", 1000.0, 5.0).unwrap();
            (
                bot.water_advice_for_user(&store, "U1", LatLon(44.0, 44.0)).unwrap(),
                bot.water_advice_for_user(&store, "U2", LatLon(44.0, 44.0)).unwrap(),
            )
        })
        .await
        .unwrap();

        assert!(with_profile.minutes_to_irrigate.is_some());
        assert!(without_profile.minutes_to_irrigate.is_none());
        assert_eq!(
            with_profile.required_external_water_inches,
            without_profile.required_external_water_inches
        );
    }

    #[tokio::test]
    async fn test_provider_down_is_insufficient_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let uri = server.uri();
        let err = tokio::task::spawn_blocking(move || {
            let config = ForecastIoConfig::builder().api_key("key").base_url(uri).build();
            let bot = GardenBot::with_clock(config, today()).unwrap();
            bot.water_advice(LatLon(44.0, 44.0)).call().unwrap_err()
        })
        .await
        .unwrap();
        assert!(err.is_insufficient_data(), "got {err:?}");
    }

    #[test]
    fn test_bot_helper_builds_without_runtime() {
        // Construction alone never touches the network.
        let server_uri = "http://127.0.0.1:9".to_string();
        let config = ForecastIoConfig::builder()
            .api_key("key")
            .base_url(server_uri)
            .build();
        let bot = GardenBot::with_clock(config, today()).unwrap();
        assert_eq!(bot.cached_responses(), (0, 0));
    }
}
