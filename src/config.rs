//! Connection settings for the Forecast.io provider.

use crate::error::GardenBotError;
use bon::bon;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the Forecast.io API key.
pub const API_KEY_ENV: &str = "FORECAST_IO_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.forecast.io";
/// Maximum distinct responses each data-source cache keeps before evicting.
pub const DEFAULT_CACHE_SIZE: usize = 512;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Unit system requested from the provider: inches and °F.
pub const UNITS: &str = "us";

/// Settings for [`crate::ForecastIoDataSource`].
///
/// # Examples
///
/// ```
/// use gardenbot::ForecastIoConfig;
///
/// let config = ForecastIoConfig::builder()
///     .api_key("secret")
///     .cache_size(64)
///     .build();
///
/// assert_eq!(config.cache_size, 64);
/// assert_eq!(config.base_url, "https://api.forecast.io");
/// // The key never shows up in debug output.
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone)]
pub struct ForecastIoConfig {
    pub api_key: String,
    pub base_url: String,
    pub cache_size: usize,
    pub timeout: Duration,
}

#[bon]
impl ForecastIoConfig {
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into, default = DEFAULT_BASE_URL.to_string())] base_url: String,
        #[builder(default = DEFAULT_CACHE_SIZE)] cache_size: usize,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_size,
            timeout,
        }
    }

    /// Builds a default configuration with the API key taken from
    /// [`FORECAST_IO_API_KEY`](API_KEY_ENV).
    ///
    /// # Errors
    ///
    /// Returns [`GardenBotError::MissingApiKey`] if the variable is unset or blank.
    pub fn from_env() -> Result<Self, GardenBotError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GardenBotError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::builder().api_key(api_key).build())
    }

    /// Replaces the API key in `text` so URLs can be logged.
    pub(crate) fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.api_key, "<redacted>")
        }
    }
}

impl fmt::Debug for ForecastIoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastIoConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cache_size", &self.cache_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}
