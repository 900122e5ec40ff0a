use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // The provider answered 2xx but the body is not a forecast payload
    #[error("Malformed weather payload from {url}")]
    MalformedPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherDataError {
    /// True for failures that mean "the provider could not answer right now".
    ///
    /// These are recovered inside the data source as an absent sample and never
    /// reach the aggregation layer.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            WeatherDataError::NetworkRequest(..) | WeatherDataError::HttpStatus { .. }
        )
    }
}
