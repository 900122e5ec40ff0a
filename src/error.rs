use crate::advisor::AdviceError;
use crate::data_source::error::WeatherDataError;
use crate::irrigation::error::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenBotError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Advice(#[from] AdviceError),

    #[error("Environment variable {0} is not set")]
    MissingApiKey(&'static str),

    #[error("Failed to determine data directory")]
    DataDirResolution,
}

impl GardenBotError {
    /// True when the weather could not be pinned down well enough to advise.
    ///
    /// A presentation layer should answer these with a "can't determine watering
    /// needs right now" message instead of treating them as faults.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            GardenBotError::Advice(AdviceError::InsufficientData { .. })
        )
    }
}
