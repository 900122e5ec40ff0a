use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid irrigation profile: area {area_sqft} sqft, flow rate {flow_rate_gpm} gpm (both must be positive)")]
    InvalidProfile { area_sqft: f64, flow_rate_gpm: f64 },

    #[error("Failed to create profile store directory '{0}'")]
    StoreDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read profile store '{0}'")]
    StoreRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write profile store '{0}'")]
    StoreWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode profile store '{0}'")]
    StoreDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode profile store")]
    StoreEncode(#[source] Box<bincode::error::EncodeError>),
}
