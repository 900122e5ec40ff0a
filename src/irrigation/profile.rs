//! The registered irrigation system of one site.

use crate::irrigation::error::ProfileError;
use serde::{Deserialize, Serialize};

/// Gallons of water needed to cover one square foot to a depth of one inch.
pub const GALLONS_PER_SQFT_INCH: f64 = 0.6;

/// Area and flow rate of a site's irrigation system.
///
/// Both values are guaranteed finite and positive: the only ways to obtain a profile
/// are [`IrrigationProfile::new`] and deserialization, and both validate.
///
/// # Examples
///
/// ```
/// use gardenbot::IrrigationProfile;
///
/// let profile = IrrigationProfile::new(1000.0, 5.0)?;
/// assert_eq!(profile.minutes_to_irrigate(1.0), 120.0);
///
/// assert!(IrrigationProfile::new(0.0, 5.0).is_err());
/// # Ok::<(), gardenbot::ProfileError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", into = "ProfileRecord")]
pub struct IrrigationProfile {
    area_sqft: f64,
    flow_rate_gpm: f64,
}

impl IrrigationProfile {
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] unless both values are finite and
    /// strictly positive.
    pub fn new(area_sqft: f64, flow_rate_gpm: f64) -> Result<Self, ProfileError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(area_sqft) || !valid(flow_rate_gpm) {
            return Err(ProfileError::InvalidProfile {
                area_sqft,
                flow_rate_gpm,
            });
        }
        Ok(Self {
            area_sqft,
            flow_rate_gpm,
        })
    }

    pub fn area_sqft(&self) -> f64 {
        self.area_sqft
    }

    pub fn flow_rate_gpm(&self) -> f64 {
        self.flow_rate_gpm
    }

    /// Run time in minutes needed to apply `depth_inches` of water over the whole area.
    ///
    /// Linear in depth and deliberately unclamped: a negative depth gives a negative
    /// run time, and deciding what to show for that is up to the caller.
    pub fn minutes_to_irrigate(&self, depth_inches: f64) -> f64 {
        self.area_sqft * depth_inches * GALLONS_PER_SQFT_INCH / self.flow_rate_gpm
    }
}

// Unvalidated wire form
#[derive(Serialize, Deserialize)]
struct ProfileRecord {
    area_sqft: f64,
    flow_rate_gpm: f64,
}

impl TryFrom<ProfileRecord> for IrrigationProfile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        IrrigationProfile::new(record.area_sqft, record.flow_rate_gpm)
    }
}

impl From<IrrigationProfile> for ProfileRecord {
    fn from(profile: IrrigationProfile) -> Self {
        Self {
            area_sqft: profile.area_sqft,
            flow_rate_gpm: profile.flow_rate_gpm,
        }
    }
}
