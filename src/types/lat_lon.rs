//! Defines [`LatLon`], the value type used to identify a query point.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Equality and hashing compare the raw bit patterns through [`OrderedFloat`], so a
/// `LatLon` can key a cache even though `f64` itself is neither `Eq` nor `Hash`.
///
/// # Examples
///
/// ```
/// use gardenbot::LatLon;
/// use std::collections::HashSet;
///
/// let boston = LatLon(42.3601, -71.0589);
/// assert_eq!(boston.latitude(), 42.3601);
///
/// let mut seen = HashSet::new();
/// seen.insert(boston);
/// assert!(seen.contains(&LatLon(42.3601, -71.0589)));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.0), OrderedFloat(self.1))
    }
}

impl PartialEq for LatLon {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for LatLon {}

impl Hash for LatLon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Formats as `latitude,longitude`, the form the Forecast.io API expects in its path.
impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equal_coordinates_share_a_key() {
        let mut map = HashMap::new();
        map.insert(LatLon(44.0, 44.0), "first");
        map.insert(LatLon(44.0, 44.0), "second");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&LatLon(44.0, 44.0)), Some(&"second"));
    }

    #[test]
    fn test_nan_is_reflexive() {
        let odd = LatLon(f64::NAN, 0.0);
        assert_eq!(odd, odd);
    }

    #[test]
    fn test_display_matches_path_segment() {
        assert_eq!(LatLon(44.5, -71.25).to_string(), "44.5,-71.25");
    }
}
