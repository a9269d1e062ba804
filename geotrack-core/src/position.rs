//! Location value types and raw sample normalization.
//!
//! These structures represent one location sample and its projections,
//! independent of any platform API or delivery mechanism.
//!
//! Every measurement except the horizontal position fix carries its
//! accuracy as an `Option`: platforms (or platform versions) that cannot
//! report an accuracy produce `None`, never zero or a sentinel value, so
//! downstream analytics are not silently skewed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic position expressed in degrees latitude and longitude.
///
/// Latitude is positive in the northern hemisphere, negative in the
/// southern. Longitude is positive in the eastern hemisphere, negative in
/// the western. The range for latitude is -90 to 90, and for longitude is
/// -180 to 180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLng {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A position fix: coordinates plus horizontal accuracy.
///
/// Horizontal accuracy is always present; every platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFix {
    /// Where the device is
    pub coordinates: LatLng,
    /// Estimated horizontal error radius in meters
    pub accuracy_meters: f64,
}

/// Ground speed measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speed {
    /// Speed over ground in meters per second
    pub meters_per_second: f64,
    /// Estimated speed error, absent when the platform cannot report it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_meters_per_second: Option<f64>,
}

/// Azimuth (bearing) measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Azimuth {
    /// Direction of travel in degrees clockwise from true north
    pub degrees: f64,
    /// Estimated bearing error, absent when the platform cannot report it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_degrees: Option<f64>,
}

/// Altitude measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Altitude {
    /// Altitude above the reference ellipsoid in meters
    pub meters: f64,
    /// Estimated vertical error, absent when the platform cannot report it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
}

/// One full location sample: position fix plus all secondary measurements
/// and the capture timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedLocation {
    pub position: PositionFix,
    pub speed: Speed,
    pub azimuth: Azimuth,
    pub altitude: Altitude,
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl ExtendedLocation {
    /// The plain-coordinate projection of this sample.
    ///
    /// The coordinate stream publishes exactly this value for each
    /// extended location.
    pub fn lat_lng(&self) -> LatLng {
        self.position.coordinates
    }
}

/// A raw sample as extracted by a platform listener adapter.
///
/// Adapters extract fields only; they make no normalization decisions.
/// Capability-gated accuracies are `None` when the running platform or OS
/// version cannot supply them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    pub latitude: f64,
    pub longitude: f64,
    pub horizontal_accuracy_meters: f64,
    pub speed_meters_per_second: f64,
    pub speed_accuracy_meters_per_second: Option<f64>,
    pub azimuth_degrees: f64,
    pub azimuth_accuracy_degrees: Option<f64>,
    pub altitude_meters: f64,
    pub altitude_accuracy_meters: Option<f64>,
    pub timestamp_ms: u64,
}

impl From<RawSample> for ExtendedLocation {
    fn from(raw: RawSample) -> Self {
        ExtendedLocation {
            position: PositionFix {
                coordinates: LatLng::new(raw.latitude, raw.longitude),
                accuracy_meters: raw.horizontal_accuracy_meters,
            },
            speed: Speed {
                meters_per_second: raw.speed_meters_per_second,
                accuracy_meters_per_second: raw.speed_accuracy_meters_per_second,
            },
            azimuth: Azimuth {
                degrees: raw.azimuth_degrees,
                accuracy_degrees: raw.azimuth_accuracy_degrees,
            },
            altitude: Altitude {
                meters: raw.altitude_meters,
                accuracy_meters: raw.altitude_accuracy_meters,
            },
            timestamp_ms: raw.timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_sample() -> RawSample {
        RawSample {
            latitude: 52.5200,
            longitude: 13.4050,
            horizontal_accuracy_meters: 8.0,
            speed_meters_per_second: 2.5,
            speed_accuracy_meters_per_second: Some(0.5),
            azimuth_degrees: 180.0,
            azimuth_accuracy_degrees: Some(10.0),
            altitude_meters: 34.0,
            altitude_accuracy_meters: Some(3.0),
            timestamp_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_normalization_keeps_all_fields() {
        let extended = ExtendedLocation::from(raw_sample());
        assert_eq!(extended.position.coordinates.latitude, 52.5200);
        assert_eq!(extended.position.coordinates.longitude, 13.4050);
        assert_eq!(extended.position.accuracy_meters, 8.0);
        assert_eq!(extended.speed.meters_per_second, 2.5);
        assert_eq!(extended.speed.accuracy_meters_per_second, Some(0.5));
        assert_eq!(extended.azimuth.degrees, 180.0);
        assert_eq!(extended.altitude.meters, 34.0);
        assert_eq!(extended.timestamp_ms, 1_700_000_000_000);
    }

    #[test]
    fn test_missing_capability_stays_absent() {
        let mut raw = raw_sample();
        raw.speed_accuracy_meters_per_second = None;
        raw.azimuth_accuracy_degrees = None;
        raw.altitude_accuracy_meters = None;

        let extended = ExtendedLocation::from(raw);
        assert_eq!(extended.speed.accuracy_meters_per_second, None);
        assert_eq!(extended.azimuth.accuracy_degrees, None);
        assert_eq!(extended.altitude.accuracy_meters, None);
    }

    #[test]
    fn test_lat_lng_projection() {
        let extended = ExtendedLocation::from(raw_sample());
        assert_eq!(extended.lat_lng(), LatLng::new(52.5200, 13.4050));
    }

    #[test]
    fn test_lat_lng_display() {
        let pos = LatLng::new(-33.9, 151.2);
        assert_eq!(format!("{}", pos), "(-33.9, 151.2)");
    }

    #[test]
    fn test_extended_location_serializes_camel_case() {
        let extended = ExtendedLocation::from(raw_sample());
        let json = serde_json::to_value(&extended).unwrap();
        assert!(json.get("timestampMs").is_some());
        assert_eq!(
            json["speed"]["accuracyMetersPerSecond"],
            serde_json::json!(0.5)
        );
    }

    #[test]
    fn test_absent_accuracy_is_omitted_from_json() {
        let mut raw = raw_sample();
        raw.speed_accuracy_meters_per_second = None;
        let json = serde_json::to_value(ExtendedLocation::from(raw)).unwrap();
        assert!(json["speed"].get("accuracyMetersPerSecond").is_none());
    }
}
