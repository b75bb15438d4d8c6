//! Core types for air quality observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{ParseError, ParseResult};

/// Routing tag attached to every observation ingested through the default
/// collection path.
pub const DEFAULT_COLLECTION_TAG: &str = "AirQualityCollectSQS";

/// Fixed display offset applied to stored UTC timestamps, in hours.
pub const DISPLAY_OFFSET_HOURS: i64 = 9;

/// Zone label appended to displayed timestamps.
pub const DISPLAY_ZONE: &str = "KST";

/// A stored observation as the store returns it.
///
/// The `rule` field is the routing tag used by the store's secondary index.
/// It is an internal grouping label and must never reach a caller; convert
/// to a [`Reading`] before exposing an observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Entity (device) identifier.
    pub device: String,
    /// Routing tag for the secondary index.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub rule: Option<String>,
    /// UTC epoch milliseconds.
    pub timestamp: i64,
    /// Temperature in Celsius.
    #[cfg_attr(feature = "serde", serde(default))]
    pub temperature: Option<f64>,
    /// Relative humidity percentage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity: Option<f64>,
    /// PM10 particulate concentration (ug/m3).
    #[cfg_attr(feature = "serde", serde(default))]
    pub pm10: Option<f64>,
    /// PM2.5 particulate concentration (ug/m3).
    #[cfg_attr(feature = "serde", serde(default))]
    pub pm25: Option<f64>,
}

impl Observation {
    /// Create an observation with no measurements and no routing tag.
    pub fn new(device: impl Into<String>, timestamp: i64) -> Self {
        Self {
            device: device.into(),
            rule: None,
            timestamp,
            temperature: None,
            humidity: None,
            pm10: None,
            pm25: None,
        }
    }

    /// Set the routing tag.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Set temperature and humidity.
    #[must_use]
    pub fn with_climate(mut self, temperature: f64, humidity: f64) -> Self {
        self.temperature = Some(temperature);
        self.humidity = Some(humidity);
        self
    }

    /// Set particulate readings.
    #[must_use]
    pub fn with_particulates(mut self, pm10: f64, pm25: f64) -> Self {
        self.pm10 = Some(pm10);
        self.pm25 = Some(pm25);
        self
    }

    /// Drop the routing tag and return the public projection.
    pub fn into_reading(self) -> Reading {
        Reading {
            device: self.device,
            timestamp: self.timestamp,
            temperature: self.temperature,
            humidity: self.humidity,
            pm10: self.pm10,
            pm25: self.pm25,
        }
    }
}

impl From<Observation> for Reading {
    fn from(observation: Observation) -> Self {
        observation.into_reading()
    }
}

/// The public view of an [`Observation`].
///
/// Carries no routing tag, so any serialized `Reading` is safe to return to
/// a caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Entity (device) identifier.
    pub device: String,
    /// UTC epoch milliseconds.
    pub timestamp: i64,
    /// Temperature in Celsius.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub temperature: Option<f64>,
    /// Relative humidity percentage.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub humidity: Option<f64>,
    /// PM10 particulate concentration (ug/m3).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pm10: Option<f64>,
    /// PM2.5 particulate concentration (ug/m3).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub pm25: Option<f64>,
}

impl Reading {
    /// Timestamp in the fixed display zone, e.g. `2019-05-21 18:23:00 KST`.
    pub fn display_time(&self) -> ParseResult<String> {
        display_time(self.timestamp)
    }
}

/// Format UTC epoch milliseconds in the fixed +09:00 display zone.
///
/// This is a constant shift, not a time zone database lookup. Sub-second
/// precision is dropped.
///
/// # Examples
///
/// ```
/// use airq_types::display_time;
///
/// assert_eq!(display_time(0).unwrap(), "1970-01-01 09:00:00 KST");
/// assert_eq!(display_time(1_558_430_580_016).unwrap(), "2019-05-21 18:23:00 KST");
/// ```
pub fn display_time(timestamp_ms: i64) -> ParseResult<String> {
    let shifted_ms = i128::from(timestamp_ms) + i128::from(DISPLAY_OFFSET_HOURS) * 3_600_000;
    let shifted = OffsetDateTime::from_unix_timestamp_nanos(shifted_ms * 1_000_000)
        .map_err(|_| ParseError::TimestampOutOfRange(timestamp_ms))?;
    let formatted = shifted
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .map_err(|e| ParseError::Format(e.to_string()))?;
    Ok(format!("{} {}", formatted, DISPLAY_ZONE))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any timestamp between 1970 and 2100 formats to a fixed-width label.
        #[test]
        fn display_time_is_fixed_width(ts in 0i64..4_102_444_800_000) {
            let label = display_time(ts).unwrap();
            prop_assert_eq!(label.len(), 23);
            prop_assert!(label.ends_with(" KST"));
        }

        /// Formatting never panics, whatever the input.
        #[test]
        fn display_time_never_panics(ts: i64) {
            let _ = display_time(ts);
        }
    }
}
