//! Platform-agnostic types for crowd-sourced air quality observations.
//!
//! This crate provides the record types shared by the store
//! (airq-store) and the query service (airq-service).
//!
//! # Features
//!
//! - [`Observation`]: a stored record, including its internal routing tag
//! - [`Reading`]: the public projection with the routing tag removed
//! - Fixed-offset display time formatting
//!
//! # Example
//!
//! ```
//! use airq_types::{Observation, Reading};
//!
//! let observation = Observation::new("AirSensor20133219", 1_558_430_580_016)
//!     .with_rule("AirQualityCollectSQS")
//!     .with_climate(23.1, 41.0);
//! let reading: Reading = observation.into();
//! assert_eq!(reading.display_time().unwrap(), "2019-05-21 18:23:00 KST");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    DEFAULT_COLLECTION_TAG, DISPLAY_OFFSET_HOURS, DISPLAY_ZONE, Observation, Reading,
    display_time,
};
