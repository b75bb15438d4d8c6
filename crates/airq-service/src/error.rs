//! Error types for query resolution.
//!
//! Every failure a caller can see is a [`QueryError`]. Each variant maps to
//! exactly one response shape in [`QueryError::into_response`].

use serde_json::json;

use crate::locale::Locale;
use crate::response::HandlerResponse;

/// A caller-supplied parameter was rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    #[error("count too small: {count} (minimum {min})")]
    CountTooSmall { count: i64, min: i64 },

    #[error("count too large: {count} (maximum {max})")]
    CountTooLarge { count: i64, max: i64 },

    #[error("{param} is not an integer: '{value}'")]
    NotAnInteger { param: &'static str, value: String },

    #[error("start {start} is after end {end}")]
    InvertedRange { start: i64, end: i64 },
}

impl InvalidArgument {
    /// Message shown to the caller.
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            InvalidArgument::CountTooSmall { min, .. } => locale.count_too_small(*min),
            InvalidArgument::CountTooLarge { max, .. } => locale.count_too_large(*max),
            InvalidArgument::NotAnInteger { param, value } => locale.not_an_integer(param, value),
            InvalidArgument::InvertedRange { start, end } => locale.inverted_range(*start, *end),
        }
    }
}

/// Errors surfaced by the query resolver.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Validation failure; the store was never queried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// A well-formed query matched nothing.
    #[error("Not found: {device:?}")]
    NotFound { device: Option<String> },

    /// The store reported a failure.
    #[error("Unable to query. Error: {0}")]
    Store(#[from] airq_store::Error),
}

impl QueryError {
    /// Message shown to the caller.
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            QueryError::InvalidArgument(e) => e.localized(locale),
            QueryError::NotFound {
                device: Some(device),
            } => locale.no_data_for(device),
            QueryError::NotFound { device: None } => locale.no_matching_records().to_string(),
            QueryError::Store(_) => self.to_string(),
        }
    }

    /// Render as a `400` error payload.
    ///
    /// Validation failures are never cached. Not-found and store failures
    /// carry the same freshness directive as a success.
    pub fn into_response(self, locale: Locale) -> HandlerResponse {
        let response = HandlerResponse::json(
            400,
            &json!({
                "status": "error",
                "error": self.localized(locale),
            }),
        );

        match self {
            QueryError::InvalidArgument(_) => response,
            QueryError::NotFound { .. } | QueryError::Store(_) => response.cached(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::CACHE_CONTROL;

    fn body(response: &HandlerResponse) -> serde_json::Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = InvalidArgument::CountTooSmall { count: 3, min: 5 };
        assert!(err.to_string().starts_with("count too small"));

        let err = InvalidArgument::CountTooLarge { count: 5000, max: 1000 };
        assert!(err.to_string().starts_with("count too large"));
    }

    #[test]
    fn test_validation_response_is_not_cached() {
        let response = QueryError::from(InvalidArgument::CountTooSmall { count: 3, min: 5 })
            .into_response(Locale::En);

        assert_eq!(response.status, 400);
        assert!(response.header(CACHE_CONTROL).is_none());
        let json = body(&response);
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().contains("too small"));
    }

    #[test]
    fn test_not_found_response_is_cached() {
        let response = QueryError::NotFound {
            device: Some("SensorA".to_string()),
        }
        .into_response(Locale::En);

        assert_eq!(response.status, 400);
        assert_eq!(response.header(CACHE_CONTROL), Some("max-age=300"));
        assert_eq!(body(&response)["error"], "no data for SensorA");
    }

    #[test]
    fn test_not_found_without_device() {
        let response = QueryError::NotFound { device: None }.into_response(Locale::Ko);
        assert_eq!(body(&response)["error"], "검색된 자료가 없습니다.");
    }

    #[test]
    fn test_store_error_includes_detail() {
        let err = QueryError::from(airq_store::Error::InvalidPlan("throttled".to_string()));
        let response = err.into_response(Locale::Ko);

        assert_eq!(response.status, 400);
        assert_eq!(response.header(CACHE_CONTROL), Some("max-age=300"));
        let message = body(&response)["error"].as_str().unwrap().to_string();
        assert!(message.starts_with("Unable to query. Error:"));
        assert!(message.contains("throttled"));
    }
}
