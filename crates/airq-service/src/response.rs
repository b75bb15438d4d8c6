//! Transport-independent handler responses.

use std::collections::BTreeMap;

/// `Cache-Control` header name.
pub const CACHE_CONTROL: &str = "Cache-Control";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Freshness window advertised on successful and not-found responses.
pub const CACHE_MAX_AGE_SECS: u32 = 300;

/// Status code, headers and body produced by one invocation.
///
/// Headers are kept in a sorted map so repeated invocations serialize
/// identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    /// A JSON body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        Self {
            status,
            headers,
            body: body.to_string(),
        }
    }

    /// A `200` HTML document.
    pub fn html(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "text/html".to_string());
        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Add the freshness directive.
    #[must_use]
    pub fn cached(mut self) -> Self {
        self.headers.insert(
            CACHE_CONTROL.to_string(),
            format!("max-age={}", CACHE_MAX_AGE_SECS),
        );
        self
    }

    /// Look up a header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_response() {
        let response = HandlerResponse::json(200, &json!({"status": "success"}));
        assert_eq!(response.status, 200);
        assert_eq!(response.header(CONTENT_TYPE), Some("application/json"));
        assert!(response.header(CACHE_CONTROL).is_none());
        assert_eq!(response.body, r#"{"status":"success"}"#);
    }

    #[test]
    fn test_html_response_cached() {
        let response = HandlerResponse::html("<html></html>".to_string()).cached();
        assert_eq!(response.status, 200);
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html"));
        assert_eq!(response.header(CACHE_CONTROL), Some("max-age=300"));
    }
}
