//! API-gateway style invocation.
//!
//! Accepts the proxy-integration event shape (`path` plus
//! `queryStringParameters`) and returns `statusCode`/`headers`/`body`, so
//! the resolver can be driven from a JSON document instead of a socket.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::resolver::QueryResolver;
use crate::response::HandlerResponse;

/// An incoming gateway event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// Request path; a `.html` suffix selects the HTML table.
    #[serde(default)]
    pub path: String,
    /// Query string. Gateways send `null` when there is none.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

/// The gateway's expected reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<HandlerResponse> for GatewayResponse {
    fn from(response: HandlerResponse) -> Self {
        Self {
            status_code: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}

/// Resolve one event.
pub async fn invoke(resolver: &QueryResolver, event: &GatewayEvent) -> GatewayResponse {
    let empty = HashMap::new();
    let params = event.query_string_parameters.as_ref().unwrap_or(&empty);
    resolver.resolve(&event.path, params).await.into()
}
