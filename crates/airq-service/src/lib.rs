//! Read-only query service for crowd-sourced air quality observations.
//!
//! This crate provides a service that:
//! - Validates query-string parameters (`device`/`name`, `start`, `end`, `count`)
//! - Maps each request onto a single range lookup against the store
//! - Orders results newest first and truncates them to the requested count
//! - Returns JSON, or an HTML table when the request path ends in `.html`
//!
//! The same resolver backs the HTTP server and a one-shot gateway-event
//! mode that reads a JSON event and writes a JSON reply.
//!
//! # HTTP Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /{*path}` - Query; `.html` suffix selects the HTML table
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/airq/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [storage]
//! path = "~/.local/share/airq/data.db"
//!
//! [display]
//! title = "Air@Home&Mobile"
//! heading = "KMU Crowd Sensor Cloud"
//! locale = "ko"
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod html;
pub mod intent;
pub mod locale;
pub mod planner;
pub mod render;
pub mod resolver;
pub mod response;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::{Config, ConfigError, DisplayConfig, ServerConfig, StorageConfig};
pub use error::{InvalidArgument, QueryError};
pub use gateway::{GatewayEvent, GatewayResponse};
pub use intent::{OutputFormat, QueryIntent, QueryMode};
pub use locale::Locale;
pub use resolver::QueryResolver;
pub use response::HandlerResponse;
pub use state::AppState;
