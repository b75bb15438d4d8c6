//! Parameter interpretation.
//!
//! Turns the raw query-string map into a [`QueryIntent`]: who is being
//! asked about, over which time range, how many results, in which format.
//!
//! # Recognized parameters
//!
//! - `count`: result cap, default 25, valid range 5..=1000
//! - `device` or `name`: entity identifier (first non-empty wins)
//! - `start`: inclusive lower timestamp bound (epoch milliseconds)
//! - `end`: inclusive upper timestamp bound (epoch milliseconds)
//!
//! When an entity is named together with either bound, an absent `count`
//! defaults to 1000 instead of 25 so that range queries are not cut short.

use std::collections::HashMap;

use crate::error::InvalidArgument;

/// Cap applied when `count` is absent.
pub const DEFAULT_COUNT: i64 = 25;
/// Smallest accepted `count`.
pub const MIN_COUNT: i64 = 5;
/// Largest accepted `count`.
pub const MAX_COUNT: i64 = 1000;
/// Cap applied to an entity range query when `count` is absent.
pub const RANGE_DEFAULT_COUNT: i64 = MAX_COUNT;

/// Parameter names that identify the entity, in priority order.
const ENTITY_PARAMS: [&str; 2] = ["device", "name"];

/// Whose observations are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// One named device.
    ByEntity(String),
    /// Everything ingested through the default collection path.
    Unfiltered,
}

impl QueryMode {
    /// The named entity, if any.
    pub fn entity(&self) -> Option<&str> {
        match self {
            QueryMode::ByEntity(id) => Some(id),
            QueryMode::Unfiltered => None,
        }
    }
}

/// Requested representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Html,
}

impl OutputFormat {
    /// HTML when the request path ends in `.html`, JSON otherwise.
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(".html") {
            OutputFormat::Html
        } else {
            OutputFormat::Json
        }
    }
}

/// A validated, storage-independent description of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIntent {
    pub mode: QueryMode,
    /// Inclusive lower timestamp bound.
    pub range_start: Option<i64>,
    /// Inclusive upper timestamp bound.
    pub range_end: Option<i64>,
    /// Maximum number of results, within `MIN_COUNT..=MAX_COUNT`.
    pub limit: u32,
    pub format: OutputFormat,
}

impl QueryIntent {
    /// Whether either range bound is present.
    pub fn has_range(&self) -> bool {
        self.range_start.is_some() || self.range_end.is_some()
    }
}

/// Validate query-string parameters into a [`QueryIntent`].
///
/// # Errors
///
/// - `count` outside `5..=1000`, or not an integer
/// - `start` or `end` not an integer
/// - `start` greater than `end`
pub fn interpret(
    params: &HashMap<String, String>,
    format: OutputFormat,
) -> Result<QueryIntent, InvalidArgument> {
    let explicit_count = integer_param(params, "count")?;
    let count = explicit_count.unwrap_or(DEFAULT_COUNT);

    if count < MIN_COUNT {
        return Err(InvalidArgument::CountTooSmall {
            count,
            min: MIN_COUNT,
        });
    }
    if count > MAX_COUNT {
        return Err(InvalidArgument::CountTooLarge {
            count,
            max: MAX_COUNT,
        });
    }

    let range_start = integer_param(params, "start")?;
    let range_end = integer_param(params, "end")?;

    if let (Some(start), Some(end)) = (range_start, range_end)
        && start > end
    {
        return Err(InvalidArgument::InvertedRange { start, end });
    }

    let mode = ENTITY_PARAMS
        .iter()
        .find_map(|name| params.get(*name).filter(|v| !v.is_empty()))
        .map_or(QueryMode::Unfiltered, |id| QueryMode::ByEntity(id.clone()));

    let mut intent = QueryIntent {
        mode,
        range_start,
        range_end,
        // Bounded by MAX_COUNT above.
        limit: count as u32,
        format,
    };

    if intent.mode.entity().is_some() && intent.has_range() {
        intent.limit = explicit_count.unwrap_or(RANGE_DEFAULT_COUNT) as u32;
    }

    Ok(intent)
}

/// Parse an optional integer parameter. Absent and empty values are `None`.
fn integer_param(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<i64>, InvalidArgument> {
    match params.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| InvalidArgument::NotAnInteger {
                param: name,
                value: value.to_string(),
            }),
    }
}
