//! Result rendering.
//!
//! Orders the store's result set newest first, truncates it to the
//! intent's limit, strips the routing tag, and serializes the remainder as
//! JSON or as an HTML table.

use airq_types::{Observation, Reading};
use serde_json::json;

use crate::config::DisplayConfig;
use crate::error::QueryError;
use crate::html;
use crate::intent::{OutputFormat, QueryIntent};
use crate::response::HandlerResponse;

/// Sort by timestamp descending, keep the first `limit`, drop routing tags.
///
/// The sort is stable: observations with equal timestamps keep the order
/// the store returned them in.
pub fn prepare(mut observations: Vec<Observation>, limit: usize) -> Vec<Reading> {
    observations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    observations.truncate(limit);
    observations.into_iter().map(Reading::from).collect()
}

/// Render a result set for an intent.
///
/// # Errors
///
/// [`QueryError::NotFound`] when the result set is empty.
pub fn render(
    observations: Vec<Observation>,
    intent: &QueryIntent,
    display: &DisplayConfig,
) -> Result<HandlerResponse, QueryError> {
    if observations.is_empty() {
        return Err(QueryError::NotFound {
            device: intent.mode.entity().map(str::to_string),
        });
    }

    let readings = prepare(observations, intent.limit as usize);

    let response = match intent.format {
        OutputFormat::Json => HandlerResponse::json(
            200,
            &json!({
                "status": "success",
                "count": readings.len(),
                "results": readings,
            }),
        ),
        OutputFormat::Html => HandlerResponse::html(html::page(&readings, display)),
    };

    Ok(response.cached())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::QueryMode;
    use crate::response::{CACHE_CONTROL, CONTENT_TYPE};
    use airq_types::DEFAULT_COLLECTION_TAG;

    fn observations(timestamps: &[i64]) -> Vec<Observation> {
        timestamps
            .iter()
            .map(|ts| {
                Observation::new("SensorA", *ts)
                    .with_rule(DEFAULT_COLLECTION_TAG)
                    .with_climate(22.0, 45.0)
                    .with_particulates(30.0, 12.0)
            })
            .collect()
    }

    fn intent(mode: QueryMode, limit: u32, format: OutputFormat) -> QueryIntent {
        QueryIntent {
            mode,
            range_start: None,
            range_end: None,
            limit,
            format,
        }
    }

    #[test]
    fn test_prepare_sorts_newest_first() {
        let readings = prepare(observations(&[3, 9, 1, 7]), 10);
        let timestamps: Vec<i64> = readings.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_prepare_truncates() {
        let readings = prepare(observations(&[1, 2, 3, 4, 5, 6]), 4);
        let timestamps: Vec<i64> = readings.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![6, 5, 4, 3]);
    }

    #[test]
    fn test_prepare_tie_break_is_stable() {
        let input = vec![
            Observation::new("first", 5),
            Observation::new("newer", 6),
            Observation::new("second", 5),
            Observation::new("third", 5),
        ];
        let devices: Vec<String> = prepare(input, 10).into_iter().map(|r| r.device).collect();
        assert_eq!(devices, vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn test_render_empty_is_not_found_for_entity() {
        let i = intent(
            QueryMode::ByEntity("SensorA".to_string()),
            25,
            OutputFormat::Json,
        );
        let err = render(Vec::new(), &i, &DisplayConfig::default()).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { device: Some(ref d) } if d == "SensorA"));
    }

    #[test]
    fn test_render_empty_is_not_found_unfiltered() {
        let i = intent(QueryMode::Unfiltered, 25, OutputFormat::Html);
        let err = render(Vec::new(), &i, &DisplayConfig::default()).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { device: None }));
    }

    #[test]
    fn test_render_json() {
        let i = intent(QueryMode::Unfiltered, 5, OutputFormat::Json);
        let response = render(
            observations(&[10, 20, 30, 40, 50, 60, 70]),
            &i,
            &DisplayConfig::default(),
        )
        .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header(CACHE_CONTROL), Some("max-age=300"));

        let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 5);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0]["timestamp"], 70);
        assert_eq!(results[4]["timestamp"], 30);
        assert!(results.iter().all(|r| r.get("rule").is_none()));
        assert_eq!(results[0]["pm25"], 12.0);
    }

    #[test]
    fn test_render_html() {
        let i = intent(QueryMode::Unfiltered, 5, OutputFormat::Html);
        let response =
            render(observations(&[1, 2, 3]), &i, &DisplayConfig::default()).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header(CONTENT_TYPE), Some("text/html"));
        assert_eq!(response.header(CACHE_CONTROL), Some("max-age=300"));
        assert!(response.body.starts_with("<!DOCTYPE html>"));
        assert!(!response.body.contains(DEFAULT_COLLECTION_TAG));
    }

    #[test]
    fn test_render_is_deterministic() {
        let i = intent(QueryMode::Unfiltered, 25, OutputFormat::Json);
        let first = render(observations(&[5, 1, 3]), &i, &DisplayConfig::default()).unwrap();
        let second = render(observations(&[5, 1, 3]), &i, &DisplayConfig::default()).unwrap();
        assert_eq!(first, second);
    }
}
