//! Query building: maps a [`QueryIntent`] onto the store's access patterns.
//!
//! | mode              | partition key                  | index                   |
//! |-------------------|--------------------------------|-------------------------|
//! | `ByEntity(id)`    | `device = id`                  | primary                 |
//! | `Unfiltered`      | `rule = AirQualityCollectSQS`  | `rule-timestamp-index`  |
//!
//! Both patterns share the same four sort-key shapes on `timestamp`.

use airq_store::{IndexSelector, PartitionKey, QueryPlan, SortPredicate};
use airq_types::DEFAULT_COLLECTION_TAG;

use crate::intent::{QueryIntent, QueryMode};

/// Build the store lookup for an intent. Total over any valid intent.
pub fn build_plan(intent: &QueryIntent) -> QueryPlan {
    let plan = match &intent.mode {
        QueryMode::ByEntity(id) => QueryPlan::new(PartitionKey::device(id.as_str())),
        QueryMode::Unfiltered => QueryPlan::new(PartitionKey::rule(DEFAULT_COLLECTION_TAG))
            .index(IndexSelector::rule_timestamp()),
    };

    let plan = match sort_predicate(intent.range_start, intent.range_end) {
        Some(predicate) => plan.sort(predicate),
        None => plan,
    };

    plan.limit(intent.limit)
}

/// Pick the predicate shape from which bounds are present.
pub fn sort_predicate(start: Option<i64>, end: Option<i64>) -> Option<SortPredicate> {
    match (start, end) {
        (None, None) => None,
        (Some(start), None) => Some(SortPredicate::AtLeast(start)),
        (None, Some(end)) => Some(SortPredicate::AtMost(end)),
        (Some(start), Some(end)) => Some(SortPredicate::Between(start, end)),
    }
}
