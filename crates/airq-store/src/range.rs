//! The range-query seam between the query service and a backing store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use airq_types::Observation;

use crate::error::Result;
use crate::plan::QueryPlan;
use crate::store::Store;

/// A store that answers one [`QueryPlan`] at a time.
///
/// Implementations may return observations in any order and may return
/// more than `plan.limit` items; callers enforce ordering and truncation.
#[async_trait]
pub trait RangeStore: Send + Sync {
    /// Run a partition-key lookup with an optional sort-key predicate.
    async fn range_query(&self, plan: &QueryPlan) -> Result<Vec<Observation>>;
}

/// The SQLite store behind an async mutex, one query at a time.
#[async_trait]
impl RangeStore for Mutex<Store> {
    async fn range_query(&self, plan: &QueryPlan) -> Result<Vec<Observation>> {
        let store = self.lock().await;
        store.range_query(plan)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::plan::PartitionKey;

    #[tokio::test]
    async fn test_mutex_store_as_range_store() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_observations(&[Observation::new("SensorA", 1), Observation::new("SensorA", 2)])
            .unwrap();

        let source: Arc<dyn RangeStore> = Arc::new(Mutex::new(store));
        let plan = QueryPlan::new(PartitionKey::device("SensorA"));

        let observations = source.range_query(&plan).await.unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].timestamp, 2);
    }

    #[tokio::test]
    async fn test_concurrent_queries_share_one_store() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_observations(&[Observation::new("SensorA", 1)])
            .unwrap();
        let source: Arc<dyn RangeStore> = Arc::new(Mutex::new(store));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let source = Arc::clone(&source);
            handles.push(tokio::spawn(async move {
                let plan = QueryPlan::new(PartitionKey::device("SensorA"));
                source.range_query(&plan).await.map(|o| o.len())
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 1);
        }
    }
}
