//! Store doubles for resolver and router tests.

use std::sync::Mutex;

use async_trait::async_trait;

use airq_store::{Error, QueryPlan, RangeStore, Result};
use airq_types::Observation;

/// Returns a fixed result set and records every plan it receives.
#[derive(Default)]
pub struct RecordingStore {
    observations: Vec<Observation>,
    plans: Mutex<Vec<QueryPlan>>,
}

impl RecordingStore {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self {
            observations,
            plans: Mutex::new(Vec::new()),
        }
    }

    pub fn plans(&self) -> Vec<QueryPlan> {
        self.plans.lock().unwrap().clone()
    }
}

#[async_trait]
impl RangeStore for RecordingStore {
    async fn range_query(&self, plan: &QueryPlan) -> Result<Vec<Observation>> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(self.observations.clone())
    }
}

/// Fails every query with the given message.
pub struct FailingStore(pub &'static str);

#[async_trait]
impl RangeStore for FailingStore {
    async fn range_query(&self, _plan: &QueryPlan) -> Result<Vec<Observation>> {
        Err(Error::InvalidPlan(self.0.to_string()))
    }
}

/// `count` observations for one device, one minute apart, oldest first.
pub fn minute_series(device: &str, start: i64, count: i64) -> Vec<Observation> {
    (0..count)
        .map(|i| {
            Observation::new(device, start + i * 60_000)
                .with_rule(airq_types::DEFAULT_COLLECTION_TAG)
                .with_climate(21.0 + i as f64 * 0.5, 40.0)
                .with_particulates(25.0, 11.0)
        })
        .collect()
}
