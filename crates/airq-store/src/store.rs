//! Main store implementation.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use airq_types::Observation;

use crate::error::{Error, Result};
use crate::plan::QueryPlan;
use crate::schema;

/// SQLite-based store for air quality observations.
///
/// Observations live in a single table keyed by `(device, timestamp)` with
/// a secondary index on `(rule, timestamp)`.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Insert observations, replacing any existing item with the same
    /// device and timestamp.
    ///
    /// Returns the number of rows written.
    pub fn insert_observations(&self, observations: &[Observation]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut written = 0;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO observations
                 (device, timestamp, rule, temperature, humidity, pm10, pm25)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for observation in observations {
                written += stmt.execute(rusqlite::params![
                    observation.device,
                    observation.timestamp,
                    observation.rule,
                    observation.temperature,
                    observation.humidity,
                    observation.pm10,
                    observation.pm25,
                ])?;
            }
        }

        tx.commit()?;
        debug!("Wrote {} observations", written);
        Ok(written)
    }

    /// Run a range lookup.
    ///
    /// The plan is validated against the table layout before any SQL runs.
    pub fn range_query(&self, plan: &QueryPlan) -> Result<Vec<Observation>> {
        plan.validate()?;

        let sql = plan.build_sql();
        let (_, params) = plan.build_where();

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let observations = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(Observation {
                    device: row.get(0)?,
                    rule: row.get(1)?,
                    timestamp: row.get(2)?,
                    temperature: row.get(3)?,
                    humidity: row.get(4)?,
                    pm10: row.get(5)?,
                    pm25: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{IndexSelector, PartitionKey, SortPredicate};
    use airq_types::DEFAULT_COLLECTION_TAG;

    fn seeded_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let mut observations = Vec::new();
        for i in 1..=10 {
            observations.push(
                Observation::new("SensorA", i * 100)
                    .with_rule(DEFAULT_COLLECTION_TAG)
                    .with_climate(20.0 + i as f64, 40.0)
                    .with_particulates(10.0, 5.0),
            );
        }
        // A second device collected through a different path
        observations.push(Observation::new("SensorB", 150).with_rule("ManualUpload"));
        observations.push(Observation::new("SensorB", 250).with_rule(DEFAULT_COLLECTION_TAG));
        store.insert_observations(&observations).unwrap();
        store
    }

    fn timestamps(observations: &[Observation]) -> Vec<i64> {
        observations.iter().map(|o| o.timestamp).collect()
    }

    #[test]
    fn test_open_in_memory_is_empty() {
        let store = Store::open_in_memory().unwrap();
        let plan = QueryPlan::new(PartitionKey::device("SensorA"));
        assert!(store.range_query(&plan).unwrap().is_empty());
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("data.db");

        let store = Store::open(&path).unwrap();
        store
            .insert_observations(&[Observation::new("SensorA", 1)])
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_observations(&[Observation::new("SensorA", 1).with_climate(10.0, 10.0)])
            .unwrap();
        store
            .insert_observations(&[Observation::new("SensorA", 1).with_climate(30.0, 10.0)])
            .unwrap();

        let plan = QueryPlan::new(PartitionKey::device("SensorA"));
        let observations = store.range_query(&plan).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].temperature, Some(30.0));
    }

    #[test]
    fn test_query_by_device_newest_first() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::device("SensorA")).limit(3);

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![1000, 900, 800]);
        assert_eq!(observations[0].rule.as_deref(), Some(DEFAULT_COLLECTION_TAG));
        assert_eq!(observations[0].temperature, Some(30.0));
    }

    #[test]
    fn test_query_oldest_first() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::device("SensorA"))
            .oldest_first()
            .limit(2);

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![100, 200]);
    }

    #[test]
    fn test_query_at_least_is_inclusive() {
        let store = seeded_store();
        let plan =
            QueryPlan::new(PartitionKey::device("SensorA")).sort(SortPredicate::AtLeast(800));

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![1000, 900, 800]);
    }

    #[test]
    fn test_query_at_most_is_inclusive() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::device("SensorA")).sort(SortPredicate::AtMost(300));

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![300, 200, 100]);
    }

    #[test]
    fn test_query_between_is_inclusive() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::device("SensorA"))
            .sort(SortPredicate::Between(400, 600));

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![600, 500, 400]);
    }

    #[test]
    fn test_query_by_rule_index_spans_devices() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::rule(DEFAULT_COLLECTION_TAG))
            .index(IndexSelector::rule_timestamp())
            .sort(SortPredicate::Between(200, 300));

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![300, 250, 200]);
        assert_eq!(observations[1].device, "SensorB");
    }

    #[test]
    fn test_query_by_rule_excludes_other_tags() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::rule("ManualUpload"))
            .index(IndexSelector::rule_timestamp());

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(timestamps(&observations), vec![150]);
    }

    #[test]
    fn test_query_invalid_plan_is_rejected() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::rule(DEFAULT_COLLECTION_TAG));

        let result = store.range_query(&plan);
        assert!(matches!(result, Err(Error::InvalidPlan(_))));
    }

    #[test]
    fn test_missing_measurements_round_trip_as_none() {
        let store = seeded_store();
        let plan = QueryPlan::new(PartitionKey::device("SensorB"));

        let observations = store.range_query(&plan).unwrap();
        assert_eq!(observations.len(), 2);
        assert!(observations.iter().all(|o| o.temperature.is_none()));
    }
}
