//! Query plans for range lookups.
//!
//! A [`QueryPlan`] names exactly one partition key, at most one sort-key
//! predicate on `timestamp`, the index to read through, and a result cap.
//! Plans follow the builder pattern used across this crate.
//!
//! # Example
//!
//! ```
//! use airq_store::{IndexSelector, PartitionKey, QueryPlan, SortPredicate};
//!
//! // Newest 25 observations of one device after a point in time
//! let plan = QueryPlan::new(PartitionKey::device("AirSensor20133219"))
//!     .sort(SortPredicate::AtLeast(1_558_430_580_016))
//!     .limit(25);
//! assert_eq!(plan.index, IndexSelector::Primary);
//!
//! // Everything collected through a routing tag, via the secondary index
//! let plan = QueryPlan::new(PartitionKey::rule("AirQualityCollectSQS"))
//!     .index(IndexSelector::rule_timestamp())
//!     .sort(SortPredicate::Between(1_000, 2_000));
//! assert_eq!(plan.to_string(), "rule = AirQualityCollectSQS AND timestamp BETWEEN 1000 AND 2000 [rule-timestamp-index, newest first]");
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// Partition attribute of the primary key.
pub const DEVICE_ATTRIBUTE: &str = "device";
/// Partition attribute of the routing-tag index.
pub const RULE_ATTRIBUTE: &str = "rule";
/// Sort attribute shared by the primary key and the routing-tag index.
pub const TIMESTAMP_ATTRIBUTE: &str = "timestamp";
/// Name of the secondary index keyed by routing tag and timestamp.
pub const RULE_TIMESTAMP_INDEX: &str = "rule-timestamp-index";

/// Partition key equality condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

impl PartitionKey {
    /// Key on an arbitrary attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Key on the device attribute of the primary key.
    pub fn device(id: impl Into<String>) -> Self {
        Self::new(DEVICE_ATTRIBUTE, id)
    }

    /// Key on the routing-tag attribute of the secondary index.
    pub fn rule(tag: impl Into<String>) -> Self {
        Self::new(RULE_ATTRIBUTE, tag)
    }
}

/// Comparison on the `timestamp` sort key. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPredicate {
    /// `timestamp >= start`
    AtLeast(i64),
    /// `timestamp <= end`
    AtMost(i64),
    /// `timestamp BETWEEN start AND end`
    Between(i64, i64),
}

impl fmt::Display for SortPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortPredicate::AtLeast(start) => write!(f, "{} >= {}", TIMESTAMP_ATTRIBUTE, start),
            SortPredicate::AtMost(end) => write!(f, "{} <= {}", TIMESTAMP_ATTRIBUTE, end),
            SortPredicate::Between(start, end) => {
                write!(f, "{} BETWEEN {} AND {}", TIMESTAMP_ATTRIBUTE, start, end)
            }
        }
    }
}

/// Which key structure the lookup reads through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IndexSelector {
    /// The table's primary key `(device, timestamp)`.
    #[default]
    Primary,
    /// A named secondary index.
    Secondary(String),
}

impl IndexSelector {
    /// The routing-tag secondary index.
    pub fn rule_timestamp() -> Self {
        IndexSelector::Secondary(RULE_TIMESTAMP_INDEX.to_string())
    }

    /// Partition attribute this index is keyed on, if the index exists.
    pub fn partition_attribute(&self) -> Option<&'static str> {
        match self {
            IndexSelector::Primary => Some(DEVICE_ATTRIBUTE),
            IndexSelector::Secondary(name) if name == RULE_TIMESTAMP_INDEX => Some(RULE_ATTRIBUTE),
            IndexSelector::Secondary(_) => None,
        }
    }
}

/// A range lookup against the observation table.
///
/// By default a plan reads through the primary key, has no sort predicate
/// and no cap, and scans newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Partition key equality condition.
    pub partition: PartitionKey,
    /// Optional sort-key predicate.
    pub sort: Option<SortPredicate>,
    /// Index to read through.
    pub index: IndexSelector,
    /// Maximum number of items to evaluate.
    pub limit: Option<u32>,
    /// Scan by timestamp descending.
    pub newest_first: bool,
}

impl QueryPlan {
    /// Create a plan for one partition.
    pub fn new(partition: PartitionKey) -> Self {
        Self {
            partition,
            sort: None,
            index: IndexSelector::Primary,
            limit: None,
            newest_first: true,
        }
    }

    /// Set the sort-key predicate, replacing any previous one.
    pub fn sort(mut self, predicate: SortPredicate) -> Self {
        self.sort = Some(predicate);
        self
    }

    /// Read through the given index.
    pub fn index(mut self, index: IndexSelector) -> Self {
        self.index = index;
        self
    }

    /// Cap the number of items evaluated.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Scan oldest first.
    ///
    /// Store-level option only; plans built by the query service always
    /// read newest first.
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Check that the plan can be served by the table layout.
    ///
    /// The partition attribute must match the chosen index, and a
    /// `BETWEEN` predicate must not be inverted.
    pub fn validate(&self) -> Result<()> {
        let expected = self.index.partition_attribute().ok_or_else(|| {
            Error::InvalidPlan(format!("unknown index '{}'", self.index_name()))
        })?;

        if self.partition.name != expected {
            return Err(Error::InvalidPlan(format!(
                "partition attribute '{}' does not match index '{}' (expected '{}')",
                self.partition.name,
                self.index_name(),
                expected
            )));
        }

        if let Some(SortPredicate::Between(start, end)) = self.sort
            && start > end
        {
            return Err(Error::InvalidPlan(format!(
                "BETWEEN lower bound {} is greater than upper bound {}",
                start, end
            )));
        }

        Ok(())
    }

    fn index_name(&self) -> &str {
        match &self.index {
            IndexSelector::Primary => "primary",
            IndexSelector::Secondary(name) => name,
        }
    }

    /// Build the SQL WHERE clause and parameters.
    pub(crate) fn build_where(&self) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = vec![format!("{} = ?", self.partition.name)];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(self.partition.value.clone())];

        match self.sort {
            Some(SortPredicate::AtLeast(start)) => {
                conditions.push(format!("{} >= ?", TIMESTAMP_ATTRIBUTE));
                params.push(Box::new(start));
            }
            Some(SortPredicate::AtMost(end)) => {
                conditions.push(format!("{} <= ?", TIMESTAMP_ATTRIBUTE));
                params.push(Box::new(end));
            }
            Some(SortPredicate::Between(start, end)) => {
                conditions.push(format!("{} BETWEEN ? AND ?", TIMESTAMP_ATTRIBUTE));
                params.push(Box::new(start));
                params.push(Box::new(end));
            }
            None => {}
        }

        (format!("WHERE {}", conditions.join(" AND ")), params)
    }

    /// Build the full SQL query.
    ///
    /// Call [`validate`](Self::validate) first; the partition attribute is
    /// interpolated as an identifier.
    pub(crate) fn build_sql(&self) -> String {
        let (where_clause, _) = self.build_where();
        let order = if self.newest_first { "DESC" } else { "ASC" };
        let source = match &self.index {
            IndexSelector::Primary => "observations".to_string(),
            IndexSelector::Secondary(name) => format!("observations INDEXED BY \"{}\"", name),
        };

        let mut sql = format!(
            "SELECT device, rule, timestamp, temperature, humidity, pm10, pm25 \
             FROM {} {} ORDER BY timestamp {}",
            source, where_clause, order
        );

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.partition.name, self.partition.value)?;
        if let Some(sort) = &self.sort {
            write!(f, " AND {}", sort)?;
        }
        write!(
            f,
            " [{}, {}",
            self.index_name(),
            if self.newest_first {
                "newest first"
            } else {
                "oldest first"
            }
        )?;
        if let Some(limit) = self.limit {
            write!(f, ", limit {}", limit)?;
        }
        write!(f, "]")
    }
}
