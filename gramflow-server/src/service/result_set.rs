//! Result Set Service
//!
//! Business logic for stored result sets: listing, retrieval, merging, and
//! the sink adapter the runner persists through.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use gramflow_core::domain::record::ProjectedRecord;
use gramflow_core::domain::result_set::{ResultSet, ResultSetSummary};
use gramflow_core::dto::merge::MergeOutcome;
use gramflow_runner::ResultSink;

use crate::repository::result_set_repository;

/// Service error type
#[derive(Debug)]
pub enum ResultSetError {
    NotFound(Uuid),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for ResultSetError {
    fn from(err: sqlx::Error) -> Self {
        ResultSetError::DatabaseError(err)
    }
}

/// List summaries of all stored result sets, newest first
pub async fn list_result_sets(pool: &PgPool) -> Result<Vec<ResultSetSummary>, ResultSetError> {
    let summaries = result_set_repository::list_summaries(pool).await?;
    Ok(summaries)
}

/// Get a stored result set by ID
pub async fn get_result_set(pool: &PgPool, id: Uuid) -> Result<ResultSet, ResultSetError> {
    let set = result_set_repository::find_by_id(pool, id)
        .await?
        .ok_or(ResultSetError::NotFound(id))?;

    Ok(set)
}

/// Merge several stored result sets into one record collection
///
/// Sets are concatenated in the order the ids are given, and every record
/// gains a `username` field naming the subject of the set it came from.
pub async fn merge_result_sets(pool: &PgPool, ids: &[Uuid]) -> Result<MergeOutcome, ResultSetError> {
    let mut records = Vec::new();

    for id in ids {
        let set = result_set_repository::find_by_id(pool, *id)
            .await?
            .ok_or(ResultSetError::NotFound(*id))?;

        records.extend(annotate_with_username(set.records, &set.subject));
    }

    tracing::info!("Merged {} records from {} result sets", records.len(), ids.len());

    Ok(MergeOutcome {
        count: records.len(),
        sources: ids.len(),
        records,
    })
}

/// Stamps each record with the subject it was scraped from
fn annotate_with_username(
    records: Vec<ProjectedRecord>,
    subject: &str,
) -> Vec<ProjectedRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.insert("username".to_string(), Value::String(subject.to_string()));
            record
        })
        .collect()
}

// =============================================================================
// Runner sink adapter
// =============================================================================

/// Adapts the result-set store to the runner's persistence seam
pub struct StoreSink {
    pool: PgPool,
}

impl StoreSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSink for StoreSink {
    async fn create(&self, subject: &str, records: &[ProjectedRecord]) -> anyhow::Result<()> {
        result_set_repository::create(&self.pool, subject, records).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProjectedRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("record fixtures must be objects"),
        }
    }

    #[test]
    fn test_annotate_with_username() {
        let records = vec![
            record(json!({"caption": "hello"})),
            record(json!({"caption": "world"})),
        ];

        let annotated = annotate_with_username(records, "alice");

        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].get("username"), Some(&json!("alice")));
        assert_eq!(annotated[1].get("username"), Some(&json!("alice")));
        assert_eq!(annotated[0].get("caption"), Some(&json!("hello")));
    }
}
