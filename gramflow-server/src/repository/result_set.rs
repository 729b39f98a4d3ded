//! Result Set Repository
//!
//! Handles all database operations related to stored result sets. Sets are
//! create-and-read only; there is no update path.

use gramflow_core::domain::record::ProjectedRecord;
use gramflow_core::domain::result_set::{ResultSet, ResultSetSummary};
use sqlx::PgPool;
use uuid::Uuid;

/// Persist a new result set
pub async fn create(
    pool: &PgPool,
    subject: &str,
    records: &[ProjectedRecord],
) -> Result<ResultSet, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();
    let record_count = records.len() as i32;

    sqlx::query(
        r#"
        INSERT INTO result_sets (id, subject, created_at, record_count, records)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(subject)
    .bind(now)
    .bind(record_count)
    .bind(serde_json::to_value(records).unwrap())
    .execute(pool)
    .await?;

    Ok(ResultSet {
        id,
        subject: subject.to_string(),
        created_at: now,
        record_count,
        records: records.to_vec(),
    })
}

/// List summaries of all stored result sets, newest first
pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ResultSetSummary>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        r#"
        SELECT id, subject, created_at, record_count
        FROM result_sets
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Find a result set by ID, including its records
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ResultSet>, sqlx::Error> {
    let row = sqlx::query_as::<_, ResultSetRow>(
        r#"
        SELECT id, subject, created_at, record_count, records
        FROM result_sets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    subject: String,
    created_at: chrono::DateTime<chrono::Utc>,
    record_count: i32,
}

impl From<SummaryRow> for ResultSetSummary {
    fn from(row: SummaryRow) -> Self {
        ResultSetSummary {
            id: row.id,
            subject: row.subject,
            created_at: row.created_at,
            record_count: row.record_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResultSetRow {
    id: Uuid,
    subject: String,
    created_at: chrono::DateTime<chrono::Utc>,
    record_count: i32,
    records: serde_json::Value,
}

impl From<ResultSetRow> for ResultSet {
    fn from(row: ResultSetRow) -> Self {
        let records = serde_json::from_value(row.records).unwrap_or_default();

        ResultSet {
            id: row.id,
            subject: row.subject,
            created_at: row.created_at,
            record_count: row.record_count,
            records,
        }
    }
}
