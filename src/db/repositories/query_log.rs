use crate::entities::{prelude::*, queries};
use crate::models::case::{CaseQuery, QuerySummary, QueryStatus};
use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

pub struct QueryLogRepository {
    conn: DatabaseConnection,
}

impl QueryLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn record(
        &self,
        query: &CaseQuery,
        raw_response: &str,
        parsed_data: &str,
        status: QueryStatus,
    ) -> Result<i64> {
        let active_model = queries::ActiveModel {
            case_type: Set(query.case_type.clone()),
            case_number: Set(query.case_number.clone()),
            filing_year: Set(query.filing_year.clone()),
            query_timestamp: Set(crate::db::sqlite_now()),
            raw_response: Set(Some(raw_response.to_string())),
            parsed_data: Set(Some(parsed_data.to_string())),
            status: Set(status.as_str().to_string()),
            ..Default::default()
        };

        let result = Queries::insert(active_model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    /// Newest first. Entries written within the same second keep insertion order.
    pub async fn recent(&self, limit: u64) -> Result<Vec<QuerySummary>> {
        let rows = Queries::find()
            .order_by_desc(queries::Column::QueryTimestamp)
            .order_by_desc(queries::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(to_summary).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<queries::Model>> {
        let row = Queries::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Queries::find().count(&self.conn).await?;
        Ok(count)
    }
}

fn to_summary(row: queries::Model) -> Result<QuerySummary> {
    let status = row
        .status
        .parse()
        .with_context(|| format!("Query log entry {} has an invalid status", row.id))?;

    Ok(QuerySummary {
        id: row.id,
        case_type: row.case_type,
        case_number: row.case_number,
        filing_year: row.filing_year,
        query_timestamp: row.query_timestamp,
        status,
    })
}
