use crate::entities::{case_data, prelude::*};
use crate::models::case::{CaseQuery, CaseRecord, CaseSnapshot};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::OnConflict,
};

pub struct CaseSnapshotRepository {
    conn: DatabaseConnection,
}

impl CaseSnapshotRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the snapshot or overwrites the existing row for the same case key.
    pub async fn upsert(&self, record: &CaseRecord) -> Result<()> {
        let details = &record.details;

        let active_model = case_data::ActiveModel {
            case_type: Set(record.query.case_type.clone()),
            case_number: Set(record.query.case_number.clone()),
            filing_year: Set(record.query.filing_year.clone()),
            parties_names: Set(Some(details.parties_names.clone())),
            filing_date: Set(Some(details.filing_date.clone())),
            next_hearing_date: Set(Some(details.next_hearing_date.clone())),
            latest_order_link: Set(Some(details.latest_order_link.clone())),
            last_updated: Set(crate::db::sqlite_now()),
            ..Default::default()
        };

        CaseData::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    case_data::Column::CaseType,
                    case_data::Column::CaseNumber,
                    case_data::Column::FilingYear,
                ])
                .update_columns([
                    case_data::Column::PartiesNames,
                    case_data::Column::FilingDate,
                    case_data::Column::NextHearingDate,
                    case_data::Column::LatestOrderLink,
                    case_data::Column::LastUpdated,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn get(&self, query: &CaseQuery) -> Result<Option<CaseSnapshot>> {
        let row = CaseData::find()
            .filter(case_data::Column::CaseType.eq(query.case_type.as_str()))
            .filter(case_data::Column::CaseNumber.eq(query.case_number.as_str()))
            .filter(case_data::Column::FilingYear.eq(query.filing_year.as_str()))
            .one(&self.conn)
            .await?;

        Ok(row.map(to_snapshot))
    }

    pub async fn list(&self, limit: u64) -> Result<Vec<CaseSnapshot>> {
        let rows = CaseData::find()
            .order_by_desc(case_data::Column::LastUpdated)
            .order_by_desc(case_data::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(to_snapshot).collect())
    }

    pub async fn count_for(&self, query: &CaseQuery) -> Result<u64> {
        let count = CaseData::find()
            .filter(case_data::Column::CaseType.eq(query.case_type.as_str()))
            .filter(case_data::Column::CaseNumber.eq(query.case_number.as_str()))
            .filter(case_data::Column::FilingYear.eq(query.filing_year.as_str()))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}

fn to_snapshot(m: case_data::Model) -> CaseSnapshot {
    CaseSnapshot {
        id: m.id,
        case_type: m.case_type,
        case_number: m.case_number,
        filing_year: m.filing_year,
        parties_names: m.parties_names,
        filing_date: m.filing_date,
        next_hearing_date: m.next_hearing_date,
        latest_order_link: m.latest_order_link,
        last_updated: m.last_updated,
    }
}
