use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "queries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
    pub query_timestamp: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_response: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub parsed_data: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
