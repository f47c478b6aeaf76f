use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "case_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub case_type: String,
    pub case_number: String,
    pub filing_year: String,
    pub parties_names: Option<String>,
    pub filing_date: Option<String>,
    pub next_hearing_date: Option<String>,
    pub latest_order_link: Option<String>,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
