//! Click event entity for per-redirect analytics capture

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "click_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub short_code: String,
    pub clicked_at: DateTimeUtc,
    pub ip_address: Option<String>,
    /// Browser family name as classified at write time ("Chrome", "Firefox", ...)
    pub browser: String,
    pub os: String,
    /// "Mobile" or "Desktop"
    pub device: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
