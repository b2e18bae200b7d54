use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "renovations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub lantern_id: Option<i32>,
    pub repairman_id: Option<i32>,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub cost: i32,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
