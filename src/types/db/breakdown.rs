use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "breakdowns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub lantern_id: i32,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub reported_at: DateTimeUtc,
    pub fixed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
