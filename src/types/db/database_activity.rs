use sea_orm::entity::prelude::*;

/// SeaORM entity for the database_activities audit table
///
/// Rows are written once and never mutated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "database_activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub activity_type: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub description: String,
    pub details: Option<String>,
    pub performed_by: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
