use sea_orm::entity::prelude::*;

/// SeaORM entity for the lanterns table
///
/// Brightness values are percentages (0-100). `park_id` is optional; a lantern
/// can exist unassigned.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lanterns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub power: Option<i32>,
    pub height: Option<f64>,
    pub base_brightness: i32,
    pub active_brightness: i32,
    pub active_time: i32,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub park_id: Option<i32>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
