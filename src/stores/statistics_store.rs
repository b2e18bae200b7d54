use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

use crate::errors::entity::EntityError;
use crate::types::dto::statistics::{
    LanternNeedingRenovation, PlannedRenovation, StatisticsResponse, TopActivatedLantern,
};

/// Forwards park statistics queries to externally maintained SQL functions
///
/// The three aggregate functions live in the database, not in this codebase;
/// their ranking/threshold logic is opaque here. Rows are decoded positionally
/// exactly as the functions return them. If a function is missing the driver
/// error surfaces untranslated as an internal error.
pub struct StatisticsStore {
    db: DatabaseConnection,
}

impl StatisticsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn park_statistics(&self, park_id: i32) -> Result<StatisticsResponse, EntityError> {
        let backend = self.db.get_database_backend();

        let activated = self
            .db
            .query_all(Statement::from_sql_and_values(
                backend,
                "SELECT * FROM get_top_activated_lanterns($1)",
                [park_id.into()],
            ))
            .await
            .map_err(|e| EntityError::database("get_top_activated_lanterns", e))?;
        let top_activated_lanterns = activated
            .iter()
            .map(|row| {
                Ok(TopActivatedLantern {
                    id: row.try_get_by_index(0).map_err(decode_error)?,
                    activation_count: row.try_get_by_index(1).map_err(decode_error)?,
                })
            })
            .collect::<Result<Vec<_>, EntityError>>()?;

        let needing = self
            .db
            .query_all(Statement::from_sql_and_values(
                backend,
                "SELECT * FROM get_lanterns_needing_renovation($1)",
                [park_id.into()],
            ))
            .await
            .map_err(|e| EntityError::database("get_lanterns_needing_renovation", e))?;
        let lanterns_needing_renovation = needing
            .iter()
            .map(|row| {
                Ok(LanternNeedingRenovation {
                    id: row.try_get_by_index(0).map_err(decode_error)?,
                    last_renovation_date: row.try_get_by_index(1).map_err(decode_error)?,
                })
            })
            .collect::<Result<Vec<_>, EntityError>>()?;

        let planned = self
            .db
            .query_all(Statement::from_sql_and_values(
                backend,
                "SELECT * FROM get_planned_renovations($1)",
                [park_id.into()],
            ))
            .await
            .map_err(|e| EntityError::database("get_planned_renovations", e))?;
        let planned_renovations = planned
            .iter()
            .map(|row| {
                Ok(PlannedRenovation {
                    id: row.try_get_by_index(0).map_err(decode_error)?,
                    lantern_id: row.try_get_by_index(1).map_err(decode_error)?,
                    date: row.try_get_by_index(2).map_err(decode_error)?,
                })
            })
            .collect::<Result<Vec<_>, EntityError>>()?;

        Ok(StatisticsResponse {
            top_activated_lanterns,
            lanterns_needing_renovation,
            planned_renovations,
        })
    }
}

fn decode_error(e: DbErr) -> EntityError {
    EntityError::database("decode_statistics_row", e)
}
