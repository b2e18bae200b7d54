use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only audit trail. No update/delete path exists for these rows.
        manager
            .create_table(
                Table::create()
                    .table(DatabaseActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DatabaseActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DatabaseActivities::ActivityType).string().not_null())
                    .col(ColumnDef::new(DatabaseActivities::EntityType).string().not_null())
                    .col(ColumnDef::new(DatabaseActivities::EntityId).integer())
                    .col(ColumnDef::new(DatabaseActivities::Description).text().not_null())
                    .col(ColumnDef::new(DatabaseActivities::Details).text())
                    .col(ColumnDef::new(DatabaseActivities::PerformedBy).string())
                    .col(
                        ColumnDef::new(DatabaseActivities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_database_activities_created_at")
                    .table(DatabaseActivities::Table)
                    .col(DatabaseActivities::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DatabaseActivities::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DatabaseActivities {
    Table,
    Id,
    ActivityType,
    EntityType,
    EntityId,
    Description,
    Details,
    PerformedBy,
    CreatedAt,
}
