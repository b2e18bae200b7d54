use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create parks table
        manager
            .create_table(
                Table::create()
                    .table(Parks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parks::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Parks::Name).string().not_null())
                    .col(ColumnDef::new(Parks::Address).string().not_null())
                    .col(ColumnDef::new(Parks::Latitude).double())
                    .col(ColumnDef::new(Parks::Longitude).double())
                    .col(ColumnDef::new(Parks::CreatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Parks::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Create companies table
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Companies::Name).string())
                    .col(ColumnDef::new(Companies::Address).string())
                    .col(ColumnDef::new(Companies::Phone).string())
                    .col(ColumnDef::new(Companies::Email).string())
                    .col(ColumnDef::new(Companies::Notes).string())
                    .to_owned(),
            )
            .await?;

        // Create repairmen table
        manager
            .create_table(
                Table::create()
                    .table(Repairmen::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Repairmen::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Repairmen::FirstName).string())
                    .col(ColumnDef::new(Repairmen::Surname).string())
                    .col(ColumnDef::new(Repairmen::Email).string())
                    .col(ColumnDef::new(Repairmen::Phone).string())
                    .col(ColumnDef::new(Repairmen::Specialization).string())
                    .col(ColumnDef::new(Repairmen::CompanyId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repairmen_company_id")
                            .from(Repairmen::Table, Repairmen::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lanterns table
        manager
            .create_table(
                Table::create()
                    .table(Lanterns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lanterns::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Lanterns::Name).string())
                    .col(ColumnDef::new(Lanterns::Brand).string())
                    .col(ColumnDef::new(Lanterns::Model).string())
                    .col(ColumnDef::new(Lanterns::Power).integer())
                    .col(ColumnDef::new(Lanterns::Height).double())
                    .col(ColumnDef::new(Lanterns::BaseBrightness).integer().not_null().default(50))
                    .col(ColumnDef::new(Lanterns::ActiveBrightness).integer().not_null().default(100))
                    .col(ColumnDef::new(Lanterns::ActiveTime).integer().not_null().default(30))
                    .col(ColumnDef::new(Lanterns::Status).string().not_null().default("working"))
                    .col(ColumnDef::new(Lanterns::Latitude).double())
                    .col(ColumnDef::new(Lanterns::Longitude).double())
                    .col(ColumnDef::new(Lanterns::ParkId).integer())
                    .col(ColumnDef::new(Lanterns::CreatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Lanterns::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lanterns_park_id")
                            .from(Lanterns::Table, Lanterns::ParkId)
                            .to(Parks::Table, Parks::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create breakdowns table
        manager
            .create_table(
                Table::create()
                    .table(Breakdowns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Breakdowns::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Breakdowns::LanternId).integer().not_null())
                    .col(ColumnDef::new(Breakdowns::Description).string())
                    .col(ColumnDef::new(Breakdowns::Status).string().not_null().default("reported"))
                    .col(ColumnDef::new(Breakdowns::Priority).string().not_null().default("medium"))
                    .col(ColumnDef::new(Breakdowns::ReportedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Breakdowns::FixedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_breakdowns_lantern_id")
                            .from(Breakdowns::Table, Breakdowns::LanternId)
                            .to(Lanterns::Table, Lanterns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_breakdowns_lantern_id")
                    .table(Breakdowns::Table)
                    .col(Breakdowns::LanternId)
                    .to_owned(),
            )
            .await?;

        // Create renovations table
        manager
            .create_table(
                Table::create()
                    .table(Renovations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Renovations::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Renovations::LanternId).integer())
                    .col(ColumnDef::new(Renovations::RepairmanId).integer())
                    .col(ColumnDef::new(Renovations::Description).string())
                    .col(ColumnDef::new(Renovations::Status).string().not_null().default("planned"))
                    .col(ColumnDef::new(Renovations::Priority).string().not_null().default("medium"))
                    .col(ColumnDef::new(Renovations::Cost).integer().not_null().default(0))
                    .col(ColumnDef::new(Renovations::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Renovations::EndDate).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_renovations_lantern_id")
                            .from(Renovations::Table, Renovations::LanternId)
                            .to(Lanterns::Table, Lanterns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_renovations_repairman_id")
                            .from(Renovations::Table, Renovations::RepairmanId)
                            .to(Repairmen::Table, Repairmen::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create admins table
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Admins::FirstName).string().not_null())
                    .col(ColumnDef::new(Admins::Surname).string().not_null())
                    .col(ColumnDef::new(Admins::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::Status).string().not_null().default("active"))
                    .col(ColumnDef::new(Admins::Rights).string().not_null().default("standard"))
                    .col(ColumnDef::new(Admins::ParkId).integer())
                    .col(ColumnDef::new(Admins::CreatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admins_park_id")
                            .from(Admins::Table, Admins::ParkId)
                            .to(Parks::Table, Parks::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sensor_responses table
        manager
            .create_table(
                Table::create()
                    .table(SensorResponses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SensorResponses::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(SensorResponses::LanternId).integer().not_null())
                    .col(ColumnDef::new(SensorResponses::Date).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(SensorResponses::Status).string().not_null().default("activated"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sensor_responses_lantern_id")
                            .from(SensorResponses::Table, SensorResponses::LanternId)
                            .to(Lanterns::Table, Lanterns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sensor_responses_lantern_id")
                    .table(SensorResponses::Table)
                    .col(SensorResponses::LanternId)
                    .to_owned(),
            )
            .await?;

        // Create updates table
        manager
            .create_table(
                Table::create()
                    .table(Updates::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Updates::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Updates::Title).string().not_null())
                    .col(ColumnDef::new(Updates::Content).text().not_null())
                    .col(ColumnDef::new(Updates::Version).string())
                    .col(ColumnDef::new(Updates::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Updates::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Create user_messages table
        manager
            .create_table(
                Table::create()
                    .table(UserMessages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserMessages::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(UserMessages::Title).string().not_null())
                    .col(ColumnDef::new(UserMessages::Description).text().not_null())
                    .col(ColumnDef::new(UserMessages::Location).string())
                    .col(ColumnDef::new(UserMessages::PhotoUrl).string())
                    .col(ColumnDef::new(UserMessages::Priority).string().not_null().default("medium"))
                    .col(ColumnDef::new(UserMessages::Status).string().not_null().default("new"))
                    .col(ColumnDef::new(UserMessages::DeviceToken).string())
                    .col(ColumnDef::new(UserMessages::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Updates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SensorResponses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Renovations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Breakdowns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lanterns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Repairmen::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Parks {
    Table,
    Id,
    Name,
    Address,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lanterns {
    Table,
    Id,
    Name,
    Brand,
    Model,
    Power,
    Height,
    BaseBrightness,
    ActiveBrightness,
    ActiveTime,
    Status,
    Latitude,
    Longitude,
    ParkId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Breakdowns {
    Table,
    Id,
    LanternId,
    Description,
    Status,
    Priority,
    ReportedAt,
    FixedAt,
}

#[derive(DeriveIden)]
enum Renovations {
    Table,
    Id,
    LanternId,
    RepairmanId,
    Description,
    Status,
    Priority,
    Cost,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Repairmen {
    Table,
    Id,
    FirstName,
    Surname,
    Email,
    Phone,
    Specialization,
    CompanyId,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    Notes,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    FirstName,
    Surname,
    Email,
    PasswordHash,
    Status,
    Rights,
    ParkId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SensorResponses {
    Table,
    Id,
    LanternId,
    Date,
    Status,
}

#[derive(DeriveIden)]
enum Updates {
    Table,
    Id,
    Title,
    Content,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserMessages {
    Table,
    Id,
    Title,
    Description,
    Location,
    PhotoUrl,
    Priority,
    Status,
    DeviceToken,
    CreatedAt,
}
