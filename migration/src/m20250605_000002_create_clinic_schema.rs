use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create facilities table
        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Facilities::Name).string().not_null())
                    .col(ColumnDef::new(Facilities::Address).string().not_null())
                    .col(ColumnDef::new(Facilities::PhoneNumber).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create animals table
        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Animals::OwnerId).integer().not_null())
                    .col(ColumnDef::new(Animals::Name).string().not_null())
                    .col(ColumnDef::new(Animals::Species).string().not_null())
                    .col(ColumnDef::new(Animals::Breed).string().null())
                    .col(ColumnDef::new(Animals::BirthDate).string().null())
                    .col(ColumnDef::new(Animals::ChipNumber).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_animals_owner_id")
                            .from(Animals::Table, Animals::OwnerId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_animals_owner")
                    .table(Animals::Table)
                    .col(Animals::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Create appointments table
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::OwnerId).integer().not_null())
                    .col(ColumnDef::new(Appointments::DoctorId).integer().not_null())
                    .col(ColumnDef::new(Appointments::AnimalId).integer().not_null())
                    .col(
                        ColumnDef::new(Appointments::ScheduledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointments::Reason).string().not_null())
                    .col(ColumnDef::new(Appointments::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_owner_id")
                            .from(Appointments::Table, Appointments::OwnerId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_doctor_id")
                            .from(Appointments::Table, Appointments::DoctorId)
                            .to(Doctors::Table, Doctors::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_animal_id")
                            .from(Appointments::Table, Appointments::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointments_animal")
                    .table(Appointments::Table)
                    .col(Appointments::AnimalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Facilities {
    Table,
    Id,
    Name,
    Address,
    PhoneNumber,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
    OwnerId,
    Name,
    Species,
    Breed,
    BirthDate,
    ChipNumber,
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    OwnerId,
    DoctorId,
    AnimalId,
    ScheduledAt,
    Reason,
    Status,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Doctors {
    Table,
    Id,
}
