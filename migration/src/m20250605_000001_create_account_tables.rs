use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create clients table
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::FirstName).string().not_null())
                    .col(ColumnDef::new(Clients::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Clients::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Clients::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Clients::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Clients::Address).string().not_null())
                    .col(ColumnDef::new(Clients::PostalCode).string().not_null())
                    .col(ColumnDef::new(Clients::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_email")
                    .table(Clients::Table)
                    .col(Clients::Email)
                    .to_owned(),
            )
            .await?;

        // Create doctors table
        manager
            .create_table(
                Table::create()
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doctors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doctors::FirstName).string().not_null())
                    .col(ColumnDef::new(Doctors::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Doctors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Doctors::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Doctors::Specialization).string().not_null())
                    .col(ColumnDef::new(Doctors::PermitNumber).string().not_null())
                    .col(ColumnDef::new(Doctors::BackupEmail).string().null())
                    .col(ColumnDef::new(Doctors::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_doctors_email")
                    .table(Doctors::Table)
                    .col(Doctors::Email)
                    .to_owned(),
            )
            .await?;

        // Create consultants table
        manager
            .create_table(
                Table::create()
                    .table(Consultants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Consultants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Consultants::FirstName).string().not_null())
                    .col(ColumnDef::new(Consultants::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Consultants::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Consultants::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Consultants::FacilityId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Consultants::BackupEmail).string().null())
                    .col(
                        ColumnDef::new(Consultants::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_consultants_email")
                    .table(Consultants::Table)
                    .col(Consultants::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Consultants::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    PhoneNumber,
    Address,
    PostalCode,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Doctors {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Specialization,
    PermitNumber,
    BackupEmail,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Consultants {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    FacilityId,
    BackupEmail,
    CreatedAt,
}
