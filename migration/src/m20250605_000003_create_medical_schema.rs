use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create medical_records table with ledger mirror columns
        manager
            .create_table(
                Table::create()
                    .table(MedicalRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicalRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MedicalRecords::AppointmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MedicalRecords::AnimalId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MedicalRecords::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MedicalRecords::Diagnosis).text().null())
                    .col(ColumnDef::new(MedicalRecords::Treatment).text().null())
                    .col(ColumnDef::new(MedicalRecords::Notes).text().null())
                    .col(ColumnDef::new(MedicalRecords::VisitDate).string().not_null())
                    .col(
                        ColumnDef::new(MedicalRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MedicalRecords::DataHash).string().null())
                    .col(ColumnDef::new(MedicalRecords::BlockchainTx).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_records_appointment_id")
                            .from(MedicalRecords::Table, MedicalRecords::AppointmentId)
                            .to(Appointments::Table, Appointments::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_records_animal_id")
                            .from(MedicalRecords::Table, MedicalRecords::AnimalId)
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
                    .name("idx_medical_records_appointment")
                    .table(MedicalRecords::Table)
                    .col(MedicalRecords::AppointmentId)
                    .to_owned(),
            )
            .await?;

        // Create weight_logs table
        manager
            .create_table(
                Table::create()
                    .table(WeightLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeightLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeightLogs::AnimalId).integer().not_null())
                    .col(ColumnDef::new(WeightLogs::WeightKg).double().not_null())
                    .col(
                        ColumnDef::new(WeightLogs::MeasuredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weight_logs_animal_id")
                            .from(WeightLogs::Table, WeightLogs::AnimalId)
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
                    .name("idx_weight_logs_animal")
                    .table(WeightLogs::Table)
                    .col(WeightLogs::AnimalId)
                    .to_owned(),
            )
            .await?;

        // Create invoices table
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Invoices::AppointmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Amount).double().not_null())
                    .col(ColumnDef::new(Invoices::Currency).string().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::IssuedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_appointment_id")
                            .from(Invoices::Table, Invoices::AppointmentId)
                            .to(Appointments::Table, Appointments::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(WeightLogs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MedicalRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MedicalRecords {
    Table,
    Id,
    AppointmentId,
    AnimalId,
    Description,
    Diagnosis,
    Treatment,
    Notes,
    VisitDate,
    CreatedAt,
    DataHash,
    BlockchainTx,
}

#[derive(DeriveIden)]
enum WeightLogs {
    Table,
    Id,
    AnimalId,
    WeightKg,
    MeasuredAt,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    AppointmentId,
    Amount,
    Currency,
    Status,
    IssuedAt,
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
}
