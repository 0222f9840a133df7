pub use sea_orm_migration::prelude::*;

mod m20250605_000001_create_account_tables;
mod m20250605_000002_create_clinic_schema;
mod m20250605_000003_create_medical_schema;
mod m20250612_000001_add_two_factor_lockout;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250605_000001_create_account_tables::Migration),
            Box::new(m20250605_000002_create_clinic_schema::Migration),
            Box::new(m20250605_000003_create_medical_schema::Migration),
            Box::new(m20250612_000001_add_two_factor_lockout::Migration),
        ]
    }
}
