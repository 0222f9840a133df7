use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// SQLite accepts a single ADD COLUMN per ALTER statement, so each column
// gets its own alter call.
async fn add_auth_columns<T>(manager: &SchemaManager<'_>, table: T) -> Result<(), DbErr>
where
    T: IntoTableRef + Clone,
{
    manager
        .alter_table(
            Table::alter()
                .table(table.clone())
                .add_column(ColumnDef::new(AuthColumns::TotpSecret).string().null())
                .to_owned(),
        )
        .await?;

    manager
        .alter_table(
            Table::alter()
                .table(table.clone())
                .add_column(
                    ColumnDef::new(AuthColumns::TotpConfirmed)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .to_owned(),
        )
        .await?;

    manager
        .alter_table(
            Table::alter()
                .table(table.clone())
                .add_column(
                    ColumnDef::new(AuthColumns::FailedLoginAttempts)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .to_owned(),
        )
        .await?;

    manager
        .alter_table(
            Table::alter()
                .table(table.clone())
                .add_column(
                    ColumnDef::new(AuthColumns::LockedUntil)
                        .big_integer()
                        .null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .alter_table(
            Table::alter()
                .table(table)
                .add_column(
                    ColumnDef::new(AuthColumns::MustChangePassword)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .to_owned(),
        )
        .await
}

async fn drop_auth_columns<T>(manager: &SchemaManager<'_>, table: T) -> Result<(), DbErr>
where
    T: IntoTableRef + Clone,
{
    for column in [
        AuthColumns::MustChangePassword,
        AuthColumns::LockedUntil,
        AuthColumns::FailedLoginAttempts,
        AuthColumns::TotpConfirmed,
        AuthColumns::TotpSecret,
    ] {
        manager
            .alter_table(
                Table::alter()
                    .table(table.clone())
                    .drop_column(column)
                    .to_owned(),
            )
            .await?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_auth_columns(manager, Clients::Table).await?;
        add_auth_columns(manager, Doctors::Table).await?;
        add_auth_columns(manager, Consultants::Table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_auth_columns(manager, Consultants::Table).await?;
        drop_auth_columns(manager, Doctors::Table).await?;
        drop_auth_columns(manager, Clients::Table).await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum AuthColumns {
    TotpSecret,
    TotpConfirmed,
    FailedLoginAttempts,
    LockedUntil,
    MustChangePassword,
}

#[derive(DeriveIden, Clone, Copy)]
enum Clients {
    Table,
}

#[derive(DeriveIden, Clone, Copy)]
enum Doctors {
    Table,
}

#[derive(DeriveIden, Clone, Copy)]
enum Consultants {
    Table,
}
