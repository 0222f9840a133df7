use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub specialization: String,
    pub permit_number: String,
    pub backup_email: Option<String>,
    pub created_at: i64,

    // Two-factor and lockout state
    pub totp_secret: Option<String>,
    pub totp_confirmed: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<i64>,
    pub must_change_password: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
