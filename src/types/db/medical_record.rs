use sea_orm::entity::prelude::*;

/// Relational side of a medical record. The row is the source of truth for
/// content; `data_hash` and `blockchain_tx` are filled in after each ledger
/// mirror write and stay `None` when mirroring failed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "medical_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub appointment_id: i32,
    pub animal_id: i32,
    pub description: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub visit_date: String,
    pub created_at: i64,
    pub data_hash: Option<String>,
    pub blockchain_tx: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
