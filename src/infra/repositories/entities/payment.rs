//! Payment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Payment, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_account_id: i32,
    #[sea_orm(unique)]
    pub provider_payment_id: String,
    #[sea_orm(unique)]
    pub idempotence_key: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub confirmation_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(model: Model) -> Self {
        Payment {
            id: model.id,
            master_account_id: model.master_account_id,
            provider_payment_id: model.provider_payment_id,
            idempotence_key: model.idempotence_key,
            amount: model.amount,
            currency: model.currency,
            status: PaymentStatus::from(model.status.as_str()),
            confirmation_url: model.confirmation_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
