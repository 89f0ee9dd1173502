//! Master account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{MasterAccount, SubscriptionLevel};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "master_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub telegram_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub city_id: Option<i32>,
    pub currency: String,
    pub subscription_level: String,
    pub subscription_expires_at: Option<DateTimeUtc>,
    pub is_blocked: bool,
    pub blocked_at: Option<DateTimeUtc>,
    pub block_reason: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MasterAccount {
    fn from(model: Model) -> Self {
        MasterAccount {
            id: model.id,
            telegram_id: model.telegram_id,
            name: model.name,
            description: model.description,
            avatar_url: model.avatar_url,
            city_id: model.city_id,
            currency: model.currency,
            subscription_level: SubscriptionLevel::from(model.subscription_level.as_str()),
            subscription_expires_at: model.subscription_expires_at,
            is_blocked: model.is_blocked,
            blocked_at: model.blocked_at,
            block_reason: model.block_reason,
            created_at: model.created_at,
        }
    }
}
