//! Service database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Service;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_account_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_mins: i32,
    pub cooling_period_mins: i32,
    pub active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Service {
    fn from(model: Model) -> Self {
        Service {
            id: model.id,
            master_account_id: model.master_account_id,
            category_id: model.category_id,
            title: model.title,
            description: model.description,
            price: model.price,
            duration_mins: model.duration_mins,
            cooling_period_mins: model.cooling_period_mins,
            active: model.active,
            created_at: model.created_at,
        }
    }
}
