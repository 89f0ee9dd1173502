//! Service category database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ServiceCategory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_account_id: i32,
    pub title: String,
    pub emoji: Option<String>,
    pub is_predefined: bool,
    pub category_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServiceCategory {
    fn from(model: Model) -> Self {
        ServiceCategory {
            id: model.id,
            master_account_id: model.master_account_id,
            title: model.title,
            emoji: model.emoji,
            is_predefined: model.is_predefined,
            category_key: model.category_key,
        }
    }
}
