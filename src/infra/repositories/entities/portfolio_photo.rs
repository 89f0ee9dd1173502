//! Portfolio photo database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::PortfolioPhoto;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_id: i32,
    pub file_id: String,
    pub caption: Option<String>,
    pub order_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PortfolioPhoto {
    fn from(model: Model) -> Self {
        PortfolioPhoto {
            id: model.id,
            service_id: model.service_id,
            file_id: model.file_id,
            caption: model.caption,
            order_index: model.order_index,
        }
    }
}
