//! City database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::City;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_ru: String,
    pub name_local: String,
    pub name_en: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_code: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for City {
    fn from(model: Model) -> Self {
        City {
            id: model.id,
            name_ru: model.name_ru,
            name_local: model.name_local,
            name_en: model.name_en,
            latitude: model.latitude,
            longitude: model.longitude,
            country_code: model.country_code,
            created_at: model.created_at,
        }
    }
}
