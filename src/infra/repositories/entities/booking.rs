//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Booking;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub master_account_id: i32,
    pub service_id: i32,
    pub start_dt: DateTimeUtc,
    pub end_dt: DateTimeUtc,
    pub price: f64,
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Booking {
            id: model.id,
            client_id: model.client_id,
            master_account_id: model.master_account_id,
            service_id: model.service_id,
            start_dt: model.start_dt,
            end_dt: model.end_dt,
            price: model.price,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
