//! Work period database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::WorkPeriod;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "work_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_account_id: i32,
    pub weekday: i16,
    pub start_time: Time,
    pub end_time: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WorkPeriod {
    fn from(model: Model) -> Self {
        WorkPeriod {
            id: model.id,
            master_account_id: model.master_account_id,
            weekday: model.weekday as u8,
            start: model.start_time,
            end: model.end_time,
        }
    }
}
