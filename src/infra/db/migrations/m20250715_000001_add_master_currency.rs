//! Migration: Add per-master currency column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(MasterAccounts::Table)
                    .add_column(
                        ColumnDef::new(MasterAccounts::Currency)
                            .string_len(3)
                            .not_null()
                            .default("RUB"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(MasterAccounts::Table)
                    .drop_column(MasterAccounts::Currency)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum MasterAccounts {
    Table,
    Currency,
}
