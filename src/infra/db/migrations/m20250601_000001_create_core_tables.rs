//! Migration: Create the core booking platform tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::NameRu).string().not_null())
                    .col(ColumnDef::new(Cities::NameLocal).string().not_null())
                    .col(ColumnDef::new(Cities::NameEn).string().not_null())
                    .col(ColumnDef::new(Cities::Latitude).double().null())
                    .col(ColumnDef::new(Cities::Longitude).double().null())
                    .col(ColumnDef::new(Cities::CountryCode).string_len(2).null())
                    .col(
                        ColumnDef::new(Cities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CountryCurrencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CountryCurrencies::CountryCode)
                            .string_len(2)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CountryCurrencies::CurrencyCode)
                            .string_len(3)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MasterAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MasterAccounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MasterAccounts::TelegramId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MasterAccounts::Name).string().not_null())
                    .col(ColumnDef::new(MasterAccounts::Description).text().null())
                    .col(ColumnDef::new(MasterAccounts::AvatarUrl).string().null())
                    .col(ColumnDef::new(MasterAccounts::CityId).integer().null())
                    .col(
                        ColumnDef::new(MasterAccounts::SubscriptionLevel)
                            .string()
                            .not_null()
                            .default("free"),
                    )
                    .col(
                        ColumnDef::new(MasterAccounts::SubscriptionExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MasterAccounts::IsBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MasterAccounts::BlockedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(MasterAccounts::BlockReason).text().null())
                    .col(
                        ColumnDef::new(MasterAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_master_accounts_city")
                            .from(MasterAccounts::Table, MasterAccounts::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceCategories::MasterAccountId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceCategories::Title).string().not_null())
                    .col(ColumnDef::new(ServiceCategories::Emoji).string().null())
                    .col(
                        ColumnDef::new(ServiceCategories::IsPredefined)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ServiceCategories::CategoryKey).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_categories_master")
                            .from(ServiceCategories::Table, ServiceCategories::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::MasterAccountId).integer().not_null())
                    .col(ColumnDef::new(Services::CategoryId).integer().null())
                    .col(ColumnDef::new(Services::Title).string().not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(ColumnDef::new(Services::DurationMins).integer().not_null())
                    .col(
                        ColumnDef::new(Services::CoolingPeriodMins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Services::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_master")
                            .from(Services::Table, Services::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_category")
                            .from(Services::Table, Services::CategoryId)
                            .to(ServiceCategories::Table, ServiceCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioPhotos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioPhotos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortfolioPhotos::ServiceId).integer().not_null())
                    .col(ColumnDef::new(PortfolioPhotos::FileId).string().not_null())
                    .col(ColumnDef::new(PortfolioPhotos::Caption).string().null())
                    .col(
                        ColumnDef::new(PortfolioPhotos::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_photos_service")
                            .from(PortfolioPhotos::Table, PortfolioPhotos::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkPeriods::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkPeriods::MasterAccountId).integer().not_null())
                    .col(ColumnDef::new(WorkPeriods::Weekday).small_integer().not_null())
                    .col(ColumnDef::new(WorkPeriods::StartTime).time().not_null())
                    .col(ColumnDef::new(WorkPeriods::EndTime).time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_periods_master")
                            .from(WorkPeriods::Table, WorkPeriods::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Clients::TelegramId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientMasterLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientMasterLinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClientMasterLinks::ClientId).integer().not_null())
                    .col(
                        ColumnDef::new(ClientMasterLinks::MasterAccountId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientMasterLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_master_links_client")
                            .from(ClientMasterLinks::Table, ClientMasterLinks::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_master_links_master")
                            .from(ClientMasterLinks::Table, ClientMasterLinks::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_master_links_unique")
                    .table(ClientMasterLinks::Table)
                    .col(ClientMasterLinks::ClientId)
                    .col(ClientMasterLinks::MasterAccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::ClientId).integer().not_null())
                    .col(ColumnDef::new(Bookings::MasterAccountId).integer().not_null())
                    .col(ColumnDef::new(Bookings::ServiceId).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::StartDt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::EndDt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::Price).double().not_null())
                    .col(ColumnDef::new(Bookings::Comment).text().null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_client")
                            .from(Bookings::Table, Bookings::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_master")
                            .from(Bookings::Table, Bookings::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_service")
                            .from(Bookings::Table, Bookings::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Conflict checks scan a master's bookings inside a day window
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_master_start")
                    .table(Bookings::Table)
                    .col(Bookings::MasterAccountId)
                    .col(Bookings::StartDt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::MasterAccountId).integer().not_null())
                    .col(
                        ColumnDef::new(Payments::ProviderPaymentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::IdempotenceKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Payments::ConfirmationUrl).string().null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Payments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_master")
                            .from(Payments::Table, Payments::MasterAccountId)
                            .to(MasterAccounts::Table, MasterAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientMasterLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkPeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioPhotos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MasterAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CountryCurrencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    NameRu,
    NameLocal,
    NameEn,
    Latitude,
    Longitude,
    CountryCode,
    CreatedAt,
}

#[derive(Iden)]
enum CountryCurrencies {
    Table,
    CountryCode,
    CurrencyCode,
}

#[derive(Iden)]
enum MasterAccounts {
    Table,
    Id,
    TelegramId,
    Name,
    Description,
    AvatarUrl,
    CityId,
    SubscriptionLevel,
    SubscriptionExpiresAt,
    IsBlocked,
    BlockedAt,
    BlockReason,
    CreatedAt,
}

#[derive(Iden)]
enum ServiceCategories {
    Table,
    Id,
    MasterAccountId,
    Title,
    Emoji,
    IsPredefined,
    CategoryKey,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    MasterAccountId,
    CategoryId,
    Title,
    Description,
    Price,
    DurationMins,
    CoolingPeriodMins,
    Active,
    CreatedAt,
}

#[derive(Iden)]
enum PortfolioPhotos {
    Table,
    Id,
    ServiceId,
    FileId,
    Caption,
    OrderIndex,
}

#[derive(Iden)]
enum WorkPeriods {
    Table,
    Id,
    MasterAccountId,
    Weekday,
    StartTime,
    EndTime,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    TelegramId,
    CreatedAt,
}

#[derive(Iden)]
enum ClientMasterLinks {
    Table,
    Id,
    ClientId,
    MasterAccountId,
    CreatedAt,
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    ClientId,
    MasterAccountId,
    ServiceId,
    StartDt,
    EndDt,
    Price,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    MasterAccountId,
    ProviderPaymentId,
    IdempotenceKey,
    Amount,
    Currency,
    Status,
    ConfirmationUrl,
    CreatedAt,
    UpdatedAt,
}
