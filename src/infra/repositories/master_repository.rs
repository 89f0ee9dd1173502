//! Master account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::master_account::{self, ActiveModel, Entity as MasterEntity};
use crate::config::error_messages;
use crate::domain::MasterAccount;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Master account repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MasterRepository: Send + Sync {
    /// Find master by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<MasterAccount>>;

    /// Find master by telegram id
    async fn find_by_telegram_id(&self, telegram_id: i64) -> AppResult<Option<MasterAccount>>;

    /// List unblocked masters in a city
    async fn list_visible_by_city(&self, city_id: i32) -> AppResult<Vec<MasterAccount>>;

    /// Find several masters by ID, blocked ones included
    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MasterAccount>>;

    /// List all masters with pagination and an optional name search,
    /// newest first (admin view)
    async fn list_paginated(
        &self,
        params: PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<MasterAccount>, u64)>;

    /// Count all master accounts
    async fn count_all(&self) -> AppResult<u64>;

    /// Count blocked master accounts
    async fn count_blocked(&self) -> AppResult<u64>;

    /// Count masters on the premium tier
    async fn count_premium(&self) -> AppResult<u64>;

    /// Block or unblock a master
    async fn set_blocked(
        &self,
        id: i32,
        blocked: bool,
        reason: Option<String>,
    ) -> AppResult<MasterAccount>;

    /// Move a master to premium until the given expiry
    async fn set_premium(&self, id: i32, expires_at: DateTime<Utc>) -> AppResult<MasterAccount>;
}

/// Concrete implementation of MasterRepository
pub struct MasterStore {
    db: DatabaseConnection,
}

impl MasterStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MasterRepository for MasterStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<MasterAccount>> {
        let result = MasterEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(MasterAccount::from))
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> AppResult<Option<MasterAccount>> {
        let result = MasterEntity::find()
            .filter(master_account::Column::TelegramId.eq(telegram_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(MasterAccount::from))
    }

    async fn list_visible_by_city(&self, city_id: i32) -> AppResult<Vec<MasterAccount>> {
        let models = MasterEntity::find()
            .filter(master_account::Column::CityId.eq(city_id))
            .filter(master_account::Column::IsBlocked.eq(false))
            .order_by_asc(master_account::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(MasterAccount::from).collect())
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MasterAccount>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = MasterEntity::find()
            .filter(master_account::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(MasterAccount::from).collect())
    }

    async fn list_paginated(
        &self,
        params: PaginationParams,
        search: Option<String>,
    ) -> AppResult<(Vec<MasterAccount>, u64)> {
        let mut query = MasterEntity::find().order_by_desc(master_account::Column::CreatedAt);
        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            query = query.filter(master_account::Column::Name.contains(term.trim()));
        }
        let paginator = query.paginate(&self.db, params.limit());

        let total = paginator.num_items().await.map_err(AppError::from)?;
        let models = paginator
            .fetch_page(params.page.saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(MasterAccount::from).collect(), total))
    }

    async fn count_all(&self) -> AppResult<u64> {
        MasterEntity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_blocked(&self) -> AppResult<u64> {
        MasterEntity::find()
            .filter(master_account::Column::IsBlocked.eq(true))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_premium(&self) -> AppResult<u64> {
        MasterEntity::find()
            .filter(
                master_account::Column::SubscriptionLevel
                    .eq(crate::config::SUBSCRIPTION_PREMIUM),
            )
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn set_blocked(
        &self,
        id: i32,
        blocked: bool,
        reason: Option<String>,
    ) -> AppResult<MasterAccount> {
        let master = MasterEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        let mut active: ActiveModel = master.into();
        active.is_blocked = Set(blocked);
        if blocked {
            active.blocked_at = Set(Some(Utc::now()));
            active.block_reason = Set(reason);
        } else {
            active.blocked_at = Set(None);
            active.block_reason = Set(None);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(MasterAccount::from(model))
    }

    async fn set_premium(&self, id: i32, expires_at: DateTime<Utc>) -> AppResult<MasterAccount> {
        let master = MasterEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        let mut active: ActiveModel = master.into();
        active.subscription_level = Set(crate::config::SUBSCRIPTION_PREMIUM.to_string());
        active.subscription_expires_at = Set(Some(expires_at));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(MasterAccount::from(model))
    }
}
