//! Client and client-master link repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::client::{self, ActiveModel as ClientActiveModel, Entity as ClientEntity};
use super::entities::client_master_link::{
    self, ActiveModel as LinkActiveModel, Entity as LinkEntity,
};
use crate::domain::Client;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Client repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>>;

    /// Find client by telegram id, creating the row on first sight
    async fn get_or_create(&self, telegram_id: i64) -> AppResult<Client>;

    /// Master IDs on the client's personal list
    async fn linked_master_ids(&self, client_id: i32) -> AppResult<Vec<i32>>;

    /// Whether the client already has this master on their list
    async fn is_linked(&self, client_id: i32, master_id: i32) -> AppResult<bool>;

    /// Add a master to the client's list
    async fn link_master(&self, client_id: i32, master_id: i32) -> AppResult<()>;

    /// Remove a master from the client's list. Returns false when absent.
    async fn unlink_master(&self, client_id: i32, master_id: i32) -> AppResult<bool>;

    /// Count all registered clients
    async fn count_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of ClientRepository
pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>> {
        let result = ClientEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Client::from))
    }

    async fn get_or_create(&self, telegram_id: i64) -> AppResult<Client> {
        let existing = ClientEntity::find()
            .filter(client::Column::TelegramId.eq(telegram_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if let Some(model) = existing {
            return Ok(Client::from(model));
        }

        let active = ClientActiveModel {
            telegram_id: Set(telegram_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(telegram_id, client_id = model.id, "New client registered");
        Ok(Client::from(model))
    }

    async fn linked_master_ids(&self, client_id: i32) -> AppResult<Vec<i32>> {
        let links = LinkEntity::find()
            .filter(client_master_link::Column::ClientId.eq(client_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(links.into_iter().map(|l| l.master_account_id).collect())
    }

    async fn is_linked(&self, client_id: i32, master_id: i32) -> AppResult<bool> {
        let existing = LinkEntity::find()
            .filter(client_master_link::Column::ClientId.eq(client_id))
            .filter(client_master_link::Column::MasterAccountId.eq(master_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(existing.is_some())
    }

    async fn link_master(&self, client_id: i32, master_id: i32) -> AppResult<()> {
        let active = LinkActiveModel {
            client_id: Set(client_id),
            master_account_id: Set(master_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn unlink_master(&self, client_id: i32, master_id: i32) -> AppResult<bool> {
        let result = LinkEntity::delete_many()
            .filter(client_master_link::Column::ClientId.eq(client_id))
            .filter(client_master_link::Column::MasterAccountId.eq(master_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn count_all(&self) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;

        ClientEntity::find().count(&self.db).await.map_err(Into::into)
    }
}
