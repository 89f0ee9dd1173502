//! Administrative operations: moderation and platform statistics.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{MasterAccount, SubscriptionLevel};
use crate::errors::AppResult;
use crate::infra::{BookingRepository, ClientRepository, MasterRepository};
use crate::types::{Paginated, PaginationParams};

/// Platform statistics for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformStats {
    pub masters_total: u64,
    pub masters_blocked: u64,
    pub masters_premium: u64,
    pub clients_total: u64,
    pub bookings_total: u64,
}

/// Master row in the admin listing
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminMasterRow {
    pub id: i32,
    pub telegram_id: i64,
    pub name: String,
    pub subscription_level: SubscriptionLevel,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
}

impl From<MasterAccount> for AdminMasterRow {
    fn from(master: MasterAccount) -> Self {
        Self {
            id: master.id,
            telegram_id: master.telegram_id,
            name: master.name,
            subscription_level: master.subscription_level,
            is_blocked: master.is_blocked,
            block_reason: master.block_reason,
        }
    }
}

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// All masters, newest first, optionally filtered by name
    async fn list_masters(
        &self,
        params: PaginationParams,
        search: Option<String>,
    ) -> AppResult<Paginated<AdminMasterRow>>;

    /// Hide a master from discovery and stop new bookings
    async fn block_master(&self, master_id: i32, reason: Option<String>) -> AppResult<()>;

    /// Restore a blocked master
    async fn unblock_master(&self, master_id: i32) -> AppResult<()>;

    /// Platform-wide counters
    async fn stats(&self) -> AppResult<PlatformStats>;
}

/// Concrete implementation of AdminService
pub struct AdminManager {
    masters: Arc<dyn MasterRepository>,
    clients: Arc<dyn ClientRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl AdminManager {
    pub fn new(
        masters: Arc<dyn MasterRepository>,
        clients: Arc<dyn ClientRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            masters,
            clients,
            bookings,
        }
    }
}

#[async_trait]
impl AdminService for AdminManager {
    async fn list_masters(
        &self,
        params: PaginationParams,
        search: Option<String>,
    ) -> AppResult<Paginated<AdminMasterRow>> {
        let page = params.page;
        let per_page = params.limit();
        let (masters, total) = self.masters.list_paginated(params, search).await?;

        let rows = masters.into_iter().map(AdminMasterRow::from).collect();
        Ok(Paginated::new(rows, page, per_page, total))
    }

    async fn block_master(&self, master_id: i32, reason: Option<String>) -> AppResult<()> {
        let master = self.masters.set_blocked(master_id, true, reason).await?;
        tracing::warn!(
            master_id = master.id,
            reason = master.block_reason.as_deref().unwrap_or("-"),
            "Master blocked"
        );
        Ok(())
    }

    async fn unblock_master(&self, master_id: i32) -> AppResult<()> {
        let master = self.masters.set_blocked(master_id, false, None).await?;
        tracing::info!(master_id = master.id, "Master unblocked");
        Ok(())
    }

    async fn stats(&self) -> AppResult<PlatformStats> {
        let masters_total = self.masters.count_all().await?;
        let masters_blocked = self.masters.count_blocked().await?;
        let masters_premium = self.masters.count_premium().await?;
        let clients_total = self.clients.count_all().await?;
        let bookings_total = self.bookings.count_all().await?;

        Ok(PlatformStats {
            masters_total,
            masters_blocked,
            masters_premium,
            clients_total,
            bookings_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::infra::repositories::{
        MockBookingRepository, MockClientRepository, MockMasterRepository,
    };

    fn master(id: i32) -> MasterAccount {
        MasterAccount {
            id,
            telegram_id: 9000 + i64::from(id),
            name: format!("Master {}", id),
            description: None,
            avatar_url: None,
            city_id: None,
            currency: "RUB".to_string(),
            subscription_level: SubscriptionLevel::Free,
            subscription_expires_at: None,
            is_blocked: false,
            blocked_at: None,
            block_reason: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_stats_aggregates_counts() {
        let mut masters = MockMasterRepository::new();
        masters.expect_count_all().returning(|| Ok(10));
        masters.expect_count_blocked().returning(|| Ok(2));
        masters.expect_count_premium().returning(|| Ok(3));

        let mut clients = MockClientRepository::new();
        clients.expect_count_all().returning(|| Ok(25));

        let mut bookings = MockBookingRepository::new();
        bookings.expect_count_all().returning(|| Ok(40));

        let admin = AdminManager::new(Arc::new(masters), Arc::new(clients), Arc::new(bookings));
        let stats = admin.stats().await.unwrap();

        assert_eq!(stats.masters_total, 10);
        assert_eq!(stats.masters_blocked, 2);
        assert_eq!(stats.masters_premium, 3);
        assert_eq!(stats.clients_total, 25);
        assert_eq!(stats.bookings_total, 40);
    }

    #[tokio::test]
    async fn test_list_masters_builds_pagination_meta() {
        let mut masters = MockMasterRepository::new();
        masters
            .expect_list_paginated()
            .returning(|_, _| Ok((vec![master(1), master(2)], 5)));

        let admin = AdminManager::new(
            Arc::new(masters),
            Arc::new(MockClientRepository::new()),
            Arc::new(MockBookingRepository::new()),
        );

        let params = PaginationParams {
            page: 1,
            per_page: 2,
        };
        let page = admin.list_masters(params, None).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_block_master_passes_reason() {
        let mut masters = MockMasterRepository::new();
        masters
            .expect_set_blocked()
            .withf(|id, blocked, reason| {
                *id == 1 && *blocked && reason.as_deref() == Some("spam")
            })
            .returning(|id, _, reason| {
                let mut m = master(id);
                m.is_blocked = true;
                m.block_reason = reason;
                Ok(m)
            });

        let admin = AdminManager::new(
            Arc::new(masters),
            Arc::new(MockClientRepository::new()),
            Arc::new(MockBookingRepository::new()),
        );

        admin.block_master(1, Some("spam".to_string())).await.unwrap();
    }
}
