//! Master discovery service tests.
//!
//! Drives MasterCatalog through hand-written in-memory repositories,
//! no database or Redis required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};

use lumi_api::domain::{
    City, Client, MasterAccount, PortfolioPhoto, Service, ServiceCategory, SubscriptionLevel,
    WorkPeriod,
};
use lumi_api::errors::{AppError, AppResult};
use lumi_api::infra::{
    CatalogRepository, CityRepository, ClientRepository, MasterRepository, ScheduleRepository,
};
use lumi_api::services::{MasterCatalog, MasterService};
use lumi_api::types::PaginationParams;

// =============================================================================
// In-memory repositories
// =============================================================================

struct StubCities {
    cities: Vec<City>,
}

#[async_trait]
impl CityRepository for StubCities {
    async fn list(&self, country_code: Option<String>) -> AppResult<Vec<City>> {
        let filter = country_code.map(|c| c.to_uppercase());
        Ok(self
            .cities
            .iter()
            .filter(|c| match &filter {
                Some(code) => c.country_code.as_deref() == Some(code.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>> {
        Ok(self.cities.iter().find(|c| c.id == id).cloned())
    }

    async fn currency_override(&self, _country_code: &str) -> AppResult<Option<String>> {
        Ok(None)
    }
}

struct StubMasters {
    masters: Vec<MasterAccount>,
}

#[async_trait]
impl MasterRepository for StubMasters {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<MasterAccount>> {
        Ok(self.masters.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> AppResult<Option<MasterAccount>> {
        Ok(self
            .masters
            .iter()
            .find(|m| m.telegram_id == telegram_id)
            .cloned())
    }

    async fn list_visible_by_city(&self, city_id: i32) -> AppResult<Vec<MasterAccount>> {
        Ok(self
            .masters
            .iter()
            .filter(|m| m.city_id == Some(city_id) && !m.is_blocked)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<MasterAccount>> {
        Ok(self
            .masters
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    async fn list_paginated(
        &self,
        _params: PaginationParams,
        _search: Option<String>,
    ) -> AppResult<(Vec<MasterAccount>, u64)> {
        Ok((self.masters.clone(), self.masters.len() as u64))
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(self.masters.len() as u64)
    }

    async fn count_blocked(&self) -> AppResult<u64> {
        Ok(self.masters.iter().filter(|m| m.is_blocked).count() as u64)
    }

    async fn count_premium(&self) -> AppResult<u64> {
        Ok(self
            .masters
            .iter()
            .filter(|m| m.subscription_level.is_premium())
            .count() as u64)
    }

    async fn set_blocked(
        &self,
        _id: i32,
        _blocked: bool,
        _reason: Option<String>,
    ) -> AppResult<MasterAccount> {
        Err(AppError::internal("not used in these tests"))
    }

    async fn set_premium(
        &self,
        _id: i32,
        _expires_at: DateTime<Utc>,
    ) -> AppResult<MasterAccount> {
        Err(AppError::internal("not used in these tests"))
    }
}

struct StubCatalog {
    services: Vec<Service>,
    categories: Vec<ServiceCategory>,
    portfolio: Vec<PortfolioPhoto>,
}

#[async_trait]
impl CatalogRepository for StubCatalog {
    async fn find_service(&self, id: i32) -> AppResult<Option<Service>> {
        Ok(self.services.iter().find(|s| s.id == id).cloned())
    }

    async fn services_for_master(&self, master_id: i32) -> AppResult<Vec<Service>> {
        Ok(self
            .services
            .iter()
            .filter(|s| s.master_account_id == master_id && s.active)
            .cloned()
            .collect())
    }

    async fn service_counts(&self, master_ids: Vec<i32>) -> AppResult<HashMap<i32, u64>> {
        let mut counts = HashMap::new();
        for service in self.services.iter().filter(|s| s.active) {
            if master_ids.contains(&service.master_account_id) {
                *counts.entry(service.master_account_id).or_default() += 1;
            }
        }
        Ok(counts)
    }

    async fn categories_for_master(&self, master_id: i32) -> AppResult<Vec<ServiceCategory>> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.master_account_id == master_id)
            .cloned()
            .collect())
    }

    async fn portfolio_for_service(&self, service_id: i32) -> AppResult<Vec<PortfolioPhoto>> {
        Ok(self
            .portfolio
            .iter()
            .filter(|p| p.service_id == service_id)
            .cloned()
            .collect())
    }
}

struct StubSchedule {
    periods: Vec<WorkPeriod>,
}

#[async_trait]
impl ScheduleRepository for StubSchedule {
    async fn periods_for_master(&self, master_id: i32) -> AppResult<Vec<WorkPeriod>> {
        Ok(self
            .periods
            .iter()
            .filter(|p| p.master_account_id == master_id)
            .cloned()
            .collect())
    }
}

struct StubClients {
    links: Mutex<Vec<(i32, i32)>>,
}

impl StubClients {
    fn with_links(links: Vec<(i32, i32)>) -> Self {
        Self {
            links: Mutex::new(links),
        }
    }
}

#[async_trait]
impl ClientRepository for StubClients {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>> {
        Ok(Some(Client {
            id,
            telegram_id: 1000 + i64::from(id),
            created_at: Utc::now(),
        }))
    }

    async fn get_or_create(&self, telegram_id: i64) -> AppResult<Client> {
        Ok(Client {
            id: 1,
            telegram_id,
            created_at: Utc::now(),
        })
    }

    async fn linked_master_ids(&self, client_id: i32) -> AppResult<Vec<i32>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == client_id)
            .map(|(_, m)| *m)
            .collect())
    }

    async fn is_linked(&self, client_id: i32, master_id: i32) -> AppResult<bool> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .contains(&(client_id, master_id)))
    }

    async fn link_master(&self, client_id: i32, master_id: i32) -> AppResult<()> {
        self.links.lock().unwrap().push((client_id, master_id));
        Ok(())
    }

    async fn unlink_master(&self, client_id: i32, master_id: i32) -> AppResult<bool> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|&(c, m)| !(c == client_id && m == master_id));
        Ok(links.len() < before)
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(0)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn moscow() -> City {
    City {
        id: 1,
        name_ru: "Москва".to_string(),
        name_local: "Москва".to_string(),
        name_en: "Moscow".to_string(),
        latitude: None,
        longitude: None,
        country_code: Some("RU".to_string()),
        created_at: Utc::now(),
    }
}

fn master(id: i32, city_id: Option<i32>, blocked: bool) -> MasterAccount {
    MasterAccount {
        id,
        telegram_id: 9000 + i64::from(id),
        name: format!("Master {}", id),
        description: None,
        avatar_url: None,
        city_id,
        currency: "RUB".to_string(),
        subscription_level: SubscriptionLevel::Free,
        subscription_expires_at: None,
        is_blocked: blocked,
        blocked_at: None,
        block_reason: None,
        created_at: Utc::now(),
    }
}

fn service(id: i32, master_id: i32, category_id: Option<i32>) -> Service {
    Service {
        id,
        master_account_id: master_id,
        category_id,
        title: format!("Service {}", id),
        description: None,
        price: 1500.0,
        duration_mins: 60,
        cooling_period_mins: 0,
        active: true,
        created_at: Utc::now(),
    }
}

fn catalog_service(
    masters: Vec<MasterAccount>,
    services: Vec<Service>,
    categories: Vec<ServiceCategory>,
    periods: Vec<WorkPeriod>,
    links: Vec<(i32, i32)>,
) -> MasterCatalog {
    MasterCatalog::new(
        Arc::new(StubMasters { masters }),
        Arc::new(StubCatalog {
            services,
            categories,
            portfolio: vec![],
        }),
        Arc::new(StubSchedule { periods }),
        Arc::new(StubCities {
            cities: vec![moscow()],
        }),
        Arc::new(StubClients::with_links(links)),
    )
}

// =============================================================================
// Discovery tests
// =============================================================================

#[tokio::test]
async fn test_masters_in_city_resolves_names_and_counts() {
    let service_list = vec![service(1, 1, None), service(2, 1, None), service(3, 2, None)];
    let svc = catalog_service(
        vec![master(1, Some(1), false), master(2, Some(1), false)],
        service_list,
        vec![],
        vec![],
        vec![],
    );

    let result = svc.masters_in_city(1, 7).await.unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].city_name.as_deref(), Some("Москва"));
    assert_eq!(result[0].services_count, 2);
    assert_eq!(result[1].services_count, 1);
}

#[tokio::test]
async fn test_masters_in_city_unknown_city() {
    let svc = catalog_service(vec![], vec![], vec![], vec![], vec![]);

    let result = svc.masters_in_city(99, 7).await;
    assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
}

#[tokio::test]
async fn test_blocked_masters_hidden_from_city_listing() {
    let svc = catalog_service(
        vec![master(1, Some(1), false), master(2, Some(1), true)],
        vec![],
        vec![],
        vec![],
        vec![],
    );

    let result = svc.masters_in_city(1, 7).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[tokio::test]
async fn test_city_listing_skips_masters_already_on_my_list() {
    let svc = catalog_service(
        vec![master(1, Some(1), false), master(2, Some(1), false)],
        vec![],
        vec![],
        vec![],
        vec![(7, 1)],
    );

    let result = svc.masters_in_city(1, 7).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
}

#[tokio::test]
async fn test_master_detail_includes_services_and_schedule() {
    let category = ServiceCategory {
        id: 10,
        master_account_id: 1,
        title: "Nails".to_string(),
        emoji: Some("💅".to_string()),
        is_predefined: true,
        category_key: Some("nails".to_string()),
    };
    let periods = vec![WorkPeriod {
        id: 1,
        master_account_id: 1,
        weekday: 0,
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    }];
    let svc = catalog_service(
        vec![master(1, Some(1), false)],
        vec![service(1, 1, Some(10))],
        vec![category],
        periods,
        vec![],
    );

    let detail = svc.master_detail(1).await.unwrap();
    assert_eq!(detail.city.as_deref(), Some("Москва"));
    assert_eq!(detail.services.len(), 1);
    assert_eq!(detail.services[0].category_name.as_deref(), Some("Nails"));
    assert_eq!(detail.work_schedule.len(), 1);
    assert_eq!(detail.work_schedule[0].start_time, "09:00");
    assert_eq!(detail.work_schedule[0].end_time, "18:00");
}

#[tokio::test]
async fn test_master_detail_hides_blocked_master() {
    let svc = catalog_service(vec![master(1, Some(1), true)], vec![], vec![], vec![], vec![]);

    let result = svc.master_detail(1).await;
    assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
}

// =============================================================================
// Personal list tests
// =============================================================================

#[tokio::test]
async fn test_add_and_list_my_masters() {
    let svc = catalog_service(
        vec![master(1, Some(1), false)],
        vec![],
        vec![],
        vec![],
        vec![],
    );

    svc.add_master(7, 1).await.unwrap();
    let mine = svc.my_masters(7).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, 1);
}

#[tokio::test]
async fn test_add_master_twice_conflicts() {
    let svc = catalog_service(
        vec![master(1, Some(1), false)],
        vec![],
        vec![],
        vec![],
        vec![(7, 1)],
    );

    let result = svc.add_master(7, 1).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_add_blocked_master_rejected() {
    let svc = catalog_service(vec![master(1, Some(1), true)], vec![], vec![], vec![], vec![]);

    let result = svc.add_master(7, 1).await;
    assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
}

#[tokio::test]
async fn test_my_masters_filters_blocked() {
    let svc = catalog_service(
        vec![master(1, Some(1), false), master(2, Some(1), true)],
        vec![],
        vec![],
        vec![],
        vec![(7, 1), (7, 2)],
    );

    let mine = svc.my_masters(7).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, 1);
}

#[tokio::test]
async fn test_remove_master() {
    let svc = catalog_service(
        vec![master(1, Some(1), false)],
        vec![],
        vec![],
        vec![],
        vec![(7, 1)],
    );

    svc.remove_master(7, 1).await.unwrap();
    assert!(svc.my_masters(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_master_not_on_list() {
    let svc = catalog_service(
        vec![master(1, Some(1), false)],
        vec![],
        vec![],
        vec![],
        vec![],
    );

    let result = svc.remove_master(7, 1).await;
    assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
}
