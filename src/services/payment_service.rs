//! Premium subscription payments through YooKassa.
//!
//! The HTTP gateway is behind a trait so service tests can run against a
//! stub instead of the live provider.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::CityService;
use crate::config::{error_messages, Config, PaymentConfig, DEFAULT_CURRENCY};
use crate::domain::{Payment, PaymentStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{MasterRepository, NewPayment, PaymentRepository};

/// Provider-side view of a payment
#[derive(Debug, Clone)]
pub struct GatewayPayment {
    pub id: String,
    pub status: PaymentStatus,
    pub confirmation_url: Option<String>,
}

/// Payment provider client trait for dependency injection.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment at the provider
    async fn create_payment(
        &self,
        amount: f64,
        currency: &str,
        description: &str,
        idempotence_key: &str,
    ) -> AppResult<GatewayPayment>;

    /// Fetch the current state of a payment
    async fn fetch_payment(&self, provider_payment_id: &str) -> AppResult<GatewayPayment>;
}

#[derive(Debug, Serialize)]
struct AmountBody {
    value: String,
    currency: String,
}

#[derive(Debug, Serialize)]
struct ConfirmationRequest {
    #[serde(rename = "type")]
    kind: String,
    return_url: String,
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody {
    amount: AmountBody,
    capture: bool,
    confirmation: ConfirmationRequest,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ConfirmationResponse {
    confirmation_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderPaymentResponse {
    id: String,
    status: String,
    confirmation: Option<ConfirmationResponse>,
}

/// YooKassa HTTP client
pub struct YooKassaGateway {
    http: reqwest::Client,
    config: PaymentConfig,
    return_url: String,
}

impl YooKassaGateway {
    pub fn new(config: PaymentConfig, return_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            return_url,
        }
    }

    fn provider_error(e: reqwest::Error) -> AppError {
        tracing::error!(error = %e, "Payment provider request failed");
        AppError::PaymentProvider(e.to_string())
    }
}

#[async_trait]
impl PaymentGateway for YooKassaGateway {
    async fn create_payment(
        &self,
        amount: f64,
        currency: &str,
        description: &str,
        idempotence_key: &str,
    ) -> AppResult<GatewayPayment> {
        let body = CreatePaymentBody {
            amount: AmountBody {
                // The provider expects exactly two decimal places
                value: format!("{:.2}", amount),
                currency: currency.to_string(),
            },
            capture: true,
            confirmation: ConfirmationRequest {
                kind: "redirect".to_string(),
                return_url: self.return_url.clone(),
            },
            description: description.to_string(),
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .header("Idempotence-Key", idempotence_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::provider_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Payment provider rejected create request");
            return Err(AppError::PaymentProvider(format!(
                "Provider returned {}",
                status
            )));
        }

        let parsed: ProviderPaymentResponse =
            response.json().await.map_err(Self::provider_error)?;

        Ok(GatewayPayment {
            confirmation_url: parsed.confirmation.and_then(|c| c.confirmation_url),
            status: PaymentStatus::from(parsed.status.as_str()),
            id: parsed.id,
        })
    }

    async fn fetch_payment(&self, provider_payment_id: &str) -> AppResult<GatewayPayment> {
        let url = format!("{}/{}", self.config.api_url, provider_payment_id);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .send()
            .await
            .map_err(Self::provider_error)?;

        if !response.status().is_success() {
            return Err(AppError::PaymentProvider(format!(
                "Provider returned {}",
                response.status()
            )));
        }

        let parsed: ProviderPaymentResponse =
            response.json().await.map_err(Self::provider_error)?;

        Ok(GatewayPayment {
            confirmation_url: parsed.confirmation.and_then(|c| c.confirmation_url),
            status: PaymentStatus::from(parsed.status.as_str()),
            id: parsed.id,
        })
    }
}

/// Payment initiation response returned to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment_id: i32,
    #[schema(example = "pending")]
    pub status: String,
    /// Where to send the payer to complete the payment
    pub confirmation_url: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.id,
            status: payment.status.as_str().to_string(),
            confirmation_url: payment.confirmation_url,
        }
    }
}

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Start a premium subscription payment for a master
    async fn create_premium_payment(&self, master_telegram_id: i64) -> AppResult<PaymentResponse>;

    /// Poll the provider and apply the outcome. A succeeded payment
    /// extends the master's premium subscription. Callers only see
    /// payments of their own master account.
    async fn check_payment(
        &self,
        payment_id: i32,
        caller_telegram_id: i64,
    ) -> AppResult<PaymentResponse>;
}

/// Concrete implementation of PaymentService
pub struct PaymentManager {
    payments: Arc<dyn PaymentRepository>,
    masters: Arc<dyn MasterRepository>,
    cities: Arc<dyn CityService>,
    gateway: Arc<dyn PaymentGateway>,
    config: Config,
}

impl PaymentManager {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        masters: Arc<dyn MasterRepository>,
        cities: Arc<dyn CityService>,
        gateway: Arc<dyn PaymentGateway>,
        config: Config,
    ) -> Self {
        Self {
            payments,
            masters,
            cities,
            gateway,
            config,
        }
    }

    /// The currency a master is charged in: their stored currency, or
    /// the currency of their city when none is set yet.
    async fn charge_currency(&self, currency: &str, city_id: Option<i32>) -> AppResult<String> {
        if !currency.is_empty() {
            return Ok(currency.to_string());
        }
        match city_id {
            Some(city_id) => self.cities.currency_for(city_id).await,
            None => Ok(DEFAULT_CURRENCY.to_string()),
        }
    }
}

#[async_trait]
impl PaymentService for PaymentManager {
    async fn create_premium_payment(&self, master_telegram_id: i64) -> AppResult<PaymentResponse> {
        if !self.config.payment.is_configured() {
            return Err(AppError::PaymentProvider(
                "Payment provider is not configured".to_string(),
            ));
        }

        let master = self
            .masters
            .find_by_telegram_id(master_telegram_id)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        let idempotence_key = Uuid::new_v4().to_string();
        let description = format!("Premium subscription for {}", master.name);
        let currency = self
            .charge_currency(&master.currency, master.city_id)
            .await?;

        let created = self
            .gateway
            .create_payment(
                self.config.premium_price,
                &currency,
                &description,
                &idempotence_key,
            )
            .await?;

        let payment = self
            .payments
            .create(NewPayment {
                master_account_id: master.id,
                provider_payment_id: created.id,
                idempotence_key,
                amount: self.config.premium_price,
                currency,
                status: created.status,
                confirmation_url: created.confirmation_url,
            })
            .await?;

        tracing::info!(
            payment_id = payment.id,
            master_id = payment.master_account_id,
            "Premium payment created"
        );

        Ok(PaymentResponse::from(payment))
    }

    async fn check_payment(
        &self,
        payment_id: i32,
        caller_telegram_id: i64,
    ) -> AppResult<PaymentResponse> {
        let payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or_not_found(error_messages::PAYMENT_NOT_FOUND)?;

        // Someone else's payment looks like no payment at all
        let owner = self.masters.find_by_id(payment.master_account_id).await?;
        if owner.map_or(true, |m| m.telegram_id != caller_telegram_id) {
            return Err(AppError::not_found(error_messages::PAYMENT_NOT_FOUND));
        }

        if payment.is_final() {
            return Ok(PaymentResponse::from(payment));
        }

        let remote = self.gateway.fetch_payment(&payment.provider_payment_id).await?;
        if remote.status == payment.status {
            return Ok(PaymentResponse::from(payment));
        }

        let updated = self.payments.update_status(payment.id, remote.status).await?;

        if updated.status == PaymentStatus::Succeeded {
            let expires_at = Utc::now() + Duration::days(self.config.premium_duration_days);
            self.masters
                .set_premium(updated.master_account_id, expires_at)
                .await?;
            tracing::info!(
                payment_id = updated.id,
                master_id = updated.master_account_id,
                %expires_at,
                "Premium subscription activated"
            );
        }

        Ok(PaymentResponse::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityResponse, MasterAccount, SubscriptionLevel};
    use crate::infra::repositories::{MockMasterRepository, MockPaymentRepository};

    /// City service stub with a fixed currency answer
    struct StubCities;

    #[async_trait]
    impl CityService for StubCities {
        async fn list_cities(&self, _country: Option<String>) -> AppResult<Vec<CityResponse>> {
            Ok(vec![])
        }

        async fn currency_for(&self, _city_id: i32) -> AppResult<String> {
            Ok("KZT".to_string())
        }
    }

    /// Gateway stub with canned responses
    struct StubGateway {
        fetch_status: PaymentStatus,
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn create_payment(
            &self,
            _amount: f64,
            _currency: &str,
            _description: &str,
            _idempotence_key: &str,
        ) -> AppResult<GatewayPayment> {
            Ok(GatewayPayment {
                id: "prov-1".to_string(),
                status: PaymentStatus::Pending,
                confirmation_url: Some("https://pay.example/confirm".to_string()),
            })
        }

        async fn fetch_payment(&self, provider_payment_id: &str) -> AppResult<GatewayPayment> {
            Ok(GatewayPayment {
                id: provider_payment_id.to_string(),
                status: self.fetch_status,
                confirmation_url: None,
            })
        }
    }

    fn payment(status: PaymentStatus) -> Payment {
        Payment {
            id: 1,
            master_account_id: 3,
            provider_payment_id: "prov-1".to_string(),
            idempotence_key: "key-1".to_string(),
            amount: 299.0,
            currency: "RUB".to_string(),
            status,
            confirmation_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn master(id: i32) -> MasterAccount {
        MasterAccount {
            id,
            telegram_id: 9000 + i64::from(id),
            name: "Anna".to_string(),
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

    fn manager(
        payments: MockPaymentRepository,
        masters: MockMasterRepository,
        fetch_status: PaymentStatus,
    ) -> PaymentManager {
        PaymentManager::new(
            Arc::new(payments),
            Arc::new(masters),
            Arc::new(StubCities),
            Arc::new(StubGateway { fetch_status }),
            Config::from_env(),
        )
    }

    /// Master repository answering the ownership lookup for master 3
    fn masters_owning_payment() -> MockMasterRepository {
        let mut masters = MockMasterRepository::new();
        masters
            .expect_find_by_id()
            .returning(|id| Ok(Some(master(id))));
        masters
    }

    #[tokio::test]
    async fn test_final_payment_skips_provider_poll() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Succeeded))));
        // update_status not expected: a final payment is returned as-is

        let svc = manager(payments, masters_owning_payment(), PaymentStatus::Pending);
        let response = svc.check_payment(1, 9003).await.unwrap();
        assert_eq!(response.status, "succeeded");
    }

    #[tokio::test]
    async fn test_succeeded_payment_activates_premium() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Pending))));
        payments
            .expect_update_status()
            .returning(|_, status| Ok(payment(status)));

        let mut masters = masters_owning_payment();
        masters
            .expect_set_premium()
            .withf(|id, _| *id == 3)
            .returning(|id, expires_at| {
                let mut m = master(id);
                m.subscription_level = SubscriptionLevel::Premium;
                m.subscription_expires_at = Some(expires_at);
                Ok(m)
            });

        let svc = manager(payments, masters, PaymentStatus::Succeeded);
        let response = svc.check_payment(1, 9003).await.unwrap();
        assert_eq!(response.status, "succeeded");
    }

    #[tokio::test]
    async fn test_unchanged_pending_payment_is_not_rewritten() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Pending))));
        // update_status not expected: status did not move

        let svc = manager(payments, masters_owning_payment(), PaymentStatus::Pending);
        let response = svc.check_payment(1, 9003).await.unwrap();
        assert_eq!(response.status, "pending");
    }

    #[tokio::test]
    async fn test_unknown_payment_is_not_found() {
        let mut payments = MockPaymentRepository::new();
        payments.expect_find_by_id().returning(|_| Ok(None));

        let svc = manager(payments, MockMasterRepository::new(), PaymentStatus::Pending);
        let result = svc.check_payment(42, 9003).await;
        assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
    }

    #[tokio::test]
    async fn test_foreign_payment_is_hidden_from_other_callers() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Succeeded))));

        // Caller 5555 does not own master 3's payment
        let svc = manager(payments, masters_owning_payment(), PaymentStatus::Pending);
        let result = svc.check_payment(1, 5555).await;
        assert!(matches!(result, Err(AppError::NotFoundWithMessage(_))));
    }

    #[tokio::test]
    async fn test_charge_currency_falls_back_to_city() {
        std::env::set_var("PAYMENT_SECRET_KEY", "test-secret");

        let mut masters = MockMasterRepository::new();
        masters.expect_find_by_telegram_id().returning(|tid| {
            let mut m = master(3);
            m.telegram_id = tid;
            m.currency = String::new();
            m.city_id = Some(5);
            Ok(Some(m))
        });

        let mut payments = MockPaymentRepository::new();
        payments
            .expect_create()
            .withf(|new| new.currency == "KZT")
            .returning(|new| {
                let mut p = payment(new.status);
                p.currency = new.currency;
                Ok(p)
            });

        let svc = manager(payments, masters, PaymentStatus::Pending);
        let response = svc.create_premium_payment(9003).await.unwrap();
        assert_eq!(response.status, "pending");
    }
}
