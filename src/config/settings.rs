//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_PREMIUM_DURATION_DAYS,
    DEFAULT_PREMIUM_PRICE, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Telegram ids with platform-admin privileges
    pub super_admins: Vec<i64>,
    pub premium_price: f64,
    pub premium_duration_days: i64,
    /// Where the payment provider redirects the payer afterwards
    pub payment_return_url: String,
    pub payment: PaymentConfig,
}

/// Payment provider credentials and mode
#[derive(Clone)]
pub struct PaymentConfig {
    pub shop_id: String,
    pub secret_key: String,
    pub api_url: String,
    pub test_mode: bool,
}

impl PaymentConfig {
    /// Payments can only be created when a secret key is present.
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("super_admins", &self.super_admins.len())
            .field("premium_price", &self.premium_price)
            .field("premium_duration_days", &self.premium_duration_days)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            super_admins: parse_super_admins(&env::var("SUPER_ADMINS").unwrap_or_default()),
            premium_price: env::var("PREMIUM_PRICE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PREMIUM_PRICE),
            premium_duration_days: env::var("PREMIUM_DURATION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PREMIUM_DURATION_DAYS),
            payment_return_url: env::var("PAYMENT_RETURN_URL")
                .unwrap_or_else(|_| "https://t.me".to_string()),
            payment: PaymentConfig {
                shop_id: env::var("PAYMENT_SHOP_ID").unwrap_or_default(),
                secret_key: env::var("PAYMENT_SECRET_KEY").unwrap_or_default(),
                api_url: env::var("PAYMENT_API_URL")
                    .unwrap_or_else(|_| "https://api.yookassa.ru/v3/payments".to_string()),
                test_mode: env::var("PAYMENT_TEST_MODE")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(true),
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Check whether a telegram id belongs to a platform admin.
    pub fn is_super_admin(&self, telegram_id: i64) -> bool {
        self.super_admins.contains(&telegram_id)
    }
}

/// Parse the comma-separated SUPER_ADMINS list, skipping malformed entries.
fn parse_super_admins(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(entry = trimmed, "Ignoring malformed SUPER_ADMINS entry");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_super_admins() {
        assert_eq!(parse_super_admins("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(parse_super_admins(""), Vec::<i64>::new());
        assert_eq!(parse_super_admins("42,abc, 7"), vec![42, 7]);
    }
}
