use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Cache key names and expiries shared by the catalog and order caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub products_key: String,
    pub product_id_prefix: String,
    pub order_prefix: String,
    pub order_details_prefix: String,
    pub catalog_ttl: Duration,
    /// `None` stores order entries without expiry.
    pub order_ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            products_key: "products".to_string(),
            product_id_prefix: "product:".to_string(),
            order_prefix: "order:".to_string(),
            order_details_prefix: "order_details:".to_string(),
            catalog_ttl: Duration::from_secs(24 * 60 * 60),
            order_ttl: None,
        }
    }
}

/// Argon2 cost for passcode hashes. Defaults to the smallest parameters
/// the algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasscodeConfig {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl Default for PasscodeConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::MIN_M_COST,
            iterations: argon2::Params::MIN_T_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Expected value of the `Authorization` header on admin routes.
    pub admin_key: String,
    /// When set, public routes require HTTP Basic Auth with these credentials.
    pub basic: Option<BasicAuthCredentials>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub shutdown_grace: Duration,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub passcode: PasscodeConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cache_defaults = CacheConfig::default();
        let passcode_defaults = PasscodeConfig::default();

        let basic = match (lookup("BASIC_AUTH_USERNAME"), lookup("BASIC_AUTH_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicAuthCredentials { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("BASIC_AUTH_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("BASIC_AUTH_USERNAME")),
        };

        let order_ttl = lookup("ORDER_CACHE_TTL_SECS")
            .map(|raw| parse::<u64>("ORDER_CACHE_TTL_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            host: or_default("HOST", "0.0.0.0"),
            port: parse("PORT", &or_default("PORT", "8080"))?,
            shutdown_grace: Duration::from_secs(parse(
                "SHUTDOWN_GRACE_SECS",
                &or_default("SHUTDOWN_GRACE_SECS", "5"),
            )?),
            auth: AuthConfig {
                admin_key: required("AUTHORIZATION_KEY")?,
                basic,
            },
            cache: CacheConfig {
                products_key: or_default("PRODUCTS_KEY", &cache_defaults.products_key),
                product_id_prefix: or_default("PRODUCT_ID_KEY", &cache_defaults.product_id_prefix),
                order_prefix: or_default("ORDER_KEY", &cache_defaults.order_prefix),
                order_details_prefix: or_default(
                    "ORDER_DETAILS_KEY",
                    &cache_defaults.order_details_prefix,
                ),
                catalog_ttl: Duration::from_secs(parse(
                    "CATALOG_CACHE_TTL_SECS",
                    &or_default(
                        "CATALOG_CACHE_TTL_SECS",
                        &cache_defaults.catalog_ttl.as_secs().to_string(),
                    ),
                )?),
                order_ttl,
            },
            passcode: PasscodeConfig {
                memory_kib: parse(
                    "PASSCODE_HASH_MEMORY_KIB",
                    &or_default(
                        "PASSCODE_HASH_MEMORY_KIB",
                        &passcode_defaults.memory_kib.to_string(),
                    ),
                )?,
                iterations: parse(
                    "PASSCODE_HASH_ITERATIONS",
                    &or_default(
                        "PASSCODE_HASH_ITERATIONS",
                        &passcode_defaults.iterations.to_string(),
                    ),
                )?,
            },
        })
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
