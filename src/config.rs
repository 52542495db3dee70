use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use bcrypt::DEFAULT_COST;

pub const SESSION_TTL_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    /// Prefix for rendered short URLs, e.g. `https://sho.rt`
    pub public_host: String,
    /// HMAC key for session tokens. `None` means a random key per process.
    pub session_secret: Option<String>,
    pub session_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub secure_cookies: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            public_host: "http://localhost:8080".to_string(),
            session_secret: None,
            session_ttl_days: 10,
            bcrypt_cost: DEFAULT_COST,
            secure_cookies: false,
            allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let session_secret = env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty());
        if session_secret.is_none() {
            log::warn!("SESSION_SECRET not set, sessions will not survive a restart");
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: parse_var("PORT", defaults.port)?,
            public_host: env::var("PUBLIC_HOST")
                .map(|host| host.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_host),
            session_secret,
            session_ttl_days: parse_var("SESSION_TTL_DAYS", defaults.session_ttl_days)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            secure_cookies: parse_var("SECURE_COOKIES", defaults.secure_cookies)?,
            allowed_origins,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used at request time.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            SESSION_TTL_DAYS_RANGE.contains(&self.session_ttl_days),
            "Invalid value for SESSION_TTL_DAYS: {} (expected {}..={})",
            self.session_ttl_days,
            SESSION_TTL_DAYS_RANGE.start(),
            SESSION_TTL_DAYS_RANGE.end()
        );
        ensure!(
            BCRYPT_COST_RANGE.contains(&self.bcrypt_cost),
            "Invalid value for BCRYPT_COST: {} (expected {}..={})",
            self.bcrypt_cost,
            BCRYPT_COST_RANGE.start(),
            BCRYPT_COST_RANGE.end()
        );
        Ok(())
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid value for {key}: {raw:?}"))
}
