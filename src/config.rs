//! Environment configuration for the embedding application.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Admin account to provision at startup. Provisioning is explicit and
/// idempotent; there are no built-in credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Unset when `WW_ADMIN_EMAIL` is absent; provisioning is then skipped.
    pub admin: Option<AdminConfig>,
    pub code_length: usize,
    pub default_code_ttl_hours: i64,
}

impl Config {
    pub fn load() -> Self {
        let admin = env::var("WW_ADMIN_EMAIL").ok().map(|email| AdminConfig {
            email,
            first_name: try_load("WW_ADMIN_FIRST_NAME", "Site"),
            last_name: try_load("WW_ADMIN_LAST_NAME", "Administrator"),
        });
        if admin.is_none() {
            info!("WW_ADMIN_EMAIL not set, admin provisioning disabled");
        }

        Self {
            admin,
            code_length: try_load("WW_CODE_LENGTH", "6"),
            default_code_ttl_hours: try_load("WW_CODE_TTL_HOURS", "168"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(_) => default.to_string(),
    };

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value: {e}, using default {default}");
            default.parse().map_err(|_| ()).expect("default must parse")
        }
    }
}
