pub mod profiles;

use dotenvy::dotenv;
use profiles::{Profile, ProfileDefaults};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Longest session lifetime accepted from the environment (30 days).
pub const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Where login sessions are kept.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Postgres,
    Memory,
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!(
                "SESSION_STORE must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_allowed_origins: Option<String>,
    pub session_ttl_secs: u64,
    pub session_cookie_secure: bool,
    pub session_store: SessionBackend,
    pub log_json: bool,
}

pub struct ConfigInfo {
    pub config: Config,
    pub profile: Profile,
    pub overrides: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<ConfigInfo> {
        dotenv().ok();
        Self::from_lookup(Profile::from_env(), |key| env::var(key).ok())
    }

    /// Resolves configuration from `lookup` on top of the profile defaults.
    pub fn from_lookup<F>(profile: Profile, lookup: F) -> anyhow::Result<ConfigInfo>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ProfileDefaults::for_profile(profile);
        let mut overrides = Vec::new();
        let mut read = |key: &str| {
            let value = lookup(key);
            if value.is_some() {
                overrides.push(key.to_string());
            }
            value
        };

        let server_port = match read("SERVER_PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a port number, got '{}'", v))?,
            None => defaults.server_port,
        };

        let database_url = read("DATABASE_URL")
            .or(defaults.database_url)
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let db_max_connections = match read("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse()?,
            None => defaults.db_max_connections,
        };

        let cors_allowed_origins = read("CORS_ALLOWED_ORIGINS").or(defaults.cors_allowed_origins);

        let session_ttl_secs = match read("SESSION_TTL_SECS") {
            Some(v) => v.parse().map_err(|_| {
                anyhow::anyhow!("SESSION_TTL_SECS must be a number of seconds, got '{}'", v)
            })?,
            None => defaults.session_ttl_secs,
        };
        if session_ttl_secs == 0 || session_ttl_secs > MAX_SESSION_TTL_SECS {
            anyhow::bail!(
                "SESSION_TTL_SECS must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECS,
                session_ttl_secs
            );
        }

        let session_cookie_secure = match read("SESSION_COOKIE_SECURE") {
            Some(v) => parse_bool(&v)?,
            None => defaults.session_cookie_secure,
        };

        let session_store = match read("SESSION_STORE") {
            Some(v) => v.parse()?,
            None => SessionBackend::Postgres,
        };

        let log_json = read("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(ConfigInfo {
            config: Config {
                server_port,
                database_url,
                db_max_connections,
                cors_allowed_origins,
                session_ttl_secs,
                session_cookie_secure,
                session_store,
                log_json,
            },
            profile,
            overrides,
        })
    }

    /// Session lifetime, capped at `MAX_SESSION_TTL_SECS`.
    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = self.session_ttl_secs.min(MAX_SESSION_TTL_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    /// Allowed CORS origins, split on commas.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Database URL with the password masked, for printing.
    pub fn redacted_database_url(&self) -> String {
        match (self.database_url.find("://"), self.database_url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.database_url[scheme_end + 3..at];
                match credentials.split_once(':') {
                    Some((user, _)) => format!(
                        "{}{}:****{}",
                        &self.database_url[..scheme_end + 3],
                        user,
                        &self.database_url[at..]
                    ),
                    None => self.database_url.clone(),
                }
            }
            _ => self.database_url.clone(),
        }
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{}'", other)),
    }
}
