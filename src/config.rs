//! Process configuration, read from the environment (and `.env`).

use anyhow::{Context, anyhow};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://chatbot.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub classifier_url: String,
    pub classifier_api_token: Option<String>,
    /// `None` means classifier calls may block for as long as the endpoint takes.
    pub classifier_timeout: Option<Duration>,
    /// Serialize read-modify-write operations per username inside this process.
    pub serialize_user_writes: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Settings> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_owned());

        let bind_addr = get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = SocketAddr::from_str(&bind_addr)
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let classifier_url =
            get("CLASSIFIER_URL").ok_or_else(|| anyhow!("CLASSIFIER_URL must be set"))?;

        let classifier_timeout = get("CLASSIFIER_TIMEOUT_SECS")
            .map(|secs| {
                u64::from_str(&secs)
                    .map(Duration::from_secs)
                    .with_context(|| format!("CLASSIFIER_TIMEOUT_SECS is not a number: {secs}"))
            })
            .transpose()?;

        let serialize_user_writes = get("SERIALIZE_USER_WRITES")
            .map(|flag| parse_flag(&flag))
            .transpose()?
            .unwrap_or(false);

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Settings {
            database_url,
            bind_addr,
            classifier_url,
            classifier_api_token: get("CLASSIFIER_API_TOKEN"),
            classifier_timeout,
            serialize_user_writes,
            cors_allowed_origins,
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("SERIALIZE_USER_WRITES is not a boolean: {other}")),
    }
}
