use std::{fmt::Display, str::FromStr};

use anyhow::{bail, Context};
use tracing::{info, warn};

pub const DEFAULT_ROSTER: [&str; 6] = ["Britten", "Manivald", "Dima", "Sasha", "Henrik", "Andreas"];

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Lowercase hex SHA-256 of the admin password.
    pub admin_pass_hash: Option<String>,
    pub cookie_secure: bool,
    /// Whether one reverse proxy sits in front and appends to `X-Forwarded-For`.
    pub trust_proxy: bool,
    pub roster: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let admin_pass_hash = lookup("ADMIN_PASS_HASH").map(|hash| hash.trim().to_lowercase());
        if admin_pass_hash.is_none() {
            warn!("ADMIN_PASS_HASH is not set, admin login will fail");
        }

        let roster = match lookup("SANTA_ROSTER") {
            Some(names) => parse_roster(&names)?,
            None => DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://secret_santa.db".to_owned()),
            port: try_load(&lookup, "PORT", "3001")?,
            admin_pass_hash,
            cookie_secure: try_load(&lookup, "COOKIE_SECURE", "false")?,
            trust_proxy: try_load(&lookup, "TRUST_PROXY", "false")?,
            roster,
        })
    }

    /// Config for tests and local tooling: in-memory db, default roster.
    pub fn with_admin_hash(admin_pass_hash: impl Into<String>) -> Self {
        Self {
            database_url: "sqlite::memory:".to_owned(),
            port: 3001,
            admin_pass_hash: Some(admin_pass_hash.into()),
            cookie_secure: false,
            trust_proxy: false,
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("invalid {key} value {raw:?}"))
}

fn parse_roster(names: &str) -> anyhow::Result<Vec<String>> {
    let roster: Vec<String> = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();

    if roster.is_empty() {
        bail!("SANTA_ROSTER must name at least one participant");
    }
    Ok(roster)
}
