use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Two weeks, matching a typical browser session cookie lifetime.
const DEFAULT_SESSION_TTL_SECS: u64 = 14 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Memory,
    Redis,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub session_backend: SessionBackend,
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,
    /// JSON band table that replaces the seeded one.
    pub bands_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let session_backend = match var("SESSION_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => SessionBackend::Memory,
            Some("redis") => SessionBackend::Redis,
            Some(other) => bail!("SESSION_BACKEND must be 'memory' or 'redis', got '{other}'"),
        };

        let redis_url = var("REDIS_URL").filter(|url| !url.trim().is_empty());
        if session_backend == SessionBackend::Redis && redis_url.is_none() {
            bail!("Required environment variable 'REDIS_URL' is not set (SESSION_BACKEND=redis)");
        }

        let session_ttl_secs = match var("SESSION_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        // Zero would expire every session as soon as it is written.
        if session_ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            session_backend,
            redis_url,
            session_ttl_secs,
            bands_path: var("BANDS_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
