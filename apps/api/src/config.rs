use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Credentials are optional by design: a missing `ANTHROPIC_API_KEY` makes
/// generation endpoints fail with an actionable error, and an incomplete SMTP
/// block puts the dispatcher in simulation mode. Neither blocks startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub smtp: Option<SmtpConfig>,
    pub stats_path: String,
    pub port: u16,
    pub rust_log: String,
}

/// SMTP transport credentials. Present only when the full set is configured.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            smtp: SmtpConfig::from_env()?,
            stats_path: std::env::var("STATS_PATH")
                .unwrap_or_else(|_| "usage-stats.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SmtpConfig {
    /// Returns `None` when any of the SMTP variables is absent, which selects
    /// simulation mode in the dispatcher.
    fn from_env() -> Result<Option<Self>> {
        let host = optional_env("SMTP_HOST");
        let username = optional_env("SMTP_USERNAME");
        let password = optional_env("SMTP_PASSWORD");
        let from = optional_env("SMTP_FROM");

        let (Some(host), Some(username), Some(password), Some(from)) =
            (host, username, password, from)
        else {
            return Ok(None);
        };

        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid port number")?;

        Ok(Some(SmtpConfig {
            host,
            port,
            username,
            password,
            from,
        }))
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
