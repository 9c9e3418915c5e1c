use anyhow::{ensure, Context, Result};

/// Value the legacy deployment shipped as its fallback secret. Treated as
/// unconfigured: startup refuses to serve admin routes behind it.
const PLACEHOLDER_SECRET: &str = "CHANGE_ME_NOW";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or insecure.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub admin_secret: String,
    pub admin_ui_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let admin_secret = require_env("ADMIN_SECRET")?;
        ensure!(
            !admin_secret.trim().is_empty() && admin_secret != PLACEHOLDER_SECRET,
            "ADMIN_SECRET is unset or still the insecure placeholder; \
             configure a real secret before starting"
        );

        Ok(Config {
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "/data/vip.sqlite".to_string()),
            admin_secret,
            admin_ui_dir: std::env::var("ADMIN_UI_DIR").unwrap_or_else(|_| "admin".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
