use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret the session cookie signing key is derived from.
    pub secret_key: String,
    /// SQLite file holding the credential table.
    pub storage_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub secure_cookies: bool,
}

impl Config {
    /// Config with the given secret and database file, defaults for the rest.
    pub fn new(secret_key: impl Into<String>, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            secret_key: secret_key.into(),
            storage_path: storage_path.into(),
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            template_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            secure_cookies: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let secret_key = env::var("SECRET_KEY")
            .map_err(|_| AppError::config("SECRET_KEY must be set"))?;
        let storage_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "users.db".to_string());

        let mut config = Self::new(secret_key, storage_path);

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::config(format!("PORT must be a valid number, got {port:?}")))?;
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(dir) = env::var("TEMPLATE_DIR") {
            config.template_dir = dir.into();
        }
        if let Ok(dir) = env::var("STATIC_DIR") {
            config.static_dir = dir.into();
        }
        if let Ok(value) = env::var("SECURE_COOKIES") {
            config.secure_cookies = parse_flag("SECURE_COOKIES", &value)?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    // Smart RUST_LOG construction for Axum and tracing
    pub fn rust_log(&self) -> String {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };
        format!("{level},axum={level},tower_http={level},sqlx=warn,disastermap={level}")
    }
}

/// `true`/`false` in any case, or `1`/`0`. Anything else is a config error.
fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AppError::config(format!("{name} must be true or false, got {value:?}"))),
    }
}
