/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth / Upload 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - JWT_SECRET だけは起動時に必須にしない (未設定なら request 単位で SERVER_MISCONFIG)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_UPLOAD_ALLOWED_TYPES: &str = "image/png,image/jpeg,image/webp";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,

    pub jwt_secret: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub strict_actor_linkage: bool,

    pub upload_max_bytes: usize,
    pub upload_allowed_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            split_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECONDS") {
            Ok(v) => v
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let strict_actor_linkage = match std::env::var("AUTH_STRICT_ACTOR_LINKAGE") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("AUTH_STRICT_ACTOR_LINKAGE"))?,
            Err(_) => false,
        };

        let upload_max_bytes = match std::env::var("UPLOAD_MAX_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("UPLOAD_MAX_BYTES"))?,
            Err(_) => DEFAULT_UPLOAD_MAX_BYTES,
        };

        let upload_allowed_types = split_list(
            &std::env::var("UPLOAD_ALLOWED_TYPES")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_ALLOWED_TYPES.to_string()),
        )
        .into_iter()
        .map(|s| s.to_ascii_lowercase())
        .collect::<Vec<_>>();

        if upload_allowed_types.is_empty() {
            return Err(ConfigError::Invalid("UPLOAD_ALLOWED_TYPES"));
        }

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            request_timeout,
            jwt_secret,
            access_token_leeway_seconds,
            strict_actor_linkage,
            upload_max_bytes,
            upload_allowed_types,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
