use std::env;
use std::str::FromStr;

use crate::shared::constants::{
    DEFAULT_FEED_PAGE_SIZE, DEFAULT_HISTORY_DAYS, DEFAULT_UTC_OFFSET_MINUTES, MAX_FEED_PAGE_SIZE,
    MAX_HISTORY_DAYS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub feed: FeedConfig,
    pub dashboard: DashboardConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// S3-compatible object storage holding product images
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Endpoint URL (GCS interop, MinIO, AWS)
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Key prefix under which scraped product images live
    pub image_prefix: String,
    /// Lifetime of generated image links in seconds
    pub presigned_url_expiry_secs: u32,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: i64,
    /// Hide products that already collected this many reviews (unset = no cap)
    pub max_reviews_per_product: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Offset used to bucket reviews into calendar days
    pub utc_offset_minutes: i32,
    pub history_days: i64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Read `name`, falling back to `default` when unset, and parse it.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

fn required_var(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{} environment variable is required", name))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            feed: FeedConfig::from_env()?,
            dashboard: DashboardConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size =
            parse_var("MAX_REQUEST_BODY_SIZE", Self::DEFAULT_MAX_REQUEST_BODY_SIZE)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_PORT: u16 = 5432;
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = match env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => Self::compose_url(
                &required_var("DB_HOST")?,
                parse_var("DB_PORT", Self::DEFAULT_PORT)?,
                &required_var("DB_NAME")?,
                &required_var("DB_USER")?,
                &env::var("DB_PASSWORD").unwrap_or_default(),
            ),
        };

        Ok(Self {
            url,
            max_connections: parse_var("DB_CONNECTION_LIMIT", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }

    /// Build a postgres URL from discrete connection settings.
    /// User and password are percent-encoded.
    pub fn compose_url(host: &str, port: u16, name: &str, user: &str, password: &str) -> String {
        let user = urlencoding::encode(user);
        if password.is_empty() {
            format!("postgres://{}@{}:{}/{}", user, host, port, name)
        } else {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                user,
                urlencoding::encode(password),
                host,
                port,
                name
            )
        }
    }
}

impl StorageConfig {
    const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u32 = 7 * 24 * 60 * 60;

    pub fn from_env() -> Result<Self, String> {
        let endpoint = env::var("STORAGE_ENDPOINT")
            .unwrap_or_else(|_| "https://storage.googleapis.com".to_string());
        let region = env::var("STORAGE_REGION").unwrap_or_else(|_| "ap-south-1".to_string());
        let bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "alle-products".to_string());
        let access_key = required_var("STORAGE_ACCESS_KEY")?;
        let secret_key = required_var("STORAGE_SECRET_KEY")?;
        let image_prefix = env::var("STORAGE_IMAGE_PREFIX")
            .unwrap_or_else(|_| "scraped-assets/v3".to_string())
            .trim_matches('/')
            .to_string();

        let presigned_url_expiry_secs = parse_var(
            "STORAGE_PRESIGNED_URL_EXPIRY_SECS",
            Self::DEFAULT_PRESIGNED_URL_EXPIRY_SECS,
        )?;

        Ok(Self {
            endpoint,
            region,
            bucket,
            access_key,
            secret_key,
            image_prefix,
            presigned_url_expiry_secs,
        })
    }
}

impl FeedConfig {
    pub fn from_env() -> Result<Self, String> {
        let page_size = parse_var("FEED_PAGE_SIZE", DEFAULT_FEED_PAGE_SIZE)?;

        let max_reviews_per_product = match env::var("FEED_MAX_REVIEWS_PER_PRODUCT") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| "FEED_MAX_REVIEWS_PER_PRODUCT must be a valid number")?,
            ),
            _ => None,
        };

        Ok(Self {
            page_size,
            max_reviews_per_product,
        }
        .normalized())
    }

    /// Clamp page size into the supported range and drop non-positive caps
    pub fn normalized(self) -> Self {
        Self {
            page_size: self.page_size.clamp(1, MAX_FEED_PAGE_SIZE),
            max_reviews_per_product: self.max_reviews_per_product.filter(|cap| *cap > 0),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_FEED_PAGE_SIZE,
            max_reviews_per_product: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, String> {
        let utc_offset_minutes =
            parse_var("DASHBOARD_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?;
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err("DASHBOARD_UTC_OFFSET_MINUTES must be within +/- 1439".to_string());
        }

        let history_days =
            Self::check_history_days(parse_var("DASHBOARD_HISTORY_DAYS", DEFAULT_HISTORY_DAYS)?)?;

        Ok(Self {
            utc_offset_minutes,
            history_days,
        })
    }
}

impl DashboardConfig {
    /// Floor at one day, reject anything past `MAX_HISTORY_DAYS`
    fn check_history_days(days: i64) -> Result<i64, String> {
        if days > MAX_HISTORY_DAYS {
            return Err(format!(
                "DASHBOARD_HISTORY_DAYS must be at most {}",
                MAX_HISTORY_DAYS
            ));
        }
        Ok(days.max(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Review Desk API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Product review feed, submissions and dashboard".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
