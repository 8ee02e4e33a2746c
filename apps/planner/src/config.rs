use anyhow::{bail, Context, Result};

/// Which catalog provider backs `/catalog` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Llm,
    Static,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub catalog_backend: CatalogBackend,
    /// Upper bound on concurrently open planning sessions.
    pub session_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_backend: parse_catalog_backend(
                &std::env::var("CATALOG_BACKEND").unwrap_or_else(|_| "llm".to_string()),
            )?,
            session_capacity: std::env::var("SESSION_CAPACITY")
                .unwrap_or_else(|_| "10000".to_string())
                .parse::<usize>()
                .context("SESSION_CAPACITY must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_catalog_backend(value: &str) -> Result<CatalogBackend> {
    match value.trim().to_lowercase().as_str() {
        "llm" => Ok(CatalogBackend::Llm),
        "static" => Ok(CatalogBackend::Static),
        other => bail!("CATALOG_BACKEND must be 'llm' or 'static', got '{other}'"),
    }
}
