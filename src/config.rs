use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_database: String,
    /// CSV table with a `phone_code` column.
    pub country_codes_csv: PathBuf,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match var("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {v:?}"))?,
            None => 5000,
        };
        let mongo_uri = var("MONGO_URI").unwrap_or_else(|| "mongodb://mongodb:27017".into());
        let mongo_database = var("MONGO_DATABASE").unwrap_or_else(|| "user_db".into());
        let country_codes_csv = var("COUNTRY_CODES_CSV")
            .map(PathBuf::from)
            .context("COUNTRY_CODES_CSV must be set")?;
        let upload_dir = var("UPLOAD_DIR")
            .map(PathBuf::from)
            .context("UPLOAD_DIR must be set")?;
        let upload_max_bytes = var("UPLOAD_MAX_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10 * 1024 * 1024);

        Ok(Self {
            host,
            port,
            mongo_uri,
            mongo_database,
            country_codes_csv,
            upload_dir,
            upload_max_bytes,
        })
    }
}
