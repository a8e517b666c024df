use crate::config::AppConfig;
use crate::countries::CountryCodes;
use crate::storage::{ImageStorage, LocalStorage};
use crate::users::repo::{MongoUserStore, UserStore};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub storage: Arc<dyn ImageStorage>,
    pub countries: Arc<CountryCodes>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let countries = CountryCodes::from_path(&config.country_codes_csv)?;
        info!(
            path = %config.country_codes_csv.display(),
            codes = countries.len(),
            "country codes loaded"
        );

        let storage = Arc::new(LocalStorage::new(&config.upload_dir).await?) as Arc<dyn ImageStorage>;

        let users = Arc::new(
            MongoUserStore::connect(&config.mongo_uri, &config.mongo_database).await?,
        ) as Arc<dyn UserStore>;

        Ok(Self {
            config,
            users,
            storage,
            countries: Arc::new(countries),
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use axum::async_trait;
        use bytes::Bytes;

        use crate::users::memory::MemoryUserStore;

        struct FakeStorage;
        #[async_trait]
        impl ImageStorage for FakeStorage {
            async fn put_image(&self, file_name: &str, _body: Bytes) -> anyhow::Result<String> {
                Ok(format!("uploads/{}", file_name))
            }
        }

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            mongo_uri: "mongodb://localhost:27017".into(),
            mongo_database: "test".into(),
            country_codes_csv: "countries.csv".into(),
            upload_dir: "uploads".into(),
            upload_max_bytes: 1024 * 1024,
        });

        Self {
            config,
            users: Arc::new(MemoryUserStore::default()),
            storage: Arc::new(FakeStorage),
            countries: Arc::new(["57", "34", "1"].into_iter().collect()),
        }
    }
}
