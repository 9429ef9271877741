use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{LocalStorage, StorageClient};
use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(JsonStore::open(config.data_file.clone()).await?);
        let storage = Arc::new(LocalStorage::new(config.uploads_dir.clone()).await?)
            as Arc<dyn StorageClient>;
        Ok(Self {
            store,
            config,
            storage,
        })
    }

    /// In-memory state for tests: no data file, no upload directory.
    pub fn fake() -> Self {
        use axum::async_trait;
        use bytes::Bytes;

        struct FakeStorage;
        #[async_trait]
        impl StorageClient for FakeStorage {
            async fn put_object(&self, _key: &str, _body: Bytes) -> anyhow::Result<()> {
                Ok(())
            }
            async fn delete_object(&self, _key: &str) -> anyhow::Result<()> {
                Ok(())
            }
            fn public_url(&self, key: &str) -> String {
                format!("/uploads/{}", key)
            }
        }

        let config = Arc::new(AppConfig {
            data_file: "data.json".into(),
            uploads_dir: "uploads".into(),
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_hours: 24,
            },
            policy: crate::config::PolicyConfig {
                swap_recipient_only: false,
                enforce_ban: true,
            },
        });

        Self {
            store: Arc::new(JsonStore::in_memory()),
            config,
            storage: Arc::new(FakeStorage) as Arc<dyn StorageClient>,
        }
    }
}
