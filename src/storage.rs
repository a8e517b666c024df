use std::path::PathBuf;

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use tracing::debug;

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores `body` under `file_name` and returns the stored path. An existing file with the
    /// same name is replaced.
    async fn put_image(&self, file_name: &str, body: Bytes) -> anyhow::Result<String>;
}

/// Profile images kept in a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Creates the upload directory if it does not exist yet.
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create upload directory {}", root.display()))?;
        Ok(Self { root })
    }
}

#[async_trait]
impl ImageStorage for LocalStorage {
    async fn put_image(&self, file_name: &str, body: Bytes) -> anyhow::Result<String> {
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write image {}", path.display()))?;
        debug!(path = %path.display(), bytes = body.len(), "image stored");
        Ok(path.to_string_lossy().into_owned())
    }
}
