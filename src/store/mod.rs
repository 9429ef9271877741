//! Flat-file document store. The whole dataset is one JSON document held
//! behind a `tokio::sync::RwLock`; mutations run under the write lock and
//! persist the document atomically (temp file + rename) before the lock is
//! released, so updates are serialized and a crash can never leave a
//! half-written file behind.

use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::ApiError;

mod records;
pub use records::{AdminMessage, Database, Rating, SwapRequest, SwapStatus, User};

pub struct JsonStore {
    path: Option<PathBuf>,
    inner: RwLock<Database>,
}

impl JsonStore {
    /// Open (or initialize) the data file at `path`.
    pub async fn open(path: PathBuf) -> anyhow::Result<Self> {
        let db = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse data file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found, starting empty");
                Database::default()
            }
            Err(e) => return Err(e).with_context(|| format!("read data file {}", path.display())),
        };
        let store = Self {
            path: Some(path),
            inner: RwLock::new(db),
        };
        // Make sure the file exists with the expected layout from the start.
        store.persist(&*store.inner.read().await).await?;
        Ok(store)
    }

    /// Store without a backing file; used in tests.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: RwLock::new(Database::default()),
        }
    }

    /// Run a closure over a shared snapshot of the document.
    pub async fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> T {
        let db = self.inner.read().await;
        f(&db)
    }

    /// Run a mutating closure under the write lock and persist on success.
    /// The closure works on a draft copy which is committed only after the
    /// persist succeeds, so every operation is all-or-nothing. Holding the
    /// lock across the persist serializes writers, so two concurrent updates
    /// can never clobber each other.
    pub async fn update<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut db = self.inner.write().await;
        let mut draft = db.clone();
        let out = f(&mut draft)?;
        self.persist(&draft).await?;
        *db = draft;
        Ok(out)
    }

    async fn persist(&self, db: &Database) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(db).context("serialize data document")?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "document persisted");
        Ok(())
    }
}
