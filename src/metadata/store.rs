use super::ModelMetadata;
use crate::{Error, Result};
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Process-wide model descriptor backed by a JSON record on disk.
///
/// Readers always see a whole snapshot: every write swaps in a new `Arc`
/// under the lock instead of editing fields in place. Persistence is
/// best-effort and never fails the caller.
pub struct MetadataStore {
    path: PathBuf,
    current: RwLock<Arc<ModelMetadata>>,
    // Serializes writers of the durable record
    persist_lock: Mutex<()>,
}

impl MetadataStore {
    /// Creates a store seeded with defaults, without touching disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(ModelMetadata::default())),
            persist_lock: Mutex::new(()),
        }
    }

    /// Creates a store and merges in the durable record, if any.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        store.load().await;
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory snapshot.
    pub fn get(&self) -> ModelMetadata {
        self.snapshot().as_ref().clone()
    }

    fn snapshot(&self) -> Arc<ModelMetadata> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Reads the durable record and overlays its keys onto the in-memory
    /// snapshot. Keys missing from the record keep their current value.
    /// Read or parse failures are logged and leave the snapshot untouched.
    pub async fn load(&self) -> ModelMetadata {
        match self.read_record().await {
            Ok(Some(record)) => match self.merge(record) {
                Ok(()) => info!("Model metadata loaded from {}", self.path.display()),
                Err(e) => warn!("Error loading model metadata: {}", e),
            },
            Ok(None) => debug!("No model metadata record at {}", self.path.display()),
            Err(e) => warn!("Error loading model metadata: {}", e),
        }
        self.get()
    }

    async fn read_record(&self) -> Result<Option<Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn merge(&self, record: Value) -> Result<()> {
        let Value::Object(overrides) = record else {
            return Err(Error::internal("metadata record is not a JSON object"));
        };

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let mut merged = serde_json::to_value(guard.as_ref())?;
        if let Value::Object(ref mut fields) = merged {
            fields.extend(overrides);
        }
        *guard = Arc::new(serde_json::from_value(merged)?);
        Ok(())
    }

    /// Writes the current snapshot to the durable record. Failures are
    /// logged and swallowed.
    pub async fn save(&self) {
        if let Err(e) = self.try_save().await {
            warn!("Error saving model metadata: {}", e);
        }
    }

    async fn try_save(&self) -> Result<()> {
        let _guard = self.persist_lock.lock().await;
        let body = serde_json::to_string_pretty(self.snapshot().as_ref())?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a crash never leaves a truncated record
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, body).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!("Model metadata saved to {}", self.path.display());
        Ok(())
    }

    /// Swaps in a whole new descriptor and persists it.
    pub async fn replace(&self, metadata: ModelMetadata) {
        {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            *guard = Arc::new(metadata);
        }
        self.save().await;
    }

    /// Applies `f` to a copy of the snapshot, swaps the result in and
    /// persists it. Returns the new snapshot.
    pub async fn update<F>(&self, f: F) -> ModelMetadata
    where
        F: FnOnce(&mut ModelMetadata),
    {
        let updated = {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            let mut next = guard.as_ref().clone();
            f(&mut next);
            *guard = Arc::new(next.clone());
            next
        };
        self.save().await;
        updated
    }
}
