// Flat-file persistence: each store is a JSON array in one file under the
// data directory. A per-store mutex serializes read-modify-write cycles so
// concurrent requests cannot drop each other's appends.

pub mod contacts;
pub mod orders;
pub mod profiles;

pub use contacts::ContactStore;
pub use orders::OrderStore;
pub use profiles::ProfileStore;

use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub(crate) struct JsonArrayFile {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonArrayFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!("store read error for {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn write<T: Serialize>(&self, items: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    pub(crate) async fn update<T, F, R>(&self, apply: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read()?;
        let out = apply(&mut items);
        self.write(&items)?;
        Ok(out)
    }

    pub(crate) async fn snapshot<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let file = JsonArrayFile::new(dir.path().join("nothing.json"));
        let items: Vec<serde_json::Value> = file.snapshot().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let file = JsonArrayFile::new(path);
        let items: Vec<serde_json::Value> = file.snapshot().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn update_persists_between_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("items.json");
        let file = JsonArrayFile::new(path.clone());
        file.update(|items: &mut Vec<serde_json::Value>| {
            items.push(serde_json::json!({"n": 1}));
        })
        .await
        .unwrap();

        let reopened = JsonArrayFile::new(path);
        let items: Vec<serde_json::Value> = reopened.snapshot().await.unwrap();
        assert_eq!(items.len(), 1);
    }
}
