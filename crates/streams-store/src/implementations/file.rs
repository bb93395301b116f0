//! File-backed settings backend.
//!
//! Persists all settings as a single JSON document on disk, rewritten on
//! every mutation. Suitable for a single operator process; writes are
//! serialized through an exclusive lock.

use crate::{KeyValueStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// File-backed settings store.
pub struct FileStore {
	path: PathBuf,
	store: RwLock<HashMap<String, String>>,
}

impl FileStore {
	/// Opens a file store, loading any existing settings document.
	///
	/// A missing file starts empty; it is created on the first write.
	pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
		let path = path.as_ref().to_path_buf();
		let store = match tokio::fs::read(&path).await {
			Ok(contents) => serde_json::from_slice(&contents)
				.map_err(|e| StoreError::Serialization(format!("Invalid settings file: {}", e)))?,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
			Err(error) => {
				return Err(StoreError::Backend(format!(
					"Failed to read settings file: {}",
					error
				)))
			},
		};

		Ok(Self {
			path,
			store: RwLock::new(store),
		})
	}

	async fn persist(&self, store: &HashMap<String, String>) -> Result<(), StoreError> {
		let contents = serde_json::to_vec_pretty(store)
			.map_err(|e| StoreError::Serialization(e.to_string()))?;
		tokio::fs::write(&self.path, contents)
			.await
			.map_err(|e| StoreError::Backend(format!("Failed to write settings file: {}", e)))
	}
}

#[async_trait]
impl KeyValueStore for FileStore {
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		let store = self.store.read().await;
		Ok(store.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value.to_string());
		self.persist(&store).await
	}

	async fn remove(&self, key: &str) -> Result<(), StoreError> {
		let mut store = self.store.write().await;
		store.remove(key);
		self.persist(&store).await
	}

	async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
		let store = self.store.read().await;
		Ok(store
			.keys()
			.filter(|key| key.starts_with(prefix))
			.cloned()
			.collect())
	}
}
