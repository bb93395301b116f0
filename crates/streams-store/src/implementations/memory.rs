//! In-memory settings backend.
//!
//! Stores settings in a map behind a read-write lock. Data is lost on
//! restart; intended for tests and development.

use crate::{KeyValueStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory settings store.
pub struct MemoryStore {
	store: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
	/// Creates a new empty MemoryStore.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl KeyValueStore for MemoryStore {
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		let store = self.store.read().await;
		Ok(store.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value.to_string());
		Ok(())
	}

	async fn remove(&self, key: &str) -> Result<(), StoreError> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
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

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_get_set_remove() {
		let store = MemoryStore::new();
		assert_eq!(store.get("a").await.unwrap(), None);

		store.set("a", "1").await.unwrap();
		assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));

		store.set("a", "2").await.unwrap();
		assert_eq!(store.get("a").await.unwrap(), Some("2".to_string()));

		store.remove("a").await.unwrap();
		assert_eq!(store.get("a").await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_keys_by_prefix() {
		let store = MemoryStore::new();
		store.set("x:1", "a").await.unwrap();
		store.set("x:2", "b").await.unwrap();
		store.set("y:1", "c").await.unwrap();

		let mut keys = store.keys("x:").await.unwrap();
		keys.sort();
		assert_eq!(keys, vec!["x:1".to_string(), "x:2".to_string()]);
	}

	#[tokio::test]
	async fn test_remove_missing_key_is_ok() {
		let store = MemoryStore::new();
		assert!(store.remove("missing").await.is_ok());
	}
}
