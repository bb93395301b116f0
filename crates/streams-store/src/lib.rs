//! Settings storage module for the streams verifier.
//!
//! This module provides the external configuration store the pipeline reads on
//! every run: the active chain id, the operator's gas cap, the target contract
//! address for arbitrary calls, and verifier address overrides per network.
//! Backends implement a small asynchronous key-value interface; lookups carry
//! no transactional guarantee across multiple calls in one pipeline run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod file;
	pub mod memory;
}

pub use implementations::file::FileStore;
pub use implementations::memory::MemoryStore;

/// Errors that can occur during settings storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
}

/// Trait defining the low-level interface for settings backends.
///
/// Backends provide plain string key-value operations. All typed access goes
/// through [`SettingsStore`], which owns the key layout.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
	/// Retrieves the value stored under `key`, if any.
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Stores `value` under `key`, replacing any previous value.
	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Removes the value stored under `key`, if any.
	async fn remove(&self, key: &str) -> Result<(), StoreError>;

	/// Lists all keys starting with `prefix`.
	async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

const KEY_CHAIN_ID: &str = "settings:chain_id";
const KEY_CONTRACT_ADDRESS: &str = "settings:contract_address";
const KEY_GAS_CAP: &str = "settings:gas_cap";
const PREFIX_EVM_VERIFIER: &str = "verifiers:evm:";
const PREFIX_SOLANA_VERIFIER: &str = "verifiers:solana:";

/// A verifier program deployment on the alternate ledger family, stored as a
/// JSON document per cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SolanaVerifier {
	pub verifier_program_id: String,
	pub access_controller_account: String,
}

/// Typed facade over a settings backend.
///
/// Values are read fresh on every call; the pipeline snapshots what it needs
/// at the start of a run rather than re-querying mid-flight.
#[derive(Clone)]
pub struct SettingsStore {
	backend: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
	/// Creates a settings store over the given backend.
	pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
		Self { backend }
	}

	/// The currently selected chain id, if one is stored and well-formed.
	pub async fn get_chain_id(&self) -> Result<Option<u64>, StoreError> {
		let raw = self.backend.get(KEY_CHAIN_ID).await?;
		Ok(raw.and_then(|value| match value.parse::<u64>() {
			Ok(id) => Some(id),
			Err(_) => {
				tracing::warn!(%value, "Stored chain id is not a number");
				None
			},
		}))
	}

	/// Selects the active chain.
	pub async fn set_chain_id(&self, chain_id: u64) -> Result<(), StoreError> {
		self.backend.set(KEY_CHAIN_ID, &chain_id.to_string()).await
	}

	/// Clears the active chain selection.
	pub async fn clear_chain_id(&self) -> Result<(), StoreError> {
		self.backend.remove(KEY_CHAIN_ID).await
	}

	/// The target contract address for arbitrary contract execution.
	pub async fn get_contract_address(&self) -> Result<Option<String>, StoreError> {
		self.backend.get(KEY_CONTRACT_ADDRESS).await
	}

	/// Sets the target contract address for arbitrary contract execution.
	pub async fn set_contract_address(&self, address: &str) -> Result<(), StoreError> {
		self.backend.set(KEY_CONTRACT_ADDRESS, address).await
	}

	/// The configured gas ceiling in absolute gas units; `None` means
	/// unlimited. A stored cap of zero is a real (total) cap.
	pub async fn get_gas_cap(&self) -> Result<Option<u64>, StoreError> {
		let raw = self.backend.get(KEY_GAS_CAP).await?;
		Ok(raw.and_then(|value| match value.parse::<u64>() {
			Ok(cap) => Some(cap),
			Err(_) => {
				tracing::warn!(%value, "Stored gas cap is not a number");
				None
			},
		}))
	}

	/// Sets the gas ceiling.
	pub async fn set_gas_cap(&self, gas_cap: u64) -> Result<(), StoreError> {
		self.backend.set(KEY_GAS_CAP, &gas_cap.to_string()).await
	}

	/// Removes the gas ceiling.
	pub async fn clear_gas_cap(&self) -> Result<(), StoreError> {
		self.backend.remove(KEY_GAS_CAP).await
	}

	/// The custom verifier address override for an EVM chain, if any.
	pub async fn get_evm_verifier(&self, chain_id: u64) -> Result<Option<String>, StoreError> {
		self.backend
			.get(&format!("{}{}", PREFIX_EVM_VERIFIER, chain_id))
			.await
	}

	/// Stores a custom verifier address for an EVM chain.
	pub async fn set_evm_verifier(&self, chain_id: u64, address: &str) -> Result<(), StoreError> {
		self.backend
			.set(&format!("{}{}", PREFIX_EVM_VERIFIER, chain_id), address)
			.await
	}

	/// Removes the custom verifier address for an EVM chain.
	pub async fn remove_evm_verifier(&self, chain_id: u64) -> Result<(), StoreError> {
		self.backend
			.remove(&format!("{}{}", PREFIX_EVM_VERIFIER, chain_id))
			.await
	}

	/// Chain ids that have a custom EVM verifier stored.
	pub async fn evm_verifier_chains(&self) -> Result<Vec<u64>, StoreError> {
		let keys = self.backend.keys(PREFIX_EVM_VERIFIER).await?;
		Ok(keys
			.iter()
			.filter_map(|key| key.strip_prefix(PREFIX_EVM_VERIFIER))
			.filter_map(|id| id.parse::<u64>().ok())
			.collect())
	}

	/// The custom verifier program override for a Solana cluster, if any.
	///
	/// A stored document that fails to parse is treated as absent.
	pub async fn get_solana_verifier(
		&self,
		cluster: &str,
	) -> Result<Option<SolanaVerifier>, StoreError> {
		let raw = self
			.backend
			.get(&format!("{}{}", PREFIX_SOLANA_VERIFIER, cluster))
			.await?;
		Ok(raw.and_then(|value| match serde_json::from_str(&value) {
			Ok(verifier) => Some(verifier),
			Err(error) => {
				tracing::warn!(cluster, %error, "Stored Solana verifier is malformed");
				None
			},
		}))
	}

	/// Stores a custom verifier program for a Solana cluster.
	pub async fn set_solana_verifier(
		&self,
		cluster: &str,
		verifier: &SolanaVerifier,
	) -> Result<(), StoreError> {
		let value = serde_json::to_string(verifier)
			.map_err(|e| StoreError::Serialization(e.to_string()))?;
		self.backend
			.set(&format!("{}{}", PREFIX_SOLANA_VERIFIER, cluster), &value)
			.await
	}

	/// Removes the custom verifier program for a Solana cluster.
	pub async fn remove_solana_verifier(&self, cluster: &str) -> Result<(), StoreError> {
		self.backend
			.remove(&format!("{}{}", PREFIX_SOLANA_VERIFIER, cluster))
			.await
	}

	/// Clusters that have a custom Solana verifier stored.
	pub async fn solana_verifier_clusters(&self) -> Result<Vec<String>, StoreError> {
		let keys = self.backend.keys(PREFIX_SOLANA_VERIFIER).await?;
		Ok(keys
			.iter()
			.filter_map(|key| key.strip_prefix(PREFIX_SOLANA_VERIFIER))
			.map(str::to_string)
			.collect())
	}
}
