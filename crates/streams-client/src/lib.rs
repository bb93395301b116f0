//! Chain client module for the streams verifier.
//!
//! This module defines the interface the pipeline uses to talk to a network:
//! gas estimation, read-only calls, signed submission, and confirmation
//! waiting. The production implementation is backed by Alloy providers; the
//! pipeline only ever sees the trait, which keeps the transaction protocol
//! testable without a network.

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use std::time::Duration;
use streams_store::StoreError;
use streams_types::{ChainDescriptor, Transaction, TransactionReceipt};
use thiserror::Error;

/// Client factory resolving the active chain from the settings store.
pub mod factory;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use factory::resolve_client;
pub use implementations::evm::alloy::EvmClient;

/// Errors that can occur during chain client operations.
#[derive(Debug, Error)]
pub enum ClientError {
	/// No chain is selected in the settings store.
	#[error("No chain selected")]
	NoChainSelected,
	/// The stored chain id does not match any supported network.
	#[error("Unknown chain id: {0}")]
	UnknownChain(u64),
	/// The operation requires signing capability but none is available.
	#[error("No signing key available")]
	NoSigningKey,
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The confirmation wait elapsed before the transaction was included.
	#[error("Confirmation timed out after {0}s")]
	ConfirmationTimeout(u64),
	/// Error reading the settings store while resolving the client.
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

/// Trait defining the interface for chain clients.
///
/// A client is bound to one network and one operator identity. Read
/// operations work without a signing key; `send_transaction` fails with
/// [`ClientError::NoSigningKey`] on a degraded account.
#[async_trait]
pub trait ChainClient: Send + Sync {
	/// The network this client is bound to.
	fn chain(&self) -> &ChainDescriptor;

	/// The operator account address (zero sentinel when degraded).
	fn account(&self) -> Address;

	/// Estimates gas units for a transaction without submitting it.
	async fn estimate_gas(&self, tx: &Transaction) -> Result<u64, ClientError>;

	/// Executes a contract call without sending a transaction.
	///
	/// Used both for plain reads and for simulating a submission against
	/// current chain state.
	async fn call(&self, tx: &Transaction) -> Result<Bytes, ClientError>;

	/// Signs and broadcasts a transaction, returning its hash.
	async fn send_transaction(&self, tx: &Transaction) -> Result<B256, ClientError>;

	/// Waits until the network reports inclusion, bounded by `timeout`.
	async fn wait_for_confirmation(
		&self,
		hash: B256,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, ClientError>;

	/// Native currency balance of an address.
	async fn native_balance(&self, address: Address) -> Result<U256, ClientError>;
}
