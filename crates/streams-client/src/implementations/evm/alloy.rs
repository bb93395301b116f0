//! Alloy-backed EVM client implementation.
//!
//! Holds a read provider and, when a signing key is available, a write
//! provider whose wallet signs submissions. Both share the network's RPC
//! endpoint and a retry layer for transient transport failures.

use crate::{ChainClient, ClientError};
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{
	fillers::{ChainIdFiller, GasFiller, NonceFiller, SimpleNonceManager},
	DynProvider, PendingTransactionConfig, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use std::time::Duration;
use streams_types::{ChainDescriptor, Log, Transaction, TransactionReceipt};

/// Alloy-based client bound to a single EVM network.
pub struct EvmClient {
	chain: ChainDescriptor,
	read_provider: DynProvider,
	write_provider: Option<DynProvider>,
	account: Address,
}

fn retry_client(url: &str, chain_id: u64) -> Result<RpcClient, ClientError> {
	let url = url.parse().map_err(|e| {
		ClientError::Network(format!("Invalid RPC URL for chain {}: {}", chain_id, e))
	})?;

	// Retry transient network errors and rate limits at the transport layer;
	// the pipeline itself never retries.
	let retry_layer = RetryBackoffLayer::new(
		5,    // max_retry: retry up to 5 times
		1000, // backoff: initial backoff in milliseconds
		10,   // cups: compute units per second
	);

	Ok(RpcClient::builder().layer(retry_layer).http(url))
}

impl EvmClient {
	/// Connects a client to a network.
	///
	/// With a signer present the client can submit transactions; without one
	/// it is read-only and reports the zero account sentinel.
	pub fn connect(
		chain: ChainDescriptor,
		signer: Option<PrivateKeySigner>,
	) -> Result<Self, ClientError> {
		let http_url = chain
			.rpc_url()
			.ok_or_else(|| {
				ClientError::Network(format!("No RPC URL configured for chain {}", chain.id))
			})?
			.to_string();

		let read_provider = ProviderBuilder::new()
			.connect_client(retry_client(&http_url, chain.id)?)
			.erased();

		let (write_provider, account) = match signer {
			Some(signer) => {
				let chain_signer = signer.with_chain_id(Some(chain.id));
				let account = chain_signer.address();
				let wallet = EthereumWallet::from(chain_signer);

				let provider = ProviderBuilder::new()
					.filler(NonceFiller::new(SimpleNonceManager::default()))
					.filler(GasFiller)
					.filler(ChainIdFiller::default())
					.wallet(wallet)
					.connect_client(retry_client(&http_url, chain.id)?);

				provider.client().set_poll_interval(Duration::from_secs(7));

				(Some(provider.erased()), account)
			},
			None => (None, Address::ZERO),
		};

		Ok(Self {
			chain,
			read_provider,
			write_provider,
			account,
		})
	}

	fn request_from(&self, tx: &Transaction) -> TransactionRequest {
		let mut request: TransactionRequest = tx.clone().into();
		request.from = Some(self.account);
		request
	}
}

#[async_trait]
impl ChainClient for EvmClient {
	fn chain(&self) -> &ChainDescriptor {
		&self.chain
	}

	fn account(&self) -> Address {
		self.account
	}

	async fn estimate_gas(&self, tx: &Transaction) -> Result<u64, ClientError> {
		self.read_provider
			.estimate_gas(self.request_from(tx))
			.await
			.map_err(|e| ClientError::Network(format!("Failed to estimate gas: {}", e)))
	}

	async fn call(&self, tx: &Transaction) -> Result<Bytes, ClientError> {
		self.read_provider
			.call(self.request_from(tx))
			.await
			.map_err(|e| ClientError::Network(format!("Failed to execute call: {}", e)))
	}

	async fn send_transaction(&self, tx: &Transaction) -> Result<B256, ClientError> {
		let provider = self
			.write_provider
			.as_ref()
			.ok_or(ClientError::NoSigningKey)?;

		let request: TransactionRequest = tx.clone().into();
		tracing::debug!(
			chain_id = tx.chain_id,
			to = %tx.to,
			data_len = tx.data.len(),
			gas_limit = ?tx.gas_limit,
			"Sending transaction"
		);

		let pending_tx = provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id = tx.chain_id, "Transaction submission failed: {}", e);
			ClientError::Network(format!("Failed to send transaction: {}", e))
		})?;

		Ok(*pending_tx.tx_hash())
	}

	async fn wait_for_confirmation(
		&self,
		hash: B256,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, ClientError> {
		tracing::info!(
			tx_hash = %hash,
			confirmations,
			timeout_secs = timeout.as_secs(),
			"Waiting for confirmation"
		);

		let wait = async {
			let config =
				PendingTransactionConfig::new(hash).with_required_confirmations(confirmations);

			let pending_tx = self
				.read_provider
				.watch_pending_transaction(config)
				.await
				.map_err(|e| {
					ClientError::Network(format!("Failed to watch transaction: {}", e))
				})?;

			pending_tx
				.await
				.map_err(|e| ClientError::Network(format!("Failed to confirm transaction: {}", e)))
		};

		let confirmed_hash = tokio::time::timeout(timeout, wait)
			.await
			.map_err(|_| ClientError::ConfirmationTimeout(timeout.as_secs()))??;

		match self
			.read_provider
			.get_transaction_receipt(confirmed_hash)
			.await
		{
			Ok(Some(receipt)) => {
				let logs = receipt
					.inner
					.logs()
					.iter()
					.map(|log| Log {
						address: log.address(),
						topics: log.topics().to_vec(),
						data: log.inner.data.data.to_vec(),
					})
					.collect();

				Ok(TransactionReceipt {
					hash: receipt.transaction_hash,
					block_number: receipt.block_number.unwrap_or(0),
					success: receipt.status(),
					logs,
				})
			},
			Ok(None) => Err(ClientError::Network(format!(
				"Transaction {} not found on chain {}",
				hash, self.chain.id
			))),
			Err(e) => Err(ClientError::Network(format!(
				"Failed to get receipt: {}",
				e
			))),
		}
	}

	async fn native_balance(&self, address: Address) -> Result<U256, ClientError> {
		self.read_provider
			.get_balance(address)
			.await
			.map_err(|e| ClientError::Network(format!("Failed to get balance: {}", e)))
	}
}
