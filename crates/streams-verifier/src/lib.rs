//! Report verification pipeline for the streams verifier.
//!
//! This crate orchestrates the core flow: resolve the active chain and its
//! clients, resolve the verifier and auxiliary contract addresses, decode the
//! signed report, and run the gas-capped approve-then-verify transaction
//! protocol. Mutable operator configuration is snapshotted once per run; gas
//! cap aborts are outcomes, not errors.

/// Pipeline configuration loaded at process start.
pub mod config;
/// Per-run configuration snapshot.
pub mod context;
/// On-chain contract interfaces.
pub mod contracts;
/// Pipeline error taxonomy.
pub mod error;
/// Operator-configured contract execution.
pub mod execute;
/// The gas-capped transaction protocol.
pub mod executor;
/// Read-only balance and chain inspectors.
pub mod inspect;
/// Verifier and contract address resolution.
pub mod resolver;
/// Report verification orchestration.
pub mod verify;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{ConfigError, PipelineConfig};
pub use context::PipelineContext;
pub use error::VerifyError;
pub use execute::{ContractCallSpec, ExecuteOutcome};
pub use executor::{exceeded_gas_cap, execute_gas_capped, TxOutcome};
pub use inspect::{BalanceView, ChainIdentity};
pub use resolver::{
	list_evm_verifiers, list_solana_verifiers, resolve_contract_addresses, resolve_evm_verifier,
	resolve_solana_verifier, ContractAddressSet, EvmVerifierEntry, SolanaVerifierEntry,
};
pub use verify::{TxLeg, VerifyOutcome};

use alloy_primitives::Address;
use std::sync::Arc;
use streams_account::OperatorAccount;
use streams_client::{resolve_client, ChainClient, EvmClient};
use streams_store::SettingsStore;
use streams_types::{ReportV3, StreamReport};

/// The operator-facing verification service.
///
/// Each call resolves its own clients and snapshots the operator settings it
/// depends on; nothing is cached across calls, so two concurrent runs are
/// independent.
pub struct ReportVerifier {
	store: SettingsStore,
	account: Arc<OperatorAccount>,
	config: PipelineConfig,
}

impl ReportVerifier {
	/// Creates a verification service.
	pub fn new(store: SettingsStore, account: Arc<OperatorAccount>, config: PipelineConfig) -> Self {
		Self {
			store,
			account,
			config,
		}
	}

	/// The settings store this service reads from.
	pub fn store(&self) -> &SettingsStore {
		&self.store
	}

	async fn prepare(&self) -> Result<(EvmClient, PipelineContext), VerifyError> {
		let client = resolve_client(&self.store, &self.account).await?;
		let ctx = PipelineContext {
			chain: client.chain().clone(),
			account: client.account(),
			gas_cap: self.store.get_gas_cap().await?,
			min_confirmations: self.config.min_confirmations,
			confirmation_timeout: self.config.confirmation_timeout(),
		};
		Ok((client, ctx))
	}

	/// Verifies a signed report on the active chain.
	pub async fn verify_report(
		&self,
		report: &StreamReport,
	) -> Result<VerifyOutcome, VerifyError> {
		let (client, ctx) = self.prepare().await?;
		let addresses = resolve_contract_addresses(&client, &self.store).await;
		verify::verify_report(&client, &ctx, &addresses, report).await
	}

	/// Executes the operator-configured contract call with a report's values.
	pub async fn execute_contract(
		&self,
		report: &ReportV3,
		call: &ContractCallSpec,
	) -> Result<ExecuteOutcome, VerifyError> {
		let (client, ctx) = self.prepare().await?;

		let target = self
			.store
			.get_contract_address()
			.await?
			.ok_or(VerifyError::ConfigurationMissing("contract address"))?;
		let target: Address = target
			.parse()
			.map_err(|_| VerifyError::InvalidAddress(target))?;

		execute::execute_contract(&client, &ctx, report, target, call).await
	}

	/// Resolves the contract address set for the active chain.
	///
	/// Yields the degenerate all-zero set when any prerequisite is missing.
	pub async fn contract_addresses(&self) -> ContractAddressSet {
		match resolve_client(&self.store, &self.account).await {
			Ok(client) => resolve_contract_addresses(&client, &self.store).await,
			Err(error) => {
				tracing::warn!(%error, "Invalid clients");
				ContractAddressSet::default()
			},
		}
	}

	/// The operator account's native balance on the active chain.
	pub async fn native_balance(&self) -> BalanceView {
		match resolve_client(&self.store, &self.account).await {
			Ok(client) => inspect::native_balance(&client).await,
			Err(error) => {
				tracing::warn!(%error, "Invalid clients");
				BalanceView::zero()
			},
		}
	}

	/// The operator account's fee token balance on the active chain.
	pub async fn fee_token_balance(&self) -> BalanceView {
		match resolve_client(&self.store, &self.account).await {
			Ok(client) => {
				let addresses = resolve_contract_addresses(&client, &self.store).await;
				inspect::fee_token_balance(&client, &addresses).await
			},
			Err(error) => {
				tracing::warn!(%error, "Invalid clients");
				BalanceView::zero()
			},
		}
	}

	/// The active chain's identity, if one is resolvable.
	pub async fn current_chain(&self) -> Option<ChainIdentity> {
		match resolve_client(&self.store, &self.account).await {
			Ok(client) => Some(inspect::current_chain(&client)),
			Err(error) => {
				tracing::warn!(%error, "Invalid clients");
				None
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use streams_client::ClientError;
	use streams_store::MemoryStore;
	use streams_types::SecretString;

	fn service(account: OperatorAccount) -> ReportVerifier {
		ReportVerifier::new(
			SettingsStore::new(Arc::new(MemoryStore::new())),
			Arc::new(account),
			PipelineConfig::default(),
		)
	}

	fn signing_account() -> OperatorAccount {
		OperatorAccount::new(&SecretString::from(
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		))
		.unwrap()
	}

	fn sample_report() -> StreamReport {
		StreamReport {
			feed_id: alloy_primitives::B256::ZERO,
			observations_timestamp: 0,
			raw_report: alloy_primitives::Bytes::new(),
		}
	}

	#[tokio::test]
	async fn test_verify_report_without_chain_selection() {
		let verifier = service(signing_account());
		let result = verifier.verify_report(&sample_report()).await;
		assert!(matches!(
			result,
			Err(VerifyError::Client(ClientError::NoChainSelected))
		));
	}

	#[tokio::test]
	async fn test_execute_contract_without_target_address() {
		let verifier = service(signing_account());
		verifier.store().set_chain_id(42161).await.unwrap();

		let report = streams_types::ReportV3 {
			feed_id: alloy_primitives::B256::ZERO,
			valid_from_timestamp: 0,
			observations_timestamp: 0,
			native_fee: alloy_primitives::aliases::U192::ZERO,
			link_fee: alloy_primitives::aliases::U192::ZERO,
			expires_at: 0,
			price: alloy_primitives::aliases::I192::ZERO,
			bid: alloy_primitives::aliases::I192::ZERO,
			ask: alloy_primitives::aliases::I192::ZERO,
		};
		let call = ContractCallSpec {
			abi: "[]".to_string(),
			function: "f".to_string(),
			args: vec!["price".to_string()],
		};

		let result = verifier.execute_contract(&report, &call).await;
		assert!(matches!(
			result,
			Err(VerifyError::ConfigurationMissing("contract address"))
		));
	}

	#[tokio::test]
	async fn test_inspectors_degrade_without_chain_selection() {
		let verifier = service(OperatorAccount::read_only());

		assert_eq!(verifier.native_balance().await, BalanceView::zero());
		assert_eq!(verifier.fee_token_balance().await, BalanceView::zero());
		assert_eq!(verifier.current_chain().await, None);
		assert_eq!(
			verifier.contract_addresses().await,
			ContractAddressSet::default()
		);
	}
}
