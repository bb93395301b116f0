//! Verifier and auxiliary contract address resolution.
//!
//! A verifier deployment is looked up per chain: a custom override stored by
//! the operator wins when it is syntactically valid, otherwise the built-in
//! default table applies. The remaining addresses (fee manager, reward
//! manager, fee token) are derived from the verifier proxy through two
//! dependent on-chain reads and are recomputed on demand, never cached.

use crate::contracts::{read_call, IFeeManager, IVerifierProxy};
use crate::error::VerifyError;
use alloy_primitives::{address, Address};
use serde::Serialize;
use streams_client::ChainClient;
use streams_store::{SettingsStore, SolanaVerifier, StoreError};

const DEFAULT_EVM_VERIFIERS: &[(u64, Address)] = &[
	(10, address!("EBA4789A88C89C18f4657ffBF47B13A3abC7EB8D")),
	(109, address!("BE9f07f73de2412A9d0Ed64C42De7d9A10C9F28C")),
	(146, address!("fBFff08fE4169853F7B1b5Ac67eC10dc8806801d")),
	(157, address!("c44eb6c00A0F89D044279cD91Bdfd5f62f752Da3")),
	(204, address!("7D543D1a715ED544f7e3Ae9e3b1777BCdA56bF8e")),
	(480, address!("65eaE24251C5707D5aCBF7461A49fe87CB1bE4c7")),
	(1946, address!("26603bAC5CE09DAE5604700B384658AcA13AD6ae")),
	(4801, address!("2482A390bE58b3cBB6Df72dB2e950Db20256e55E")),
	(5611, address!("001225Aca0efe49Dbb48233aB83a9b4d177b581A")),
	(8453, address!("DE1A28D87Afd0f546505B28AB50410A5c3a7387a")),
	(42161, address!("478Aa2aC9F6D65F84e09D9185d126c3a17c2a93C")),
	(43113, address!("2bf612C65f5a4d388E687948bb2CF842FFb8aBB3")),
	(43114, address!("79BAa65505C6682F16F9b2C7F8afEBb1821BE3f6")),
	(84532, address!("8Ac491b7c118a0cdcF048e0f707247fD8C9575f9")),
	(421614, address!("2ff010DEbC1297f19579B4246cad07bd24F2488A")),
	(534351, address!("E17A7C6A7c2eF0Cb859578aa1605f8Bc2434A365")),
	(534352, address!("37e550C9b35DB56F9c943126F1c2642fcbDF7B51")),
	(11155420, address!("5f64394a2Ab3AcE9eCC071568Fc552489a8de7AF")),
	(64165, address!("fBFff08fE4169853F7B1b5Ac67eC10dc8806801d")),
];

/// The built-in verifier proxy deployment for an EVM chain, if any.
pub fn default_evm_verifier(chain_id: u64) -> Option<Address> {
	DEFAULT_EVM_VERIFIERS
		.iter()
		.find(|(id, _)| *id == chain_id)
		.map(|(_, address)| *address)
}

/// The built-in verifier program deployment for a Solana cluster, if any.
pub fn default_solana_verifier(cluster: &str) -> Option<SolanaVerifier> {
	let access_controller_account = match cluster {
		"mainnet-beta" => "7mSn5MoBjyRLKoJShgkep8J17ueGG8rYioVAiSg5YWMF",
		"devnet" => "2k3DsgwBoqrnvXKVvd7jX7aptNxdcRBdcd5HkYsGgbrb",
		_ => return None,
	};
	Some(SolanaVerifier {
		verifier_program_id: "Gt9S41PtjR58CbG9JhJ3J6vxesqrNAswbWYbLNTMZA3c".to_string(),
		access_controller_account: access_controller_account.to_string(),
	})
}

/// Resolves the verifier proxy address for an EVM chain.
///
/// A syntactically valid custom override takes precedence; a malformed
/// override is skipped with a warning so it cannot shadow a working default.
pub async fn resolve_evm_verifier(
	store: &SettingsStore,
	chain_id: u64,
) -> Result<Option<Address>, StoreError> {
	if let Some(custom) = store.get_evm_verifier(chain_id).await? {
		match custom.parse::<Address>() {
			Ok(address) => return Ok(Some(address)),
			Err(_) => {
				tracing::warn!(chain_id, address = %custom, "Ignoring malformed custom verifier");
			},
		}
	}
	Ok(default_evm_verifier(chain_id))
}

/// Resolves the verifier program for a Solana cluster.
pub async fn resolve_solana_verifier(
	store: &SettingsStore,
	cluster: &str,
) -> Result<Option<SolanaVerifier>, StoreError> {
	if let Some(custom) = store.get_solana_verifier(cluster).await? {
		return Ok(Some(custom));
	}
	Ok(default_solana_verifier(cluster))
}

/// A verifier deployment entry for the operator UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvmVerifierEntry {
	pub chain_id: u64,
	pub address: Option<String>,
	pub default: bool,
}

/// A Solana verifier deployment entry for the operator UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolanaVerifierEntry {
	pub cluster: String,
	pub verifier: Option<SolanaVerifier>,
	pub default: bool,
}

/// All EVM verifier deployments: built-in defaults plus custom overrides.
pub async fn list_evm_verifiers(
	store: &SettingsStore,
) -> Result<Vec<EvmVerifierEntry>, StoreError> {
	let mut entries: Vec<EvmVerifierEntry> = DEFAULT_EVM_VERIFIERS
		.iter()
		.map(|(chain_id, address)| EvmVerifierEntry {
			chain_id: *chain_id,
			address: Some(format!("{:#x}", address)),
			default: true,
		})
		.collect();

	for chain_id in store.evm_verifier_chains().await? {
		entries.push(EvmVerifierEntry {
			chain_id,
			address: store.get_evm_verifier(chain_id).await?,
			default: false,
		});
	}

	Ok(entries)
}

/// All Solana verifier deployments: built-in defaults plus custom overrides.
pub async fn list_solana_verifiers(
	store: &SettingsStore,
) -> Result<Vec<SolanaVerifierEntry>, StoreError> {
	let mut entries: Vec<SolanaVerifierEntry> = ["mainnet-beta", "devnet"]
		.iter()
		.map(|cluster| SolanaVerifierEntry {
			cluster: cluster.to_string(),
			verifier: default_solana_verifier(cluster),
			default: true,
		})
		.collect();

	for cluster in store.solana_verifier_clusters().await? {
		let verifier = store.get_solana_verifier(&cluster).await?;
		entries.push(SolanaVerifierEntry {
			cluster,
			verifier,
			default: false,
		});
	}

	Ok(entries)
}

/// The four contract addresses a verification run needs.
///
/// The default value is the degenerate all-zero set; callers must treat a set
/// that is not [`ContractAddressSet::is_ready`] as "not ready", never as a
/// valid configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContractAddressSet {
	pub verifier_proxy: Address,
	pub fee_manager: Address,
	pub reward_manager: Address,
	pub fee_token: Address,
}

impl ContractAddressSet {
	/// Whether every address is present and non-zero.
	pub fn is_ready(&self) -> bool {
		self.verifier_proxy != Address::ZERO
			&& self.fee_manager != Address::ZERO
			&& self.reward_manager != Address::ZERO
			&& self.fee_token != Address::ZERO
	}
}

/// Resolves the full contract address set for the client's chain.
///
/// Any missing prerequisite yields the degenerate all-zero set; failures are
/// logged, never raised across this boundary.
pub async fn resolve_contract_addresses(
	client: &dyn ChainClient,
	store: &SettingsStore,
) -> ContractAddressSet {
	match try_resolve_contract_addresses(client, store).await {
		Ok(addresses) => addresses,
		Err(error) => {
			tracing::warn!(%error, "Failed to resolve contract addresses");
			ContractAddressSet::default()
		},
	}
}

async fn try_resolve_contract_addresses(
	client: &dyn ChainClient,
	store: &SettingsStore,
) -> Result<ContractAddressSet, VerifyError> {
	let chain_id = client.chain().id;
	let verifier_proxy = resolve_evm_verifier(store, chain_id)
		.await?
		.ok_or_else(|| {
			VerifyError::InvalidAddress(format!("No verifier deployment for chain {}", chain_id))
		})?;

	let fee_manager =
		read_call(client, verifier_proxy, IVerifierProxy::s_feeManagerCall {}).await?;

	// Independent reads off the fee manager; issued concurrently.
	let (reward_manager, fee_token) = tokio::try_join!(
		read_call(client, fee_manager, IFeeManager::i_rewardManagerCall {}),
		read_call(client, fee_manager, IFeeManager::i_linkAddressCall {}),
	)?;

	Ok(ContractAddressSet {
		verifier_proxy,
		fee_manager,
		reward_manager,
		fee_token,
	})
}
