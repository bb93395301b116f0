//! Read-only balance and chain inspectors.
//!
//! These feed the operator UI, so they degrade to documented sentinels (zero
//! balance, empty symbol) rather than surfacing errors; the cause is logged.

use crate::contracts::{read_call, IERC20};
use crate::resolver::ContractAddressSet;
use alloy_primitives::Address;
use serde::Serialize;
use streams_client::ChainClient;
use streams_types::format_token_amount;

/// A formatted balance for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
	/// Decimal-formatted amount.
	pub value: String,
	/// Currency or token symbol; empty when unknown.
	pub symbol: String,
}

impl BalanceView {
	/// The sentinel returned when a balance cannot be read.
	pub fn zero() -> Self {
		Self {
			value: "0".to_string(),
			symbol: String::new(),
		}
	}
}

/// The active network's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainIdentity {
	pub chain_id: u64,
	pub name: String,
}

/// The operator account's native currency balance.
pub async fn native_balance(client: &dyn ChainClient) -> BalanceView {
	match client.native_balance(client.account()).await {
		Ok(balance) => BalanceView {
			value: format_token_amount(
				&balance.to_string(),
				client.chain().currency.decimals,
			),
			symbol: client.chain().currency.symbol.clone(),
		},
		Err(error) => {
			tracing::warn!(%error, "Failed to read native balance");
			BalanceView::zero()
		},
	}
}

/// The operator account's fee token balance, formatted per the token's
/// decimals.
pub async fn fee_token_balance(
	client: &dyn ChainClient,
	addresses: &ContractAddressSet,
) -> BalanceView {
	if addresses.fee_token == Address::ZERO {
		tracing::warn!("Invalid fee token address");
		return BalanceView::zero();
	}

	let account = client.account();
	let fee_token = addresses.fee_token;

	// Independent reads; issued concurrently.
	let result = tokio::try_join!(
		read_call(client, fee_token, IERC20::balanceOfCall { account }),
		read_call(client, fee_token, IERC20::decimalsCall {}),
		read_call(client, fee_token, IERC20::symbolCall {}),
	);

	match result {
		Ok((balance, decimals, symbol)) => BalanceView {
			value: format_token_amount(&balance.to_string(), decimals),
			symbol,
		},
		Err(error) => {
			tracing::warn!(%error, "Failed to read fee token balance");
			BalanceView::zero()
		},
	}
}

/// Identity of the network the client is bound to.
pub fn current_chain(client: &dyn ChainClient) -> ChainIdentity {
	let chain = client.chain();
	ChainIdentity {
		chain_id: chain.id,
		name: chain.name.clone(),
	}
}
