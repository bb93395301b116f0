//! On-chain contract interfaces for report verification.
//!
//! The verifier proxy checks a report's signatures and fee payment; the fee
//! manager it points at quotes the verification fee and names the reward
//! manager and fee token. The fee token is a plain ERC-20.

use crate::error::VerifyError;
use alloy_primitives::Address;
use alloy_sol_types::{sol, SolCall};
use streams_client::ChainClient;
use streams_types::Transaction;

sol! {
	/// A fee or reward denominated in a specific asset.
	struct Asset {
		address assetAddress;
		uint256 amount;
	}

	interface IVerifierProxy {
		function s_feeManager() external view returns (address);
		function verify(
			bytes calldata payload,
			bytes calldata parameterPayload
		) external payable returns (bytes memory);
	}

	interface IFeeManager {
		function i_rewardManager() external view returns (address);
		function i_linkAddress() external view returns (address);
		function getFeeAndReward(
			address subscriber,
			bytes memory report,
			address quoteAddress
		) external returns (Asset memory fee, Asset memory reward, uint256 discount);
	}

	interface IERC20 {
		function approve(address spender, uint256 amount) external returns (bool);
		function balanceOf(address account) external view returns (uint256);
		function decimals() external view returns (uint8);
		function symbol() external view returns (string);
	}
}

/// Executes a read-only contract call and decodes its return value.
pub(crate) async fn read_call<C: SolCall>(
	client: &dyn ChainClient,
	to: Address,
	call: C,
) -> Result<C::Return, VerifyError> {
	let tx = Transaction::call(client.chain().id, to, call.abi_encode());
	let ret = client.call(&tx).await?;
	C::abi_decode_returns(&ret).map_err(|e| {
		VerifyError::MalformedResponse(format!("{}: {}", C::SIGNATURE, e))
	})
}
