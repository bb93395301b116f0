//! Report verification: the approve-then-verify transaction pair.
//!
//! Verification pays a fee in the fee token. The pipeline first approves the
//! reward manager to spend the quoted fee amount, and only once that
//! confirms calls `verify` on the verifier proxy with the raw report. Each
//! leg runs the full gas-capped protocol with its own cap check — an
//! approval within budget does not guarantee the verify call is. There is no
//! compensating action if the second leg fails after the first confirmed:
//! the allowance persists.

use crate::context::PipelineContext;
use crate::contracts::{read_call, IFeeManager, IVerifierProxy, IERC20};
use crate::error::VerifyError;
use crate::executor::{execute_gas_capped, TxOutcome};
use crate::resolver::ContractAddressSet;
use alloy_primitives::Address;
use alloy_sol_types::{SolCall, SolValue};
use std::fmt;
use streams_client::ChainClient;
use streams_codec::{decode_full_report, decode_report_data, report_version};
use streams_types::{DecodedReport, StreamReport, Transaction};

/// The two transaction legs of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxLeg {
	/// ERC-20 approval of the verification fee.
	FeeApproval,
	/// The `verify` call on the verifier proxy.
	Verification,
}

impl fmt::Display for TxLeg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TxLeg::FeeApproval => write!(f, "fee approval"),
			TxLeg::Verification => write!(f, "report verification"),
		}
	}
}

/// Result of a verification run.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
	/// Both legs confirmed; the freshly verified report, decoded.
	Verified(DecodedReport),
	/// A leg's gas estimate exceeded the ceiling; the run stopped there.
	Skipped {
		leg: TxLeg,
		estimated_gas: u64,
		gas_cap: u64,
	},
}

/// Verifies a signed report on-chain and returns its decoded contents.
///
/// Preconditions checked before any estimation: a usable signing account,
/// a recognized report version, and a fully resolved address set.
pub async fn verify_report(
	client: &dyn ChainClient,
	ctx: &PipelineContext,
	addresses: &ContractAddressSet,
	report: &StreamReport,
) -> Result<VerifyOutcome, VerifyError> {
	if ctx.account == Address::ZERO {
		tracing::error!("Account is missing");
		return Err(VerifyError::NoSigningKey);
	}

	let (_report_context, report_data) = decode_full_report(&report.raw_report)?;
	let version = report_version(&report_data)?;
	if version != 3 && version != 4 {
		tracing::warn!(version, feed_id = %report.feed_id, "Invalid report version");
		return Err(VerifyError::UnsupportedReportVersion(version));
	}

	if !addresses.is_ready() {
		tracing::warn!(?addresses, "Invalid contract addresses");
		return Err(VerifyError::InvalidAddress(
			"Contract address set is not ready".to_string(),
		));
	}

	let quote = read_call(
		client,
		addresses.fee_manager,
		IFeeManager::getFeeAndRewardCall {
			subscriber: ctx.account,
			report: report_data,
			quoteAddress: addresses.fee_token,
		},
	)
	.await?;
	let fee = quote.fee.amount;
	tracing::info!(fee = %fee, fee_token = %addresses.fee_token, "Quoted verification fee");

	let approve_tx = Transaction::call(
		ctx.chain.id,
		addresses.fee_token,
		IERC20::approveCall {
			spender: addresses.reward_manager,
			amount: fee,
		}
		.abi_encode(),
	);
	match execute_gas_capped(client, ctx, &approve_tx, "fee approval").await? {
		TxOutcome::Skipped {
			estimated_gas,
			gas_cap,
		} => {
			return Ok(VerifyOutcome::Skipped {
				leg: TxLeg::FeeApproval,
				estimated_gas,
				gas_cap,
			})
		},
		TxOutcome::Confirmed { .. } => {},
	}

	let verify_tx = Transaction::call(
		ctx.chain.id,
		addresses.verifier_proxy,
		IVerifierProxy::verifyCall {
			payload: report.raw_report.clone(),
			parameterPayload: addresses.fee_token.abi_encode().into(),
		}
		.abi_encode(),
	);
	let outcome = execute_gas_capped(client, ctx, &verify_tx, "report verification")
		.await
		.inspect_err(|error| {
			// The approval already confirmed; its allowance persists.
			tracing::warn!(%error, "Verification failed after the fee approval confirmed");
		})?;

	match outcome {
		TxOutcome::Skipped {
			estimated_gas,
			gas_cap,
		} => {
			tracing::warn!(
				estimated_gas,
				gas_cap,
				"Verification skipped after the fee approval confirmed; the allowance persists"
			);
			Ok(VerifyOutcome::Skipped {
				leg: TxLeg::Verification,
				estimated_gas,
				gas_cap,
			})
		},
		TxOutcome::Confirmed { simulated, .. } => {
			let verified_data = IVerifierProxy::verifyCall::abi_decode_returns(&simulated)
				.map_err(|e| {
					VerifyError::MalformedResponse(format!("verify return data: {}", e))
				})?;
			let decoded = decode_report_data(&verified_data)?;
			tracing::info!(
				feed_id = %decoded.feed_id(),
				version = decoded.version(),
				"Report verified"
			);
			Ok(VerifyOutcome::Verified(decoded))
		},
	}
}
