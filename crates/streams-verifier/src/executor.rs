//! The gas-capped transaction protocol.
//!
//! Every submission runs the same sequence: estimate gas, compare against the
//! operator's ceiling, re-simulate against current chain state, broadcast,
//! and wait for inclusion. Exceeding the ceiling is a deliberate no-op — the
//! operator-visible outcome is "skipped due to cost", distinguishable from a
//! technical failure. There is no retry anywhere; every abort is final for
//! the invocation.

use crate::context::PipelineContext;
use crate::error::VerifyError;
use alloy_primitives::Bytes;
use streams_client::{ChainClient, ClientError};
use streams_types::{Transaction, TransactionReceipt};

/// Result of one pass through the transaction protocol.
#[derive(Debug, Clone)]
pub enum TxOutcome {
	/// The transaction was submitted and confirmed.
	Confirmed {
		/// The inclusion receipt.
		receipt: TransactionReceipt,
		/// Return data captured from the pre-submission simulation.
		simulated: Bytes,
	},
	/// The estimate exceeded the gas ceiling; nothing was submitted.
	Skipped { estimated_gas: u64, gas_cap: u64 },
}

/// Returns the violated cap, if the estimate exceeds a configured ceiling.
pub fn exceeded_gas_cap(estimated_gas: u64, gas_cap: Option<u64>) -> Option<u64> {
	match gas_cap {
		Some(cap) if estimated_gas > cap => Some(cap),
		_ => None,
	}
}

/// Runs one transaction through estimate, cap check, simulate, submit, and
/// confirm.
///
/// `label` names the operation in logs ("fee approval", "report
/// verification", ...).
pub async fn execute_gas_capped(
	client: &dyn ChainClient,
	ctx: &PipelineContext,
	tx: &Transaction,
	label: &'static str,
) -> Result<TxOutcome, VerifyError> {
	let estimated_gas = client
		.estimate_gas(tx)
		.await
		.map_err(|e| VerifyError::Estimation(e.to_string()))?;
	tracing::info!(
		label,
		estimated_gas,
		chain_id = ctx.chain.id,
		symbol = %ctx.chain.currency.symbol,
		"Estimated gas"
	);

	if let Some(gas_cap) = exceeded_gas_cap(estimated_gas, ctx.gas_cap) {
		tracing::info!(
			label,
			estimated_gas,
			gas_cap,
			"Gas is above the configured limit; aborting"
		);
		return Ok(TxOutcome::Skipped {
			estimated_gas,
			gas_cap,
		});
	}

	// Re-validate against current chain state; this is the exact call that
	// gets submitted, and its return value is what a successful execution
	// will produce.
	let prepared = tx.clone().with_gas_limit(estimated_gas);
	let simulated = client
		.call(&prepared)
		.await
		.map_err(|e| VerifyError::Simulation(e.to_string()))?;

	let hash = client.send_transaction(&prepared).await.map_err(|e| match e {
		ClientError::NoSigningKey => VerifyError::NoSigningKey,
		other => VerifyError::Submission(other.to_string()),
	})?;
	tracing::info!(label, tx_hash = %hash, "Transaction submitted");

	let receipt = client
		.wait_for_confirmation(hash, ctx.min_confirmations, ctx.confirmation_timeout)
		.await
		.map_err(|e| match e {
			ClientError::ConfirmationTimeout(secs) => VerifyError::ConfirmationTimeout(secs),
			other => VerifyError::Confirmation(other.to_string()),
		})?;

	if !receipt.success {
		return Err(VerifyError::Confirmation(format!(
			"Transaction {} reverted",
			hash
		)));
	}
	tracing::info!(
		label,
		tx_hash = %hash,
		block_number = receipt.block_number,
		"Transaction confirmed"
	);

	Ok(TxOutcome::Confirmed { receipt, simulated })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testutil::{test_context, ScriptedClient};
	use alloy_primitives::Address;
	use streams_types::Transaction;

	fn noop_tx() -> Transaction {
		Transaction::call(42161, Address::repeat_byte(0x77), vec![0xaa, 0xbb, 0xcc, 0xdd])
	}

	#[test]
	fn test_exceeded_gas_cap() {
		assert_eq!(exceeded_gas_cap(100, None), None);
		assert_eq!(exceeded_gas_cap(100, Some(100)), None);
		assert_eq!(exceeded_gas_cap(100, Some(99)), Some(99));
		assert_eq!(exceeded_gas_cap(1, Some(0)), Some(0));
	}

	#[tokio::test]
	async fn test_over_cap_aborts_without_submission() {
		let client = ScriptedClient::new(42161)
			.with_estimate(100_000)
			.with_response([0xaa, 0xbb, 0xcc, 0xdd], vec![]);
		let ctx = test_context(&client, Some(50_000));

		let outcome = execute_gas_capped(&client, &ctx, &noop_tx(), "test call")
			.await
			.unwrap();

		assert!(matches!(
			outcome,
			TxOutcome::Skipped {
				estimated_gas: 100_000,
				gas_cap: 50_000,
			}
		));
		assert!(client.sent().is_empty());
	}

	#[tokio::test]
	async fn test_under_cap_submits_and_confirms() {
		let client = ScriptedClient::new(42161)
			.with_estimate(40_000)
			.with_response([0xaa, 0xbb, 0xcc, 0xdd], vec![0x01]);
		let ctx = test_context(&client, Some(50_000));

		let outcome = execute_gas_capped(&client, &ctx, &noop_tx(), "test call")
			.await
			.unwrap();

		match outcome {
			TxOutcome::Confirmed { receipt, simulated } => {
				assert!(receipt.success);
				assert_eq!(simulated.to_vec(), vec![0x01]);
			},
			other => panic!("expected confirmation, got {:?}", other),
		}

		let sent = client.sent();
		assert_eq!(sent.len(), 1);
		// The estimate is attached as the submitted gas limit.
		assert_eq!(sent[0].gas_limit, Some(40_000));
	}

	#[tokio::test]
	async fn test_no_cap_submits() {
		let client = ScriptedClient::new(42161)
			.with_estimate(9_000_000)
			.with_response([0xaa, 0xbb, 0xcc, 0xdd], vec![]);
		let ctx = test_context(&client, None);

		let outcome = execute_gas_capped(&client, &ctx, &noop_tx(), "test call")
			.await
			.unwrap();
		assert!(matches!(outcome, TxOutcome::Confirmed { .. }));
		assert_eq!(client.sent().len(), 1);
	}

	#[tokio::test]
	async fn test_estimation_failure() {
		let client = ScriptedClient::new(42161).with_failing_estimates();
		let ctx = test_context(&client, None);

		let result = execute_gas_capped(&client, &ctx, &noop_tx(), "test call").await;
		assert!(matches!(result, Err(VerifyError::Estimation(_))));
		assert!(client.sent().is_empty());
	}

	#[tokio::test]
	async fn test_simulation_failure() {
		// No scripted response for the selector: the simulate call reverts.
		let client = ScriptedClient::new(42161).with_estimate(40_000);
		let ctx = test_context(&client, None);

		let result = execute_gas_capped(&client, &ctx, &noop_tx(), "test call").await;
		assert!(matches!(result, Err(VerifyError::Simulation(_))));
		assert!(client.sent().is_empty());
	}

	#[tokio::test]
	async fn test_reverted_receipt_is_a_confirmation_failure() {
		let client = ScriptedClient::new(42161)
			.with_estimate(40_000)
			.with_response([0xaa, 0xbb, 0xcc, 0xdd], vec![])
			.with_reverting_receipts();
		let ctx = test_context(&client, None);

		let result = execute_gas_capped(&client, &ctx, &noop_tx(), "test call").await;
		assert!(matches!(result, Err(VerifyError::Confirmation(_))));
	}
}
