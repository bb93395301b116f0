//! Arbitrary contract execution driven by report fields.
//!
//! The operator supplies a contract ABI, a function name, and a list of
//! argument names; each name selects a field of the decoded V3 report. The
//! call is encoded dynamically and run through the gas-capped protocol
//! against the configured target contract.

use crate::context::PipelineContext;
use crate::error::VerifyError;
use crate::executor::{execute_gas_capped, TxOutcome};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, U256};
use streams_client::ChainClient;
use streams_types::{i192_to_i256, u192_to_u256, ReportV3, Transaction, TransactionReceipt};

/// An operator-configured contract call.
///
/// `args` name V3 report fields; their current values become the call
/// arguments, in order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ContractCallSpec {
	/// JSON ABI document of the target contract.
	pub abi: String,
	/// Function to call.
	pub function: String,
	/// Report field names bound as arguments.
	pub args: Vec<String>,
}

/// Result of an arbitrary contract execution.
#[derive(Debug, Clone)]
pub enum ExecuteOutcome {
	/// The call was submitted and confirmed.
	Confirmed(TransactionReceipt),
	/// The estimate exceeded the gas ceiling; nothing was submitted.
	Skipped { estimated_gas: u64, gas_cap: u64 },
}

fn report_field(report: &ReportV3, name: &str) -> Option<DynSolValue> {
	match name {
		"feedId" => Some(DynSolValue::FixedBytes(report.feed_id, 32)),
		"validFromTimestamp" => Some(DynSolValue::Uint(
			U256::from(report.valid_from_timestamp),
			32,
		)),
		"observationsTimestamp" => Some(DynSolValue::Uint(
			U256::from(report.observations_timestamp),
			32,
		)),
		"nativeFee" => Some(DynSolValue::Uint(u192_to_u256(report.native_fee), 192)),
		"linkFee" => Some(DynSolValue::Uint(u192_to_u256(report.link_fee), 192)),
		"expiresAt" => Some(DynSolValue::Uint(U256::from(report.expires_at), 32)),
		"price" => Some(DynSolValue::Int(i192_to_i256(report.price), 192)),
		"bid" => Some(DynSolValue::Int(i192_to_i256(report.bid), 192)),
		"ask" => Some(DynSolValue::Int(i192_to_i256(report.ask), 192)),
		_ => None,
	}
}

/// Executes an operator-configured contract call with the report's values.
pub async fn execute_contract(
	client: &dyn ChainClient,
	ctx: &PipelineContext,
	report: &ReportV3,
	target: Address,
	call: &ContractCallSpec,
) -> Result<ExecuteOutcome, VerifyError> {
	if ctx.account == Address::ZERO {
		tracing::error!("Account is missing");
		return Err(VerifyError::NoSigningKey);
	}
	if call.abi.trim().is_empty() {
		tracing::warn!("No abi provided");
		return Err(VerifyError::InvalidCall("Empty ABI".to_string()));
	}
	if call.function.is_empty() {
		tracing::warn!("No function name provided");
		return Err(VerifyError::InvalidCall("Empty function name".to_string()));
	}
	if call.args.is_empty() {
		tracing::warn!("No args provided");
		return Err(VerifyError::InvalidCall("Empty argument list".to_string()));
	}
	if target == Address::ZERO {
		return Err(VerifyError::InvalidAddress(
			"Target contract is the zero address".to_string(),
		));
	}

	let abi: JsonAbi = serde_json::from_str(&call.abi)
		.map_err(|e| VerifyError::InvalidCall(format!("Invalid ABI document: {}", e)))?;
	let function = abi
		.function(&call.function)
		.and_then(|overloads| overloads.first())
		.ok_or_else(|| {
			VerifyError::InvalidCall(format!("Function {} not found in ABI", call.function))
		})?;

	let values = call
		.args
		.iter()
		.map(|name| {
			report_field(report, name).ok_or_else(|| {
				VerifyError::InvalidCall(format!("Unknown report field: {}", name))
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let data = function
		.abi_encode_input(&values)
		.map_err(|e| VerifyError::InvalidCall(format!("Failed to encode arguments: {}", e)))?;

	tracing::info!(
		target = %target,
		function = %call.function,
		feed_id = %report.feed_id,
		"Prepared verification transaction"
	);

	let tx = Transaction::call(ctx.chain.id, target, data);
	match execute_gas_capped(client, ctx, &tx, "contract execution").await? {
		TxOutcome::Confirmed { receipt, .. } => Ok(ExecuteOutcome::Confirmed(receipt)),
		TxOutcome::Skipped {
			estimated_gas,
			gas_cap,
		} => Ok(ExecuteOutcome::Skipped {
			estimated_gas,
			gas_cap,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testutil::{test_context, ScriptedClient};
	use alloy_primitives::{
		aliases::{I192, U192},
		B256,
	};

	const SINK_ABI: &str = r#"[
		{
			"type": "function",
			"name": "savePrice",
			"stateMutability": "nonpayable",
			"inputs": [
				{ "name": "feedId", "type": "bytes32" },
				{ "name": "price", "type": "int192" }
			],
			"outputs": []
		}
	]"#;

	fn report() -> ReportV3 {
		ReportV3 {
			feed_id: B256::repeat_byte(0x42),
			valid_from_timestamp: 1_700_000_000,
			observations_timestamp: 1_700_000_060,
			native_fee: U192::from(1u64),
			link_fee: U192::from(2u64),
			expires_at: 1_700_086_400,
			price: I192::try_from(-42i64).unwrap(),
			bid: I192::try_from(-43i64).unwrap(),
			ask: I192::try_from(-41i64).unwrap(),
		}
	}

	fn call_spec() -> ContractCallSpec {
		ContractCallSpec {
			abi: SINK_ABI.to_string(),
			function: "savePrice".to_string(),
			args: vec!["feedId".to_string(), "price".to_string()],
		}
	}

	fn save_price_selector() -> [u8; 4] {
		let abi: JsonAbi = serde_json::from_str(SINK_ABI).unwrap();
		abi.function("savePrice").unwrap()[0].selector().into()
	}

	#[tokio::test]
	async fn test_execute_contract_happy_path() {
		let client = ScriptedClient::new(42161)
			.with_estimate(80_000)
			.with_response(save_price_selector(), vec![]);
		let ctx = test_context(&client, Some(100_000));

		let target = Address::repeat_byte(0x99);
		let outcome = execute_contract(&client, &ctx, &report(), target, &call_spec())
			.await
			.unwrap();

		assert!(matches!(outcome, ExecuteOutcome::Confirmed(_)));

		let sent = client.sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].to, target);
		assert_eq!(sent[0].data[..4], save_price_selector());
		// selector + two words
		assert_eq!(sent[0].data.len(), 4 + 64);
	}

	#[tokio::test]
	async fn test_execute_contract_over_cap_skips() {
		let client = ScriptedClient::new(42161)
			.with_estimate(200_000)
			.with_response(save_price_selector(), vec![]);
		let ctx = test_context(&client, Some(100_000));

		let outcome = execute_contract(
			&client,
			&ctx,
			&report(),
			Address::repeat_byte(0x99),
			&call_spec(),
		)
		.await
		.unwrap();

		assert!(matches!(outcome, ExecuteOutcome::Skipped { .. }));
		assert!(client.sent().is_empty());
	}

	#[tokio::test]
	async fn test_execute_contract_empty_args_rejected() {
		let client = ScriptedClient::new(42161);
		let ctx = test_context(&client, None);

		let mut spec = call_spec();
		spec.args.clear();

		let result = execute_contract(
			&client,
			&ctx,
			&report(),
			Address::repeat_byte(0x99),
			&spec,
		)
		.await;
		assert!(matches!(result, Err(VerifyError::InvalidCall(_))));
		assert_eq!(client.estimate_calls(), 0);
	}

	#[tokio::test]
	async fn test_execute_contract_unknown_field_rejected() {
		let client = ScriptedClient::new(42161);
		let ctx = test_context(&client, None);

		let mut spec = call_spec();
		spec.args = vec!["feedId".to_string(), "nonsense".to_string()];

		let result = execute_contract(
			&client,
			&ctx,
			&report(),
			Address::repeat_byte(0x99),
			&spec,
		)
		.await;
		assert!(matches!(result, Err(VerifyError::InvalidCall(_))));
	}

	#[tokio::test]
	async fn test_execute_contract_missing_function_rejected() {
		let client = ScriptedClient::new(42161);
		let ctx = test_context(&client, None);

		let mut spec = call_spec();
		spec.function = "doesNotExist".to_string();

		let result = execute_contract(
			&client,
			&ctx,
			&report(),
			Address::repeat_byte(0x99),
			&spec,
		)
		.await;
		assert!(matches!(result, Err(VerifyError::InvalidCall(_))));
	}

	#[tokio::test]
	async fn test_execute_contract_requires_signing_account() {
		let client = ScriptedClient::new(42161).with_account(Address::ZERO);
		let ctx = test_context(&client, None);

		let result = execute_contract(
			&client,
			&ctx,
			&report(),
			Address::repeat_byte(0x99),
			&call_spec(),
		)
		.await;
		assert!(matches!(result, Err(VerifyError::NoSigningKey)));
	}

	#[test]
	fn test_report_field_mapping() {
		let report = report();
		assert!(report_field(&report, "feedId").is_some());
		assert!(report_field(&report, "nativeFee").is_some());
		assert!(report_field(&report, "ask").is_some());
		assert!(report_field(&report, "marketStatus").is_none());
	}
}
