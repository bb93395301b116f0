//! Chain-call transaction types for the streams verifier.
//!
//! These types carry a contract call through the estimate/simulate/submit
//! protocol without tying the pipeline to a concrete provider library at its
//! seams. Conversions to and from Alloy's `TransactionRequest` live here so
//! the client implementation stays a thin translation layer.

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use serde::{Deserialize, Serialize};

/// A contract call prepared for submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transaction {
	/// Target contract address.
	pub to: Address,
	/// ABI-encoded calldata.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain id for replay protection.
	pub chain_id: u64,
	/// Gas limit, filled from the estimate before submission.
	pub gas_limit: Option<u64>,
}

impl Transaction {
	/// A zero-value contract call.
	pub fn call(chain_id: u64, to: Address, data: Vec<u8>) -> Self {
		Self {
			to,
			data,
			value: U256::ZERO,
			chain_id,
			gas_limit: None,
		}
	}

	/// Returns a copy with the gas limit attached.
	pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = Some(gas_limit);
		self
	}
}

impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		TransactionRequest {
			chain_id: Some(tx.chain_id),
			to: Some(TxKind::Call(tx.to)),
			value: Some(tx.value),
			gas: tx.gas_limit,
			input: TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		}
	}
}

/// Event log emitted by a contract during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Log {
	/// Contract address that emitted the log.
	pub address: Address,
	/// Indexed event parameters; topic 0 is the event signature hash.
	pub topics: Vec<B256>,
	/// Non-indexed event data.
	pub data: Vec<u8>,
}

/// Transaction receipt returned once a submission is included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: B256,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Event logs emitted during execution.
	pub logs: Vec<Log>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_call_constructor_defaults() {
		let to = address!("7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9");
		let tx = Transaction::call(8453, to, vec![0xde, 0xad]);
		assert_eq!(tx.value, U256::ZERO);
		assert_eq!(tx.gas_limit, None);
		assert_eq!(tx.chain_id, 8453);
	}

	#[test]
	fn test_with_gas_limit() {
		let to = address!("7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9");
		let tx = Transaction::call(1, to, vec![]).with_gas_limit(60_000);
		assert_eq!(tx.gas_limit, Some(60_000));
	}

	#[test]
	fn test_into_transaction_request() {
		let to = address!("7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9");
		let tx = Transaction::call(10, to, vec![1, 2, 3]).with_gas_limit(21_000);
		let request: TransactionRequest = tx.into();

		assert_eq!(request.chain_id, Some(10));
		assert_eq!(request.to, Some(TxKind::Call(to)));
		assert_eq!(request.gas, Some(21_000));
		assert_eq!(
			request.input.input.as_ref().map(|data| data.to_vec()),
			Some(vec![1, 2, 3])
		);
	}
}
