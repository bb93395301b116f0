//! Scripted chain client for exercising the pipeline without a network.

use crate::context::PipelineContext;
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use streams_client::{ChainClient, ClientError};
use streams_types::{chains, ChainDescriptor, NativeCurrency, Transaction, TransactionReceipt};

/// A chain client whose responses are scripted per call selector.
pub(crate) struct ScriptedClient {
	chain: ChainDescriptor,
	account: Address,
	responses: HashMap<[u8; 4], Bytes>,
	estimates: Mutex<VecDeque<u64>>,
	fail_estimates: bool,
	estimate_count: AtomicUsize,
	sent: Mutex<Vec<Transaction>>,
	revert_receipts: bool,
	balance: Option<U256>,
}

impl ScriptedClient {
	pub fn new(chain_id: u64) -> Self {
		let chain = chains::by_id(chain_id).cloned().unwrap_or_else(|| ChainDescriptor {
			id: chain_id,
			name: format!("Local {}", chain_id),
			currency: NativeCurrency {
				name: "Ether".to_string(),
				symbol: "ETH".to_string(),
				decimals: 18,
			},
			rpc_urls: vec!["http://localhost:8545".to_string()],
			testnet: true,
		});

		Self {
			chain,
			account: Address::repeat_byte(0xaa),
			responses: HashMap::new(),
			estimates: Mutex::new(VecDeque::new()),
			fail_estimates: false,
			estimate_count: AtomicUsize::new(0),
			sent: Mutex::new(Vec::new()),
			revert_receipts: false,
			balance: None,
		}
	}

	/// Scripts the return data for calls whose data starts with `selector`.
	pub fn with_response(mut self, selector: [u8; 4], data: Vec<u8>) -> Self {
		self.responses.insert(selector, Bytes::from(data));
		self
	}

	/// Queues a gas estimate; once drained, estimates default to 50_000.
	pub fn with_estimate(mut self, gas: u64) -> Self {
		self.estimates.get_mut().unwrap().push_back(gas);
		self
	}

	pub fn with_failing_estimates(mut self) -> Self {
		self.fail_estimates = true;
		self
	}

	pub fn with_reverting_receipts(mut self) -> Self {
		self.revert_receipts = true;
		self
	}

	pub fn with_account(mut self, account: Address) -> Self {
		self.account = account;
		self
	}

	pub fn with_balance(mut self, balance: U256) -> Self {
		self.balance = Some(balance);
		self
	}

	/// Transactions submitted so far.
	pub fn sent(&self) -> Vec<Transaction> {
		self.sent.lock().unwrap().clone()
	}

	/// Number of gas estimates requested so far.
	pub fn estimate_calls(&self) -> usize {
		self.estimate_count.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ChainClient for ScriptedClient {
	fn chain(&self) -> &ChainDescriptor {
		&self.chain
	}

	fn account(&self) -> Address {
		self.account
	}

	async fn estimate_gas(&self, _tx: &Transaction) -> Result<u64, ClientError> {
		self.estimate_count.fetch_add(1, Ordering::SeqCst);
		if self.fail_estimates {
			return Err(ClientError::Network("execution reverted".to_string()));
		}
		Ok(self
			.estimates
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or(50_000))
	}

	async fn call(&self, tx: &Transaction) -> Result<Bytes, ClientError> {
		let selector: [u8; 4] = tx
			.data
			.get(..4)
			.and_then(|bytes| bytes.try_into().ok())
			.ok_or_else(|| ClientError::Network("calldata too short".to_string()))?;

		self.responses
			.get(&selector)
			.cloned()
			.ok_or_else(|| ClientError::Network("execution reverted".to_string()))
	}

	async fn send_transaction(&self, tx: &Transaction) -> Result<B256, ClientError> {
		let mut sent = self.sent.lock().unwrap();
		sent.push(tx.clone());
		Ok(B256::repeat_byte(sent.len() as u8))
	}

	async fn wait_for_confirmation(
		&self,
		hash: B256,
		_confirmations: u64,
		_timeout: Duration,
	) -> Result<TransactionReceipt, ClientError> {
		Ok(TransactionReceipt {
			hash,
			block_number: 1,
			success: !self.revert_receipts,
			logs: vec![],
		})
	}

	async fn native_balance(&self, _address: Address) -> Result<U256, ClientError> {
		self.balance
			.ok_or_else(|| ClientError::Network("no balance scripted".to_string()))
	}
}

/// A pipeline context matching a scripted client's chain and account.
pub(crate) fn test_context(client: &ScriptedClient, gas_cap: Option<u64>) -> PipelineContext {
	PipelineContext {
		chain: client.chain.clone(),
		account: client.account,
		gas_cap,
		min_confirmations: 1,
		confirmation_timeout: Duration::from_secs(5),
	}
}
