//! Per-run pipeline context.
//!
//! Everything a pipeline run needs from mutable configuration is snapshotted
//! here once, at the start of the run. A reconfiguration that lands mid-run
//! is observed by the next run, never halfway through this one.

use alloy_primitives::Address;
use std::time::Duration;
use streams_types::ChainDescriptor;

/// Snapshot of the configuration a single pipeline run operates under.
#[derive(Debug, Clone)]
pub struct PipelineContext {
	/// The resolved active network.
	pub chain: ChainDescriptor,
	/// Operator account address (zero sentinel when degraded).
	pub account: Address,
	/// Gas ceiling in absolute units; `None` means unlimited.
	pub gas_cap: Option<u64>,
	/// Confirmations required before a submission counts as included.
	pub min_confirmations: u64,
	/// Upper bound on each confirmation wait.
	pub confirmation_timeout: Duration,
}
