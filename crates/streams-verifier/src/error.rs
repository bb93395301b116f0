//! Error taxonomy for the verification pipeline.
//!
//! Every operation surfaces its failure kind explicitly so callers can tell a
//! configuration problem from a chain error. Gas-cap aborts are deliberately
//! not errors — they are successful `Skipped` outcomes of their operations.

use streams_client::ClientError;
use streams_codec::CodecError;
use streams_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the verification pipeline.
#[derive(Debug, Error)]
pub enum VerifyError {
	/// A required configuration value is absent.
	#[error("Configuration missing: {0}")]
	ConfigurationMissing(&'static str),
	/// The operation requires signing capability but none is available.
	#[error("No signing key available")]
	NoSigningKey,
	/// An address failed validation; the operation is abandoned.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// The report's version marker is not a recognized schema version.
	#[error("Unsupported report version: {0}")]
	UnsupportedReportVersion(u16),
	/// The report blob cannot be sliced into the expected field widths.
	#[error("Malformed report payload: {0}")]
	MalformedPayload(String),
	/// The operator-supplied ABI, function, or argument set is unusable.
	#[error("Invalid contract call: {0}")]
	InvalidCall(String),
	/// A contract returned data that does not decode as its declared type.
	#[error("Malformed contract response: {0}")]
	MalformedResponse(String),
	/// Gas estimation failed; the call would revert against current state.
	#[error("Gas estimation failed: {0}")]
	Estimation(String),
	/// Simulation failed between the estimate and submission.
	#[error("Simulation failed: {0}")]
	Simulation(String),
	/// The network rejected the submitted transaction.
	#[error("Submission failed: {0}")]
	Submission(String),
	/// The confirmation wait elapsed before inclusion was reported.
	#[error("Confirmation timed out after {0}s")]
	ConfirmationTimeout(u64),
	/// The transaction was included but failed, or its receipt is unusable.
	#[error("Confirmation failed: {0}")]
	Confirmation(String),
	/// Error from the chain client while resolving or reading.
	#[error(transparent)]
	Client(#[from] ClientError),
	/// Error from the settings store.
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

impl From<CodecError> for VerifyError {
	fn from(err: CodecError) -> Self {
		match err {
			CodecError::UnsupportedVersion(version) => {
				VerifyError::UnsupportedReportVersion(version)
			},
			CodecError::Malformed(message) => VerifyError::MalformedPayload(message),
		}
	}
}
