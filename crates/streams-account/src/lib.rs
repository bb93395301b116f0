//! Operator account module for the streams verifier.
//!
//! The verifier holds a single signing key, read once at process start from
//! the `PRIVATE_KEY` environment value. A malformed or missing key does not
//! crash the process: the account degrades to a read-only identity with the
//! zero-address sentinel, and any operation that needs to sign fails at its
//! entry point instead.

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use streams_types::SecretString;
use thiserror::Error;

/// Environment variable holding the operator's private key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when an operation requires signing capability but
	/// the account is degraded to read-only.
	#[error("No signing key available")]
	NoSigningKey,
}

/// The operator's signing account.
///
/// Constructed once at startup. When the key material is unusable the account
/// still exists, reporting the zero address, so read-only operations keep
/// working.
#[derive(Debug)]
pub struct OperatorAccount {
	signer: Option<PrivateKeySigner>,
}

impl OperatorAccount {
	/// Creates an account from a hex-encoded private key.
	pub fn new(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer = private_key.with_exposed(|key| {
			key.parse::<PrivateKeySigner>()
				.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))
		})?;

		Ok(Self {
			signer: Some(signer),
		})
	}

	/// Creates an account from the `PRIVATE_KEY` environment value.
	///
	/// A missing or malformed key logs an error and yields a degraded
	/// read-only account rather than failing.
	pub fn from_env() -> Self {
		let key = match std::env::var(PRIVATE_KEY_ENV) {
			Ok(value) => SecretString::from(value),
			Err(_) => {
				tracing::error!("{} is not set; signing is unavailable", PRIVATE_KEY_ENV);
				return Self { signer: None };
			},
		};

		match Self::new(&key) {
			Ok(account) => account,
			Err(error) => {
				tracing::error!(%error, "Failed to load signing key; signing is unavailable");
				Self { signer: None }
			},
		}
	}

	/// A degraded account with no signing capability.
	pub fn read_only() -> Self {
		Self { signer: None }
	}

	/// The account address, or the zero sentinel when no key is loaded.
	pub fn address(&self) -> Address {
		self.signer
			.as_ref()
			.map(|signer| signer.address())
			.unwrap_or(Address::ZERO)
	}

	/// Whether a usable signing key is loaded.
	pub fn can_sign(&self) -> bool {
		self.signer.is_some()
	}

	/// The signer, or `NoSigningKey` when the account is degraded.
	pub fn signer(&self) -> Result<&PrivateKeySigner, AccountError> {
		self.signer.as_ref().ok_or(AccountError::NoSigningKey)
	}
}
