//! Pipeline configuration.
//!
//! Process-level tuning knobs loaded from a TOML file. These are distinct
//! from the operator settings store: they are fixed for the life of the
//! process rather than editable per run.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Tuning for the transaction pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
	/// Confirmations required before a submission counts as included.
	#[serde(default = "default_min_confirmations")]
	pub min_confirmations: u64,
	/// Upper bound in seconds on each confirmation wait.
	#[serde(default = "default_confirmation_timeout_secs")]
	pub confirmation_timeout_secs: u64,
}

fn default_min_confirmations() -> u64 {
	1
}

fn default_confirmation_timeout_secs() -> u64 {
	600
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			min_confirmations: default_min_confirmations(),
			confirmation_timeout_secs: default_confirmation_timeout_secs(),
		}
	}
}

impl PipelineConfig {
	/// Loads configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Ok(toml::from_str(&contents)?)
	}

	/// The confirmation wait bound as a duration.
	pub fn confirmation_timeout(&self) -> Duration {
		Duration::from_secs(self.confirmation_timeout_secs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = PipelineConfig::default();
		assert_eq!(config.min_confirmations, 1);
		assert_eq!(config.confirmation_timeout(), Duration::from_secs(600));
	}

	#[test]
	fn test_partial_file_uses_defaults() {
		let config: PipelineConfig = toml::from_str("min_confirmations = 3").unwrap();
		assert_eq!(config.min_confirmations, 3);
		assert_eq!(config.confirmation_timeout_secs, 600);
	}

	#[test]
	fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("pipeline.toml");
		std::fs::write(&path, "confirmation_timeout_secs = 120\n").unwrap();

		let config = PipelineConfig::from_file(&path).unwrap();
		assert_eq!(config.confirmation_timeout(), Duration::from_secs(120));
	}

	#[test]
	fn test_from_file_missing() {
		let result = PipelineConfig::from_file("/definitely/not/here.toml");
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}

	#[test]
	fn test_invalid_toml() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("pipeline.toml");
		std::fs::write(&path, "min_confirmations = [").unwrap();

		let result = PipelineConfig::from_file(&path);
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}
}
