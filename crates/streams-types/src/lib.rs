//! Common types module for the streams verifier.
//!
//! This module defines the core data types and structures used throughout
//! the verifier pipeline. It provides a centralized location for shared types
//! to ensure consistency across all verifier components.

/// Static catalogue of supported networks.
pub mod chains;
/// Signed report types and their decoded representations.
pub mod report;
/// Secure string type for handling sensitive data.
pub mod secret;
/// Chain-call transaction and receipt types.
pub mod transaction;
/// Utility functions for formatting and conversions.
pub mod utils;

pub use chains::{ChainDescriptor, NativeCurrency};
pub use report::{DecodedReport, ReportV3, ReportV4, StreamReport};
pub use secret::SecretString;
pub use transaction::{Log, Transaction, TransactionReceipt};
pub use utils::{format_token_amount, i192_to_i256, u192_to_u256, with_0x_prefix};
