//! Formatting and conversion utilities.
//!
//! Provides hex prefix management, decimal-aware token amount formatting, and
//! widening conversions for the 192-bit fee and price words used by report
//! payloads.

use alloy_primitives::{
	aliases::{I192, U192},
	I256, U256,
};

/// Adds a "0x" prefix to a hex string if it doesn't already have one.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Formats a raw token amount with decimal places for display.
///
/// Converts an on-chain integer amount to a human-readable form with the
/// decimal point placed per the token's precision, trimming trailing zeros.
pub fn format_token_amount(amount: &str, decimals: u8) -> String {
	if decimals == 0 {
		return amount.to_string();
	}

	let decimal_places = decimals as usize;

	let (integer_part, decimal_part) = if amount.len() <= decimal_places {
		let decimal_str = format!("{:0>width$}", amount, width = decimal_places);
		("0".to_string(), decimal_str)
	} else {
		let split_pos = amount.len() - decimal_places;
		(
			amount[..split_pos].to_string(),
			amount[split_pos..].to_string(),
		)
	};

	let decimal_trimmed = decimal_part.trim_end_matches('0');

	if decimal_trimmed.is_empty() {
		integer_part
	} else {
		format!("{}.{}", integer_part, decimal_trimmed)
	}
}

/// Widens a 192-bit unsigned word to 256 bits.
pub fn u192_to_u256(value: U192) -> U256 {
	U256::from_be_slice(&value.to_be_bytes::<24>())
}

/// Sign-extends a 192-bit signed word to 256 bits.
pub fn i192_to_i256(value: I192) -> I256 {
	let mut bytes = [if value.is_negative() { 0xff } else { 0x00 }; 32];
	bytes[8..].copy_from_slice(&value.to_be_bytes::<24>());
	I256::from_be_bytes(bytes)
}
