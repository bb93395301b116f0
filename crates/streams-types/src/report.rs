//! Signed report types for the streams verifier.
//!
//! A report arrives as an opaque signed blob; once decoded it becomes one of
//! two versioned payload shapes. The two schemas are modeled as a sum type
//! keyed by the wire version marker so that adding a third version is an
//! exhaustiveness error, not a silent fall-through.

use alloy_primitives::{
	aliases::{I192, U192},
	Bytes, B256,
};
use serde::{Deserialize, Serialize};

/// A signed report as received from the data-stream subscription.
///
/// Only `raw_report` is consumed by the verification pipeline; the remaining
/// fields are the stream's own framing, carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamReport {
	/// Feed identifier the stream attributes this report to.
	pub feed_id: B256,
	/// Timestamp of the observations in the report.
	pub observations_timestamp: u64,
	/// The full signed report blob to hand to the verifier contract.
	pub raw_report: Bytes,
}

/// Version 3 report payload: a price with bid and ask.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportV3 {
	pub feed_id: B256,
	pub valid_from_timestamp: u32,
	pub observations_timestamp: u32,
	pub native_fee: U192,
	pub link_fee: U192,
	pub expires_at: u32,
	pub price: I192,
	pub bid: I192,
	pub ask: I192,
}

/// Version 4 report payload: a price with a market status word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportV4 {
	pub feed_id: B256,
	pub valid_from_timestamp: u32,
	pub observations_timestamp: u32,
	pub native_fee: U192,
	pub link_fee: U192,
	pub expires_at: u32,
	pub price: I192,
	pub market_status: u32,
}

/// A decoded report, tagged by its wire schema version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "version")]
pub enum DecodedReport {
	V3(ReportV3),
	V4(ReportV4),
}

impl DecodedReport {
	/// The feed identifier, common to both schema versions.
	pub fn feed_id(&self) -> B256 {
		match self {
			DecodedReport::V3(report) => report.feed_id,
			DecodedReport::V4(report) => report.feed_id,
		}
	}

	/// The wire version marker this report was decoded from.
	pub fn version(&self) -> u16 {
		match self {
			DecodedReport::V3(_) => 3,
			DecodedReport::V4(_) => 4,
		}
	}

	/// The benchmark price, common to both schema versions.
	pub fn price(&self) -> I192 {
		match self {
			DecodedReport::V3(report) => report.price,
			DecodedReport::V4(report) => report.price,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn v3_fixture() -> ReportV3 {
		ReportV3 {
			feed_id: B256::repeat_byte(0x42),
			valid_from_timestamp: 1_700_000_000,
			observations_timestamp: 1_700_000_060,
			native_fee: U192::from(10_000u64),
			link_fee: U192::from(20_000u64),
			expires_at: 1_700_003_600,
			price: I192::try_from(-1_234i64).unwrap(),
			bid: I192::try_from(-1_235i64).unwrap(),
			ask: I192::try_from(-1_233i64).unwrap(),
		}
	}

	#[test]
	fn test_decoded_report_accessors() {
		let report = DecodedReport::V3(v3_fixture());
		assert_eq!(report.version(), 3);
		assert_eq!(report.feed_id(), B256::repeat_byte(0x42));
		assert_eq!(report.price(), I192::try_from(-1_234i64).unwrap());
	}

	#[test]
	fn test_decoded_report_serialization_is_tagged() {
		let report = DecodedReport::V3(v3_fixture());
		let json = serde_json::to_string(&report).unwrap();
		assert!(json.contains("\"version\":\"V3\""));

		let round_tripped: DecodedReport = serde_json::from_str(&json).unwrap();
		assert_eq!(round_tripped, report);
	}

	#[test]
	fn test_v4_report_serialization() {
		let report = DecodedReport::V4(ReportV4 {
			feed_id: B256::repeat_byte(0x11),
			valid_from_timestamp: 1,
			observations_timestamp: 2,
			native_fee: U192::from(3u64),
			link_fee: U192::from(4u64),
			expires_at: 5,
			price: I192::try_from(6i64).unwrap(),
			market_status: 2,
		});
		let json = serde_json::to_string(&report).unwrap();
		assert!(json.contains("\"market_status\":2"));
		assert_eq!(report.version(), 4);
	}
}
