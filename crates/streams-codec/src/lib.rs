//! Report wire codec for the streams verifier.
//!
//! A raw signed report is an ABI-encoded envelope: three 32-byte context
//! words followed by a variable-length report payload (the signature words
//! that may trail the payload are not consumed here). The payload's first two
//! bytes are the schema version of its feed id; only versions 3 and 4 are
//! recognized. Rejection has no side effects — the caller simply never
//! reaches the transaction pipeline.

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::{sol, SolValue};
use streams_types::{DecodedReport, ReportV3, ReportV4};
use thiserror::Error;

sol! {
	struct ReportDataV3 {
		bytes32 feedId;
		uint32 validFromTimestamp;
		uint32 observationsTimestamp;
		uint192 nativeFee;
		uint192 linkFee;
		uint32 expiresAt;
		int192 price;
		int192 bid;
		int192 ask;
	}

	struct ReportDataV4 {
		bytes32 feedId;
		uint32 validFromTimestamp;
		uint32 observationsTimestamp;
		uint192 nativeFee;
		uint192 linkFee;
		uint32 expiresAt;
		int192 price;
		uint32 marketStatus;
	}
}

/// Errors that can occur while decoding a report.
#[derive(Debug, Error)]
pub enum CodecError {
	/// The payload's version marker is not a recognized schema version.
	#[error("Unsupported report version: {0}")]
	UnsupportedVersion(u16),
	/// The blob cannot be sliced into the expected field widths.
	#[error("Malformed report payload: {0}")]
	Malformed(String),
}

/// Splits a raw signed report into its context words and report payload.
pub fn decode_full_report(raw: &[u8]) -> Result<([B256; 3], Bytes), CodecError> {
	<([B256; 3], Bytes)>::abi_decode(raw)
		.map_err(|e| CodecError::Malformed(format!("Invalid report envelope: {}", e)))
}

/// Encodes context words and a report payload into the envelope layout.
pub fn encode_full_report(context: [B256; 3], report_data: &Bytes) -> Bytes {
	(context, report_data.clone()).abi_encode().into()
}

/// Reads the schema version marker from a report payload.
///
/// The marker is the big-endian u16 prefix of the payload's feed id.
pub fn report_version(report_data: &[u8]) -> Result<u16, CodecError> {
	if report_data.len() < 2 {
		return Err(CodecError::Malformed(
			"Report payload shorter than its version marker".to_string(),
		));
	}
	Ok(u16::from_be_bytes([report_data[0], report_data[1]]))
}

/// Decodes a report payload into its structured, version-tagged form.
pub fn decode_report_data(report_data: &[u8]) -> Result<DecodedReport, CodecError> {
	match report_version(report_data)? {
		3 => {
			let data = ReportDataV3::abi_decode(report_data)
				.map_err(|e| CodecError::Malformed(format!("Invalid V3 payload: {}", e)))?;
			Ok(DecodedReport::V3(ReportV3 {
				feed_id: data.feedId,
				valid_from_timestamp: data.validFromTimestamp,
				observations_timestamp: data.observationsTimestamp,
				native_fee: data.nativeFee,
				link_fee: data.linkFee,
				expires_at: data.expiresAt,
				price: data.price,
				bid: data.bid,
				ask: data.ask,
			}))
		},
		4 => {
			let data = ReportDataV4::abi_decode(report_data)
				.map_err(|e| CodecError::Malformed(format!("Invalid V4 payload: {}", e)))?;
			Ok(DecodedReport::V4(ReportV4 {
				feed_id: data.feedId,
				valid_from_timestamp: data.validFromTimestamp,
				observations_timestamp: data.observationsTimestamp,
				native_fee: data.nativeFee,
				link_fee: data.linkFee,
				expires_at: data.expiresAt,
				price: data.price,
				market_status: data.marketStatus,
			}))
		},
		version => Err(CodecError::UnsupportedVersion(version)),
	}
}

/// Encodes a structured report back into its payload wire layout.
pub fn encode_report_data(report: &DecodedReport) -> Bytes {
	match report {
		DecodedReport::V3(report) => ReportDataV3 {
			feedId: report.feed_id,
			validFromTimestamp: report.valid_from_timestamp,
			observationsTimestamp: report.observations_timestamp,
			nativeFee: report.native_fee,
			linkFee: report.link_fee,
			expiresAt: report.expires_at,
			price: report.price,
			bid: report.bid,
			ask: report.ask,
		}
		.abi_encode()
		.into(),
		DecodedReport::V4(report) => ReportDataV4 {
			feedId: report.feed_id,
			validFromTimestamp: report.valid_from_timestamp,
			observationsTimestamp: report.observations_timestamp,
			nativeFee: report.native_fee,
			linkFee: report.link_fee,
			expiresAt: report.expires_at,
			price: report.price,
			marketStatus: report.market_status,
		}
		.abi_encode()
		.into(),
	}
}
