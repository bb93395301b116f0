//! Network catalogue for multi-chain report verification.
//!
//! This module defines the static set of networks the verifier can submit to,
//! including RPC endpoints and native currency metadata. The catalogue is
//! immutable; the currently selected network is a single chain id held in the
//! external settings store.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Native currency metadata for a network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
}

/// Definition of a single supported network.
///
/// Descriptors are immutable once defined. The active selection is held in the
/// settings store as a bare chain id and matched against this catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainDescriptor {
	/// Numeric chain id (EIP-155).
	pub id: u64,
	/// Human-readable network name.
	pub name: String,
	/// Native currency used for gas.
	pub currency: NativeCurrency,
	/// Public RPC endpoints, in fallback order.
	pub rpc_urls: Vec<String>,
	/// Whether this is a test network.
	pub testnet: bool,
}

impl ChainDescriptor {
	/// First available RPC URL, if any endpoint is configured.
	pub fn rpc_url(&self) -> Option<&str> {
		self.rpc_urls.first().map(String::as_str)
	}
}

fn chain(
	id: u64,
	name: &str,
	currency: (&str, &str),
	rpc_url: &str,
	testnet: bool,
) -> ChainDescriptor {
	ChainDescriptor {
		id,
		name: name.to_string(),
		currency: NativeCurrency {
			name: currency.0.to_string(),
			symbol: currency.1.to_string(),
			decimals: 18,
		},
		rpc_urls: vec![rpc_url.to_string()],
		testnet,
	}
}

static CHAINS: Lazy<Vec<ChainDescriptor>> = Lazy::new(|| {
	vec![
		chain(
			42161,
			"Arbitrum One",
			("Ether", "ETH"),
			"https://arb1.arbitrum.io/rpc",
			false,
		),
		chain(
			421614,
			"Arbitrum Sepolia",
			("Ether", "ETH"),
			"https://sepolia-rollup.arbitrum.io/rpc",
			true,
		),
		chain(
			43114,
			"Avalanche",
			("AVAX", "AVAX"),
			"https://api.avax.network/ext/bc/C/rpc",
			false,
		),
		chain(
			43113,
			"Avalanche Fuji",
			("AVAX", "AVAX"),
			"https://api.avax-test.network/ext/bc/C/rpc",
			true,
		),
		chain(8453, "Base", ("Ether", "ETH"), "https://mainnet.base.org", false),
		chain(
			84532,
			"Base Sepolia",
			("Ether", "ETH"),
			"https://sepolia.base.org",
			true,
		),
		chain(
			204,
			"opBNB",
			("BNB", "BNB"),
			"https://opbnb-mainnet-rpc.bnbchain.org",
			false,
		),
		chain(
			5611,
			"opBNB Testnet",
			("BNB", "tBNB"),
			"https://opbnb-testnet-rpc.bnbchain.org",
			true,
		),
		chain(
			10,
			"OP Mainnet",
			("Ether", "ETH"),
			"https://mainnet.optimism.io",
			false,
		),
		chain(
			11155420,
			"OP Sepolia",
			("Ether", "ETH"),
			"https://sepolia.optimism.io",
			true,
		),
		chain(534352, "Scroll", ("Ether", "ETH"), "https://rpc.scroll.io", false),
		chain(
			534351,
			"Scroll Sepolia",
			("Ether", "ETH"),
			"https://sepolia-rpc.scroll.io",
			true,
		),
		chain(109, "Shibarium", ("Bone", "BONE"), "https://www.shibrpc.com", false),
		chain(
			157,
			"Puppynet Shibarium",
			("Bone", "BONE"),
			"https://puppynet.shibrpc.com",
			true,
		),
		chain(
			1946,
			"Soneium Minato",
			("Ether", "ETH"),
			"https://rpc.minato.soneium.org",
			true,
		),
		chain(146, "Sonic", ("Sonic", "S"), "https://rpc.soniclabs.com", false),
		chain(
			64165,
			"Sonic Blaze Testnet",
			("Sonic", "S"),
			"https://rpc.testnet.soniclabs.com",
			true,
		),
		chain(
			480,
			"World Chain",
			("Ether", "ETH"),
			"https://worldchain-mainnet.g.alchemy.com/public",
			false,
		),
		chain(
			4801,
			"World Chain Sepolia",
			("Ether", "ETH"),
			"https://worldchain-sepolia.g.alchemy.com/public",
			true,
		),
	]
});

/// All supported networks.
pub fn all() -> &'static [ChainDescriptor] {
	&CHAINS
}

/// Looks up a network by chain id.
pub fn by_id(id: u64) -> Option<&'static ChainDescriptor> {
	CHAINS.iter().find(|chain| chain.id == id)
}
