use std::fmt;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::error::{Error, Result};

/// An address, plus the signing key when this invocation sends from it.
///
/// The address of a signing account is always derived from its key.
#[derive(Clone)]
pub struct Account {
	address: Address,
	signer: Option<PrivateKeySigner>,
}

impl Account {
	/// A watch-only account with no signing material.
	pub fn watch(address: Address) -> Self {
		Self {
			address,
			signer: None,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	pub fn signer(&self) -> Option<&PrivateKeySigner> {
		self.signer.as_ref()
	}
}

impl fmt::Debug for Account {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Account")
			.field("address", &self.address)
			.field("has_key", &self.signer.is_some())
			.finish()
	}
}

/// Parse a hex-encoded secp256k1 private key (optionally `0x`-prefixed)
/// and derive the account it controls.
pub fn resolve_private_key(input: &str) -> Result<Account> {
	let clean = strip_hex_prefix(input.trim());
	if clean.len() != 64 {
		return Err(Error::InvalidKey(format!(
			"expected 64 hex characters, got {}",
			clean.len()
		)));
	}

	let mut bytes = [0u8; 32];
	hex::decode_to_slice(clean, &mut bytes)
		.map_err(|e| Error::InvalidKey(format!("not a hex string: {e}")))?;

	// Rejects zero and values at or above the curve order.
	let signer = PrivateKeySigner::from_slice(&bytes)
		.map_err(|_| Error::InvalidKey("not a valid secp256k1 scalar".into()))?;

	Ok(Account {
		address: signer.address(),
		signer: Some(signer),
	})
}

/// Validate a 20-byte hex address. Mixed case is accepted without checksum
/// verification.
pub fn resolve_address(input: &str) -> Result<Address> {
	let clean = strip_hex_prefix(input.trim());
	if clean.len() != 40 {
		return Err(Error::InvalidAddress(format!(
			"'{input}' should be 20 bytes (40 hex characters)"
		)));
	}

	let mut bytes = [0u8; 20];
	hex::decode_to_slice(clean, &mut bytes)
		.map_err(|e| Error::InvalidAddress(format!("'{input}' is not hex: {e}")))?;

	Ok(Address::from(bytes))
}

fn strip_hex_prefix(s: &str) -> &str {
	s.strip_prefix("0x")
		.or_else(|| s.strip_prefix("0X"))
		.unwrap_or(s)
}
