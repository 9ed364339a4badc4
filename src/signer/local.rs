use alloy::consensus::SignableTransaction;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use super::{SignedTransaction, TransactionSigner};
use crate::error::{Error, Result};
use crate::tx_builder::UnsignedTransaction;

/// Signs with a secp256k1 key held in memory. Nonces come from RFC 6979,
/// so no entropy source is involved.
pub struct LocalKeySigner {
	key: PrivateKeySigner,
}

impl LocalKeySigner {
	pub fn new(key: PrivateKeySigner) -> Self {
		Self { key }
	}
}

impl TransactionSigner for LocalKeySigner {
	fn address(&self) -> Address {
		self.key.address()
	}

	fn sign(&self, tx: &UnsignedTransaction, chain_id: u64) -> Result<SignedTransaction> {
		let legacy = tx.to_legacy(chain_id);
		let signature = self
			.key
			.sign_hash_sync(&legacy.signature_hash())
			.map_err(|e| Error::Signing(e.to_string()))?;

		tracing::debug!(chain_id, nonce = tx.nonce, "transaction signed");
		Ok(SignedTransaction::new(legacy.into_signed(signature), chain_id))
	}
}
