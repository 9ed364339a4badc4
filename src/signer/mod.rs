pub mod local;

use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, Signature, B256, U256};

use crate::account::Account;
use crate::error::{Error, Result};
use crate::tx_builder::UnsignedTransaction;

/// Produces replay-protected (EIP-155) signatures over unsigned transfers.
///
/// Implementations must be deterministic: identical fields, key and chain
/// id always give byte-identical `(v, r, s)`.
pub trait TransactionSigner: Send + Sync {
	/// The address whose key produces the signatures.
	fn address(&self) -> Address;

	/// Sign `tx` for the chain identified by `chain_id`.
	fn sign(&self, tx: &UnsignedTransaction, chain_id: u64) -> Result<SignedTransaction>;
}

/// Build a signer for an account resolved from a private key.
pub fn from_account(account: &Account) -> Result<Box<dyn TransactionSigner>> {
	let key = account
		.signer()
		.ok_or_else(|| Error::Signing(format!("no private key for {}", account.address())))?;
	Ok(Box::new(local::LocalKeySigner::new(key.clone())))
}

/// `v` value of a legacy signature bound to `chain_id`.
pub fn eip155_v(y_parity: bool, chain_id: u64) -> u64 {
	u64::from(y_parity) + chain_id * 2 + 35
}

/// A signed legacy transfer, ready to broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
	inner: Signed<TxLegacy>,
	chain_id: u64,
}

impl SignedTransaction {
	pub(crate) fn new(inner: Signed<TxLegacy>, chain_id: u64) -> Self {
		Self { inner, chain_id }
	}

	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	pub fn transaction(&self) -> &TxLegacy {
		self.inner.tx()
	}

	pub fn signature(&self) -> &Signature {
		self.inner.signature()
	}

	pub fn v(&self) -> u64 {
		eip155_v(self.signature().v(), self.chain_id)
	}

	pub fn r(&self) -> U256 {
		self.signature().r()
	}

	pub fn s(&self) -> U256 {
		self.signature().s()
	}

	/// Keccak hash of the signed encoding; the id the network reports.
	pub fn hash(&self) -> B256 {
		*self.inner.hash()
	}

	/// RLP bytes for `eth_sendRawTransaction`.
	pub fn raw(&self) -> Bytes {
		TxEnvelope::Legacy(self.inner.clone()).encoded_2718().into()
	}

	/// Recover the signing address as if the transaction targeted
	/// `chain_id`. A different chain id yields a different (wrong) address
	/// or nothing at all.
	pub fn recover_signer(&self, chain_id: u64) -> Option<Address> {
		let mut tx = self.inner.tx().clone();
		tx.chain_id = Some(chain_id);
		self.signature()
			.recover_address_from_prehash(&tx.signature_hash())
			.ok()
	}

	/// Whether this signature is acceptable on `chain_id` as coming from
	/// `signer`: the `v` value must encode that chain and the recovered
	/// address must match.
	pub fn is_valid_for(&self, chain_id: u64, signer: Address) -> bool {
		self.v() == eip155_v(self.signature().v(), chain_id)
			&& self.recover_signer(chain_id) == Some(signer)
	}
}
