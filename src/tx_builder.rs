use alloy::consensus::TxLegacy;
use alloy::primitives::{Address, Bytes, TxKind, U256};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::rpc::ChainClient;
use crate::units::{self, Unit};

/// Gas consumed by a plain value transfer with no call data.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// A legacy value transfer that has not been signed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
	pub nonce: u64,
	pub gas_limit: u64,
	/// Wei per gas unit.
	pub gas_price: u128,
	pub to: Address,
	pub value: U256,
	pub data: Bytes,
}

impl UnsignedTransaction {
	/// The consensus form bound to `chain_id`, ready for EIP-155 signing.
	pub fn to_legacy(&self, chain_id: u64) -> TxLegacy {
		TxLegacy {
			chain_id: Some(chain_id),
			nonce: self.nonce,
			gas_price: self.gas_price,
			gas_limit: self.gas_limit,
			to: TxKind::Call(self.to),
			value: self.value,
			input: self.data.clone(),
		}
	}
}

/// Assemble a transfer of `value` wei to `to`.
pub fn build_transfer(nonce: u64, to: Address, value: U256, gas_price: u128) -> UnsignedTransaction {
	UnsignedTransaction {
		nonce,
		gas_limit: TRANSFER_GAS_LIMIT,
		gas_price,
		to,
		value,
		data: Bytes::new(),
	}
}

/// Where the gas price comes from. Exactly one source is ever used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPrice {
	/// Explicit price in wei.
	Fixed(u128),
	/// Ask the node via `eth_gasPrice`.
	Suggested,
}

impl GasPrice {
	/// Interpret a `--gas` value in gwei. Any negative value requests the
	/// node's suggestion.
	pub fn from_gwei(gwei: Decimal) -> Result<Self> {
		if gwei < Decimal::ZERO {
			return Ok(Self::Suggested);
		}
		let wei = units::to_wei(gwei, Unit::Gwei)?;
		u128::try_from(wei)
			.map(Self::Fixed)
			.map_err(|_| Error::InvalidAmount(format!("gas price {gwei} gwei is too large")))
	}

	pub async fn resolve(self, client: &dyn ChainClient) -> Result<u128> {
		match self {
			Self::Fixed(wei) => Ok(wei),
			Self::Suggested => client.suggest_gas_price().await,
		}
	}
}
