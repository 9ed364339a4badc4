use std::io::Write;
use std::str::FromStr;

use alloy::primitives::{Address, B256, U256};
use clap::ValueEnum;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::units::Amount;

/// How result records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
	/// Bare value only.
	#[default]
	Native,
	Json,
	Yaml,
}

impl FromStr for OutputFormat {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"native" => Ok(Self::Native),
			"json" => Ok(Self::Json),
			"yaml" => Ok(Self::Yaml),
			_ => Err(Error::InvalidOutputFormat(s.to_owned())),
		}
	}
}

/// A pipeline result that can be printed in every format.
pub trait Report: Serialize {
	/// The single value printed in native format.
	fn native(&self) -> String;
}

/// Balance of an address in the requested unit.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRecord {
	pub amount: Amount,
}

impl Serialize for BalanceRecord {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut s = serializer.serialize_struct("BalanceRecord", 2)?;
		match self.amount {
			Amount::Eth(v) => s.serialize_field("amount", &v)?,
			Amount::Wei(v) | Amount::Gwei(v) => s.serialize_field("amount", &Integer(v))?,
		}
		s.serialize_field("unit", &self.amount.unit())?;
		s.end()
	}
}

impl Report for BalanceRecord {
	fn native(&self) -> String {
		self.amount.to_string()
	}
}

/// Outcome of a successful broadcast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
	#[serde(serialize_with = "checksummed")]
	pub from_addr: Address,
	#[serde(serialize_with = "checksummed")]
	pub to_addr: Address,
	/// Transferred value in wei.
	#[serde(serialize_with = "integer")]
	pub amount: U256,
	pub tx_hash: B256,
}

impl Report for TransferResult {
	fn native(&self) -> String {
		self.tx_hash.to_string()
	}
}

/// Render `report` to `out` in `format`.
pub fn write<R: Report>(out: &mut dyn Write, format: OutputFormat, report: &R) -> Result<()> {
	let text = match format {
		OutputFormat::Native => report.native() + "\n",
		OutputFormat::Json => {
			serde_json::to_string(report).map_err(|e| Error::Output(e.to_string()))? + "\n"
		}
		OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| Error::Output(e.to_string()))?,
	};
	out.write_all(text.as_bytes())
		.map_err(|e| Error::Output(e.to_string()))
}

// -- Serialization helpers --

/// Integers up to `u128` are numbers; anything wider becomes a decimal string.
struct Integer(U256);

impl Serialize for Integer {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match u128::try_from(self.0) {
			Ok(n) => serializer.serialize_u128(n),
			Err(_) => serializer.serialize_str(&self.0.to_string()),
		}
	}
}

fn integer<S: Serializer>(v: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	Integer(*v).serialize(serializer)
}

fn checksummed<S: Serializer>(a: &Address, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.serialize_str(&a.to_checksum(None))
}
