use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const WEI_PER_GWEI: u64 = 1_000_000_000;
pub const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;

/// Denominations of the native currency accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
	#[default]
	Eth,
	Wei,
	Gwei,
}

impl Unit {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eth => "eth",
			Self::Wei => "wei",
			Self::Gwei => "gwei",
		}
	}

	/// Number of wei in one of this unit.
	pub fn wei_factor(&self) -> u64 {
		match self {
			Self::Eth => WEI_PER_ETH,
			Self::Wei => 1,
			Self::Gwei => WEI_PER_GWEI,
		}
	}
}

impl fmt::Display for Unit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Unit {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"eth" => Ok(Self::Eth),
			"wei" => Ok(Self::Wei),
			"gwei" => Ok(Self::Gwei),
			_ => Err(Error::InvalidUnit(s.to_owned())),
		}
	}
}

/// A wei quantity converted into a display unit.
///
/// `Eth` is a float and therefore lossy; it exists for presentation only.
/// `Gwei` is exact integer division, truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
	Eth(f64),
	Wei(U256),
	Gwei(U256),
}

impl Amount {
	pub fn unit(&self) -> Unit {
		match self {
			Self::Eth(_) => Unit::Eth,
			Self::Wei(_) => Unit::Wei,
			Self::Gwei(_) => Unit::Gwei,
		}
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Eth(v) => write!(f, "{v}"),
			Self::Wei(v) | Self::Gwei(v) => write!(f, "{v}"),
		}
	}
}

/// Parse a decimal amount as typed on the command line.
///
/// Fractional digits beyond the precision of `Decimal` are dropped, never
/// rounded, so the parsed value is never larger than the input.
pub fn parse_amount(s: &str) -> Result<Decimal> {
	let s = s.trim();
	// Syntax check only; this parse rounds excess digits.
	Decimal::from_str(s).map_err(|e| Error::InvalidAmount(format!("'{s}': {e}")))?;

	let mut digits = s;
	loop {
		match Decimal::from_str_exact(digits) {
			Ok(amount) => return Ok(amount),
			Err(_) if digits.contains('.') => {
				digits = digits[..digits.len() - 1].trim_end_matches('.');
			}
			Err(e) => return Err(Error::InvalidAmount(format!("'{s}': {e}"))),
		}
	}
}

/// Scale a user-supplied decimal amount to wei.
///
/// Anything below one wei is truncated toward zero, so
/// `1.9999999999999999 gwei` becomes `1_999_999_999` wei.
pub fn to_wei(amount: Decimal, unit: Unit) -> Result<U256> {
	if amount < Decimal::ZERO {
		return Err(Error::InvalidAmount(format!("{amount} is negative")));
	}

	// mantissa < 2^96 and scale <= 28, so neither side can overflow.
	let scaled = U256::from(amount.mantissa().unsigned_abs()) * U256::from(unit.wei_factor());
	Ok(scaled / U256::from(10u128.pow(amount.scale())))
}

/// Convert an integer wei quantity to `unit` for display.
pub fn from_wei(wei: U256, unit: Unit) -> Amount {
	match unit {
		Unit::Eth => Amount::Eth(wei_to_f64(wei) / WEI_PER_ETH as f64),
		Unit::Wei => Amount::Wei(wei),
		Unit::Gwei => Amount::Gwei(wei / U256::from(WEI_PER_GWEI)),
	}
}

// Decimal digits always parse; values beyond f64 range become infinity.
fn wei_to_f64(wei: U256) -> f64 {
	wei.to_string().parse().unwrap_or(f64::INFINITY)
}
