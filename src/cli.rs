use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::RPC_ENDPOINT_ENV;
use crate::output::OutputFormat;
use crate::units::{parse_amount, Unit};

#[derive(Parser)]
#[command(
	name = "ethio",
	about = "Query balances and send ether over Ethereum JSON-RPC.",
	version
)]
pub struct Cli {
	/// JSON-RPC endpoint of the node.
	#[arg(long, env = RPC_ENDPOINT_ENV, global = true)]
	pub rpc_endpoint: Option<String>,

	/// Output format.
	#[arg(long, value_enum, ignore_case = true, global = true)]
	pub output_format: Option<OutputFormat>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Check address balance.
	Balance(BalanceArgs),

	/// Send ether.
	Send(SendArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BalanceArgs {
	/// Address to query.
	pub address: Option<String>,

	/// Address to query; takes precedence over the positional argument.
	#[arg(long)]
	pub addr: Option<String>,

	/// Block number (-1 = current).
	#[arg(long, default_value_t = -1, allow_negative_numbers = true)]
	pub block_number: i64,

	/// Amount unit: eth, wei or gwei.
	#[arg(long, default_value_t = Unit::Eth, value_parser = Unit::from_str)]
	pub unit: Unit,
}

#[derive(Args, Debug, Clone)]
pub struct SendArgs {
	/// Address of the receiver.
	#[arg(long)]
	pub addr: Option<String>,

	/// Private key of the sender (hex).
	#[arg(long)]
	pub key: Option<String>,

	/// Amount unit: eth, wei or gwei.
	#[arg(long, default_value_t = Unit::Eth, value_parser = Unit::from_str)]
	pub unit: Unit,

	/// Amount to send.
	#[arg(long, default_value = "0", value_parser = parse_amount)]
	pub amount: Decimal,

	/// Gas price in gwei (-1 for auto set).
	#[arg(
		long,
		default_value = "30",
		allow_negative_numbers = true,
		value_parser = parse_amount
	)]
	pub gas: Decimal,
}
