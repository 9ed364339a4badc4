use std::io::Write;

use alloy::primitives::Address;

use crate::account;
use crate::cli::BalanceArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::input::{self, Field, InputSource};
use crate::output::{self, BalanceRecord};
use crate::rpc::{BlockSelector, ChainClient, Connector};
use crate::units::{self, Unit};

/// Resolve the address -> read the balance -> convert -> print.
pub async fn run(
	settings: &Settings,
	args: &BalanceArgs,
	input: &dyn InputSource,
	connector: &dyn Connector,
	out: &mut dyn Write,
) -> Result<()> {
	let supplied = args.addr.as_deref().or(args.address.as_deref());
	let address = account::resolve_address(&input::resolve(supplied, Field::Address, input)?)?;

	let record = {
		let client = connector.connect(&settings.rpc_endpoint)?;
		query(client.as_ref(), address, args.block_number.into(), args.unit).await?
	};

	output::write(out, settings.output_format, &record)
}

/// Balance of `address` at `block`, expressed in `unit`.
pub async fn query(
	client: &dyn ChainClient,
	address: Address,
	block: BlockSelector,
	unit: Unit,
) -> Result<BalanceRecord> {
	let wei = client.get_balance(address, block).await?;
	tracing::debug!(%address, ?block, %wei, "balance fetched");

	Ok(BalanceRecord {
		amount: units::from_wei(wei, unit),
	})
}
