use std::io::Write;

use alloy::primitives::{Address, U256};

use crate::account;
use crate::cli::SendArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::input::{self, Field, InputSource};
use crate::output::{self, TransferResult};
use crate::rpc::{ChainClient, Connector};
use crate::signer::{self, TransactionSigner};
use crate::tx_builder::{self, GasPrice};
use crate::units;

/// A validated transfer, before any chain state has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
	pub to: Address,
	/// Value in wei.
	pub value: U256,
	pub gas_price: GasPrice,
}

/// Resolve inputs -> connect -> nonce -> gas price -> build -> chain id ->
/// sign -> broadcast -> print.
///
/// All user input is validated before the connection is opened, so a bad
/// unit, amount, address or key never causes network traffic.
pub async fn run(
	settings: &Settings,
	args: &SendArgs,
	input: &dyn InputSource,
	connector: &dyn Connector,
	out: &mut dyn Write,
) -> Result<()> {
	let to = account::resolve_address(&input::resolve(args.addr.as_deref(), Field::Address, input)?)?;
	let sender = account::resolve_private_key(&input::resolve(
		args.key.as_deref(),
		Field::PrivateKey,
		input,
	)?)?;

	let request = TransferRequest {
		to,
		value: units::to_wei(args.amount, args.unit)?,
		gas_price: GasPrice::from_gwei(args.gas)?,
	};
	let signer = signer::from_account(&sender)?;

	let result = {
		let client = connector.connect(&settings.rpc_endpoint)?;
		transfer(client.as_ref(), signer.as_ref(), &request).await?
	};

	output::write(out, settings.output_format, &result)
}

/// Build, sign and broadcast one transfer from `signer`'s address.
///
/// Chain state (pending nonce, gas price, chain id) is read fresh on every
/// call. A broadcast error may still leave the transaction in the node's
/// mempool; that cannot be told apart here.
pub async fn transfer(
	client: &dyn ChainClient,
	signer: &dyn TransactionSigner,
	request: &TransferRequest,
) -> Result<TransferResult> {
	let from = signer.address();

	let nonce = client.get_pending_nonce(from).await?;
	tracing::debug!(%from, nonce, "pending nonce fetched");

	let gas_price = request.gas_price.resolve(client).await?;
	tracing::debug!(gas_price, source = ?request.gas_price, "gas price resolved");

	let tx = tx_builder::build_transfer(nonce, request.to, request.value, gas_price);

	let chain_id = client.get_chain_id().await?;
	tracing::debug!(chain_id, "chain id fetched");

	let signed = signer.sign(&tx, chain_id)?;
	let tx_hash = client.broadcast(&signed).await?;
	if tx_hash != signed.hash() {
		tracing::warn!(%tx_hash, local = %signed.hash(), "node reported a different transaction hash");
	}
	tracing::info!(%tx_hash, %from, to = %request.to, value = %request.value, "transaction broadcast");

	Ok(TransferResult {
		from_addr: from,
		to_addr: request.to,
		amount: request.value,
		tx_hash,
	})
}
