use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::signer::SignedTransaction;

/// Block at which a balance is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSelector {
	/// The chain's current head.
	#[default]
	Latest,
	Number(u64),
}

impl From<i64> for BlockSelector {
	/// Negative numbers select the current head.
	fn from(n: i64) -> Self {
		u64::try_from(n).map(Self::Number).unwrap_or(Self::Latest)
	}
}

impl From<BlockSelector> for BlockId {
	fn from(block: BlockSelector) -> Self {
		match block {
			BlockSelector::Latest => BlockId::Number(BlockNumberOrTag::Latest),
			BlockSelector::Number(n) => BlockId::Number(BlockNumberOrTag::Number(n)),
		}
	}
}

/// The chain reads and the single write the pipelines need.
///
/// Every call is one blocking round trip with no retry. Failures carry the
/// stage that failed and the transport error underneath.
#[async_trait]
pub trait ChainClient: Send + Sync {
	async fn get_balance(&self, address: Address, block: BlockSelector) -> Result<U256>;

	/// Next nonce for `address`, counting transactions still in the mempool.
	async fn get_pending_nonce(&self, address: Address) -> Result<u64>;

	/// Node's current gas price estimate in wei.
	async fn suggest_gas_price(&self) -> Result<u128>;

	async fn get_chain_id(&self) -> Result<u64>;

	/// Submit raw signed bytes and return the transaction hash.
	async fn broadcast(&self, tx: &SignedTransaction) -> Result<B256>;
}

/// Opens a client for an endpoint. The pipelines call this right before
/// their first network request and drop the client on every exit path.
pub trait Connector: Send + Sync {
	fn connect(&self, endpoint: &str) -> Result<Box<dyn ChainClient>>;
}

/// Connects over HTTP JSON-RPC.
pub struct HttpConnector;

impl Connector for HttpConnector {
	fn connect(&self, endpoint: &str) -> Result<Box<dyn ChainClient>> {
		Ok(Box::new(RpcClient::new(endpoint)?))
	}
}

/// Thin wrapper around an alloy HTTP provider.
pub struct RpcClient {
	provider: DynProvider,
	url: String,
}

impl RpcClient {
	pub fn new(url: &str) -> Result<Self> {
		let parsed: url::Url = url.parse().map_err(|e: url::ParseError| Error::InvalidEndpoint {
			url: url.to_owned(),
			reason: e.to_string(),
		})?;

		tracing::debug!(url, "opening rpc connection");
		Ok(Self {
			provider: ProviderBuilder::new().connect_http(parsed).erased(),
			url: url.to_owned(),
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

impl Drop for RpcClient {
	fn drop(&mut self) {
		tracing::trace!(url = %self.url, "rpc connection released");
	}
}

#[async_trait]
impl ChainClient for RpcClient {
	async fn get_balance(&self, address: Address, block: BlockSelector) -> Result<U256> {
		self.provider
			.get_balance(address)
			.block_id(block.into())
			.await
			.map_err(Error::rpc("get balance"))
	}

	async fn get_pending_nonce(&self, address: Address) -> Result<u64> {
		self.provider
			.get_transaction_count(address)
			.pending()
			.await
			.map_err(Error::rpc("get pending nonce"))
	}

	async fn suggest_gas_price(&self) -> Result<u128> {
		self.provider
			.get_gas_price()
			.await
			.map_err(Error::rpc("get suggested gas price"))
	}

	async fn get_chain_id(&self) -> Result<u64> {
		self.provider
			.get_chain_id()
			.await
			.map_err(Error::rpc("get chain id"))
	}

	async fn broadcast(&self, tx: &SignedTransaction) -> Result<B256> {
		let pending = self
			.provider
			.send_raw_transaction(&tx.raw())
			.await
			.map_err(broadcast_error)?;
		Ok(*pending.tx_hash())
	}
}

// The node answering with a JSON-RPC error means it refused the
// transaction; anything else is a transport failure.
fn broadcast_error(err: TransportError) -> Error {
	match err {
		RpcError::ErrorResp(payload) => Error::BroadcastRejected(payload.message.to_string()),
		other => Error::rpc("send transaction")(other),
	}
}
