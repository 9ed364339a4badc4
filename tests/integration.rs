//! Integration tests that hit a public Sepolia RPC endpoint.
//!
//! These are marked `#[ignore]` by default because they require network
//! access. Run them explicitly with:
//!
//!   cargo test --test integration -- --ignored

use ethio::account::resolve_address;
use ethio::config::DEFAULT_RPC_ENDPOINT;
use ethio::rpc::{BlockSelector, ChainClient, RpcClient};

const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

// Sepolia beacon deposit contract.
const DEPOSIT_CONTRACT: &str = "0x7f02c3e3c98b133055b8b348b2ac625669ed295d";

#[tokio::test]
#[ignore]
async fn chain_id_is_sepolia() {
	let rpc = RpcClient::new(DEFAULT_RPC_ENDPOINT).unwrap();
	let chain_id = rpc.get_chain_id().await.expect("failed to fetch chain id");
	assert_eq!(chain_id, SEPOLIA_CHAIN_ID);
}

#[tokio::test]
#[ignore]
async fn gas_price_is_positive() {
	let rpc = RpcClient::new(DEFAULT_RPC_ENDPOINT).unwrap();
	let price = rpc.suggest_gas_price().await.expect("failed to fetch gas price");
	assert!(price > 0, "gas price should be positive, got {price}");
}

#[tokio::test]
#[ignore]
async fn balance_at_fixed_block_is_stable() {
	let rpc = RpcClient::new(DEFAULT_RPC_ENDPOINT).unwrap();
	let address = resolve_address(DEPOSIT_CONTRACT).unwrap();

	rpc.get_balance(address, BlockSelector::Latest)
		.await
		.expect("RPC call failed");

	// Archive access is not guaranteed on public nodes; only compare when
	// the old block is served.
	let block = BlockSelector::Number(1_000_000);
	if let Ok(first) = rpc.get_balance(address, block).await {
		let second = rpc.get_balance(address, block).await.expect("RPC call failed");
		assert_eq!(first, second);
	}
}

#[tokio::test]
#[ignore]
async fn contract_pending_nonce() {
	let rpc = RpcClient::new(DEFAULT_RPC_ENDPOINT).unwrap();
	let address = resolve_address(DEPOSIT_CONTRACT).unwrap();
	// Contracts never send transactions; their nonce stays at 0 or 1.
	let nonce = rpc.get_pending_nonce(address).await.expect("RPC call failed");
	assert!(nonce <= 1, "unexpected nonce {nonce}");
}

#[tokio::test]
async fn unreachable_endpoint_is_an_rpc_error() {
	// Port 9 (discard) is closed on test machines.
	let rpc = RpcClient::new("http://127.0.0.1:9").unwrap();
	let err = rpc.get_chain_id().await.unwrap_err();
	assert!(matches!(err, ethio::error::Error::Rpc { stage: "get chain id", .. }), "{err}");
}
