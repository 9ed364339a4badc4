//! In-memory chain used by the pipeline tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use alloy::transports::TransportErrorKind;
use async_trait::async_trait;

use ethio::error::{Error, Result};
use ethio::input::{Field, InputSource};
use ethio::rpc::{BlockSelector, ChainClient, Connector};
use ethio::signer::SignedTransaction;

// Anvil's first dev account.
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDR: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const RECEIVER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

#[derive(Default)]
pub struct MockChain {
	pub balance: U256,
	pub nonce: u64,
	pub gas_price: u128,
	pub chain_id: u64,
	/// Reject broadcasts with this node message.
	pub reject: Option<String>,
	/// Fail every read with a transport error.
	pub unreachable: bool,
	pub calls: Mutex<Vec<&'static str>>,
	pub balance_blocks: Mutex<Vec<BlockSelector>>,
	pub broadcasts: Mutex<Vec<SignedTransaction>>,
}

impl MockChain {
	pub fn new() -> Self {
		Self {
			nonce: 4,
			gas_price: 12_000_000_000,
			chain_id: 11_155_111,
			..Default::default()
		}
	}

	pub fn calls(&self) -> Vec<&'static str> {
		self.calls.lock().unwrap().clone()
	}

	pub fn last_broadcast(&self) -> SignedTransaction {
		self.broadcasts.lock().unwrap().last().cloned().expect("nothing broadcast")
	}

	fn record(&self, call: &'static str) -> Result<()> {
		self.calls.lock().unwrap().push(call);
		if self.unreachable {
			return Err(Error::rpc(call)(TransportErrorKind::custom_str("connection refused")));
		}
		Ok(())
	}
}

#[async_trait]
impl ChainClient for MockChain {
	async fn get_balance(&self, _address: Address, block: BlockSelector) -> Result<U256> {
		self.record("get balance")?;
		self.balance_blocks.lock().unwrap().push(block);
		Ok(self.balance)
	}

	async fn get_pending_nonce(&self, _address: Address) -> Result<u64> {
		self.record("get pending nonce")?;
		Ok(self.nonce)
	}

	async fn suggest_gas_price(&self) -> Result<u128> {
		self.record("get suggested gas price")?;
		Ok(self.gas_price)
	}

	async fn get_chain_id(&self) -> Result<u64> {
		self.record("get chain id")?;
		Ok(self.chain_id)
	}

	async fn broadcast(&self, tx: &SignedTransaction) -> Result<B256> {
		self.record("send transaction")?;
		if let Some(message) = &self.reject {
			return Err(Error::BroadcastRejected(message.clone()));
		}
		self.broadcasts.lock().unwrap().push(tx.clone());
		Ok(tx.hash())
	}
}

/// Hands out the shared mock and counts connections.
pub struct MockConnector {
	pub chain: Arc<MockChain>,
	pub connects: AtomicUsize,
}

impl MockConnector {
	pub fn new(chain: MockChain) -> Self {
		Self {
			chain: Arc::new(chain),
			connects: AtomicUsize::new(0),
		}
	}

	pub fn connects(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}
}

struct Shared(Arc<MockChain>);

#[async_trait]
impl ChainClient for Shared {
	async fn get_balance(&self, address: Address, block: BlockSelector) -> Result<U256> {
		self.0.get_balance(address, block).await
	}

	async fn get_pending_nonce(&self, address: Address) -> Result<u64> {
		self.0.get_pending_nonce(address).await
	}

	async fn suggest_gas_price(&self) -> Result<u128> {
		self.0.suggest_gas_price().await
	}

	async fn get_chain_id(&self) -> Result<u64> {
		self.0.get_chain_id().await
	}

	async fn broadcast(&self, tx: &SignedTransaction) -> Result<B256> {
		self.0.broadcast(tx).await
	}
}

impl Connector for MockConnector {
	fn connect(&self, _endpoint: &str) -> Result<Box<dyn ChainClient>> {
		self.connects.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(Shared(self.chain.clone())))
	}
}

/// Answers prompts from a fixed script.
pub struct Scripted(RefCell<VecDeque<String>>);

impl Scripted {
	pub fn new(lines: &[&str]) -> Self {
		Self(RefCell::new(lines.iter().map(|s| s.to_string()).collect()))
	}
}

impl InputSource for Scripted {
	fn read(&self, field: Field) -> Result<String> {
		self.0
			.borrow_mut()
			.pop_front()
			.ok_or(Error::MissingInput(field.label()))
	}
}
