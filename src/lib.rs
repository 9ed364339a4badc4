pub mod account;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod rpc;
pub mod signer;
pub mod tx_builder;
pub mod units;
