use alloy::transports::TransportError;
use thiserror::Error;

/// Everything that can abort a balance or send invocation.
#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid unit '{0}', it can be either eth, wei or gwei")]
	InvalidUnit(String),

	#[error("invalid output format '{0}', it can be native, json or yaml")]
	InvalidOutputFormat(String),

	#[error("invalid address: {0}")]
	InvalidAddress(String),

	/// Never carries the key itself.
	#[error("invalid private key: {0}")]
	InvalidKey(String),

	#[error("invalid amount: {0}")]
	InvalidAmount(String),

	#[error("invalid rpc endpoint '{url}': {reason}")]
	InvalidEndpoint { url: String, reason: String },

	#[error("no {0} supplied and no input available to read it from")]
	MissingInput(&'static str),

	#[error("failed to read {what} from input: {reason}")]
	Input { what: &'static str, reason: String },

	#[error("failed to {stage}: {source}")]
	Rpc {
		stage: &'static str,
		#[source]
		source: TransportError,
	},

	#[error("failed to sign transaction: {0}")]
	Signing(String),

	#[error("node rejected transaction: {0}")]
	BroadcastRejected(String),

	#[error("failed to write output: {0}")]
	Output(String),
}

impl Error {
	/// Malformed user input: unit, format, address, key, amount or endpoint.
	pub fn is_invalid_input(&self) -> bool {
		matches!(
			self,
			Self::InvalidUnit(_)
				| Self::InvalidOutputFormat(_)
				| Self::InvalidAddress(_)
				| Self::InvalidKey(_)
				| Self::InvalidAmount(_)
				| Self::InvalidEndpoint { .. }
		)
	}

	/// Wrap a transport failure with the stage it happened in.
	pub fn rpc(stage: &'static str) -> impl FnOnce(TransportError) -> Self {
		move |source| Self::Rpc { stage, source }
	}
}

pub type Result<T> = std::result::Result<T, Error>;
