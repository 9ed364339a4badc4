use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::OutputFormat;

/// Endpoint used when neither flag, environment nor config file names one.
pub const DEFAULT_RPC_ENDPOINT: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Environment variable consulted for the endpoint when no flag is given.
pub const RPC_ENDPOINT_ENV: &str = "ETHIO_RPC_ENDPOINT";

/// Optional defaults read from `~/.ethio/config.toml`. Never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
	pub rpc_endpoint: Option<String>,
	pub output_format: Option<String>,
}

impl Config {
	/// Directory where CLI state is looked up (~/.ethio/).
	pub fn dir() -> Option<PathBuf> {
		dirs::home_dir().map(|home| home.join(".ethio"))
	}

	/// Path to the config file.
	pub fn path() -> Option<PathBuf> {
		Self::dir().map(|dir| dir.join("config.toml"))
	}

	/// Load config from disk, falling back to defaults if no file exists.
	pub fn load() -> anyhow::Result<Self> {
		match Self::path() {
			Some(path) if path.exists() => Self::load_from(&path),
			_ => Ok(Self::default()),
		}
	}

	pub fn load_from(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path)?;
		Ok(toml::from_str(&content)?)
	}
}

/// Process-wide options, resolved once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub rpc_endpoint: String,
	pub output_format: OutputFormat,
}

impl Settings {
	/// Merge command-line values over the config file over built-in
	/// defaults. `rpc_endpoint` already includes the environment variable
	/// (clap reads it).
	pub fn resolve(
		rpc_endpoint: Option<&str>,
		output_format: Option<OutputFormat>,
		config: &Config,
	) -> Result<Self> {
		let rpc_endpoint = rpc_endpoint
			.or(config.rpc_endpoint.as_deref())
			.unwrap_or(DEFAULT_RPC_ENDPOINT)
			.to_owned();

		let output_format = match output_format {
			Some(f) => f,
			None => match config.output_format.as_deref() {
				Some(s) => s.parse()?,
				None => OutputFormat::default(),
			},
		};

		Ok(Self {
			rpc_endpoint,
			output_format,
		})
	}
}
