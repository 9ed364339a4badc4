use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ethio::cli::{Cli, Command};
use ethio::commands;
use ethio::config::{Config, Settings};
use ethio::input;
use ethio::rpc::HttpConnector;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// Logs go to stderr; stdout carries only the result.
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "ethio=warn".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let config = Config::load().context("failed to load config file")?;
	let settings = Settings::resolve(cli.rpc_endpoint.as_deref(), cli.output_format, &config)?;
	let input = input::detect();
	let mut stdout = std::io::stdout();

	let pipeline = async {
		match &cli.command {
			Command::Balance(args) => {
				commands::balance::run(&settings, args, input.as_ref(), &HttpConnector, &mut stdout).await
			}
			Command::Send(args) => {
				commands::send::run(&settings, args, input.as_ref(), &HttpConnector, &mut stdout).await
			}
		}
	};

	// Dropping the pipeline on Ctrl-C aborts any request in flight.
	tokio::select! {
		res = pipeline => Ok(res?),
		_ = tokio::signal::ctrl_c() => anyhow::bail!("interrupted"),
	}
}
