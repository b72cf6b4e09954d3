//! Ark Tools CLI
//!
//! Lists, inspects, creates, updates and deletes tools in an Ark namespace.
//!
//! # Configuration
//! Set `ARK_API_URL` / `ARK_API_TOKEN` / `ARK_NAMESPACE`, configure
//! `~/.ark/config.toml`, or pass `--api-url`, `--token` and `--namespace`.

use clap::Parser;

use ark_common::{Config, HttpApiClient};
use ark_tools::cli::{run, Cli};
use ark_tools::ToolsService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    ark_common::init_tracing("ark_tools", cli.verbose)?;

    let mut config = Config::load()?;
    cli.apply_to(&mut config);

    let client = HttpApiClient::new(&config.api)?;
    tracing::info!("Ark API: {} (namespace {})", client.base_url(), config.api.namespace);
    let service = ToolsService::new(client);

    run(cli.command, &service, &config.api.namespace).await
}
