//! Entry point: migrate RDNS from 0.4.x to 0.5.x
//!
//! Reads configuration from flags/environment, checks for root, then runs the
//! frozen-domain and record migrations against the configured endpoints.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use cli::Cli;
use rdns_migrate_core::{EtcdV2Store, HttpTransport, MigrationService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    if !nix::unistd::Uid::effective().is_root() {
        bail!("{}: need to be root", env!("CARGO_PKG_NAME"));
    }

    let config = cli.to_config();
    config.validate()?;
    tracing::info!(
        "migrating {} ({}) -> {} ({})",
        config.src_api_endpoint,
        config.src_domain,
        config.dst_api_endpoint,
        config.dst_domain
    );

    let store = EtcdV2Store::new(config.src_endpoints.clone())
        .context("failed to set up the source store")?;
    let transport = HttpTransport::new(config.api_timeout)?;
    let service = MigrationService::new(&config, Arc::new(store), Arc::new(transport));

    let report = service.run().await?;
    tracing::info!(
        "done: {} record(s) migrated, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(())
}
