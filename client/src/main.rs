//! `kudos` entry-point: loads settings, wires the client, runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use kudos_client::ClientContext;
use kudos_client::config::{BuildMode, ClientSettings};
use kudos_client::inbound::cli::{Cli, execute};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    // Flags belong to clap; ortho_config only layers environment and file.
    let mut settings = ClientSettings::load_from_iter([OsString::from("kudos")])
        .wrap_err("failed to load client settings")?;
    if cli.api_base_url.is_some() {
        settings.api_base_url = cli.api_base_url;
    }
    if cli.storage_path.is_some() {
        settings.storage_path = cli.storage_path;
    }

    let context = ClientContext::from_settings(&settings, BuildMode::from_debug_assertions())?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;

    let mut stdout = io::stdout().lock();
    runtime.block_on(execute(&context, cli.command, &mut stdout))?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
