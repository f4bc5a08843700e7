// src/main.rs

use anyhow::Result;
use clap::Parser;
use prettier_pipe::cli::Cli;
use prettier_pipe::config::ConfigBuilder;
use prettier_pipe::errors::Error;
use prettier_pipe::output::write_report;
use prettier_pipe::run;
use prettier_pipe::signal::setup_signal_handler;
use std::io::Write;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "prettier_pipe=debug".parse().unwrap()
                } else {
                    "prettier_pipe=info".parse().unwrap()
                },
            ),
        )
        .init();

    log::info!("Starting prettier-pipe v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Setup ---
    let cli = Cli::parse();

    // --- Configuration & Execution ---
    let config = ConfigBuilder::from_cli(cli).build()?;
    log::debug!("Configuration built successfully.");

    let token = setup_signal_handler()?;

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run(&config, &token));

    // --- Error Handling ---
    match result {
        Ok(summary) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_report(&mut out, &summary, config.mode)?;
            out.flush()?;
            if !summary.is_success(config.mode) {
                std::process::exit(1);
            }
        }
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(Error::NoFilesFound) => {
            eprintln!("prettier-pipe: No files found matching the specified inputs.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
