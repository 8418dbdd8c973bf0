use anyhow::{Context, Result};
use clap::Parser;
use shopping_cart_cli::{
    cli::{Args, CartSession},
    utils::{logger::init_cli_logger, Config},
};
use std::io;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()
        .context("Failed to load configuration")?
        .with_args(&args);
    init_cli_logger(&config.log_level);

    tracing::info!(
        "Configuration loaded (log_level={}, on_malformed={}, format={}, strict={})",
        config.log_level,
        config.on_malformed,
        config.summary_format,
        config.strict
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = CartSession::new(stdin.lock(), stdout.lock(), config.session_options());

    // The exit code stays 0 even when the session is cut short.
    if let Err(e) = session.run() {
        tracing::error!("Cart session ended with an error: {}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}
