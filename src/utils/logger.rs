use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the cart dialogue.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_cli_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
