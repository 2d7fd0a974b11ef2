use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "tabledeck=info";

/// Installs the global fmt subscriber, filtered by `RUST_LOG`.
/// Later calls leave the first subscriber in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
