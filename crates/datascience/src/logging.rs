//! Log output through `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Does nothing if a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter);
}

/// Install a formatting subscriber with an explicit filter directive such as
/// `"ds_optim=debug"`. Does nothing if a subscriber is already installed.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
