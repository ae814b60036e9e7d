pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "dreamfund=info";

/// Initializes the global tracing subscriber. Output goes to stderr so that
/// command output on stdout stays clean for scripts.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
