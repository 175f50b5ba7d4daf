//! Logging setup.

use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Our crate at info, everything else at warn. `RUST_LOG` is appended.
const DEFAULT_FILTER: &str = "warn,drive_server=info";

/// Installs a `tracing` subscriber writing compact lines to stdout.
pub fn init_logging() {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let stdout_log = fmt::layer()
        .event_format(fmt::format().compact().with_line_number(true));

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("logging already initialized");
    }
}
