//! Structured logging setup for the planet generator.
//!
//! The generator crates emit diagnostics through `tracing`; this crate wires
//! up a console subscriber with environment-based filtering so hosts get
//! consistent output without each wiring their own.

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when neither `RUST_LOG` nor an explicit filter is given.
const DEFAULT_FILTER: &str = "info";

/// Build the filter: `RUST_LOG` wins, then the explicit string, then `info`.
#[must_use]
pub fn env_filter(default: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default.unwrap_or(DEFAULT_FILTER)))
}

/// Install the global console subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset (e.g. `"debug"` or
/// `"tellus_planet=debug,info"`). Calling this more than once keeps the
/// first subscriber; subsequent calls are ignored rather than panicking so
/// tests and embedding hosts can both call it freely.
pub fn init_logging(default_filter: Option<&str>) {
    let _ = fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(true)
        .with_level(true)
        .try_init();
}
