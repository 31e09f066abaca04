//! HostPulse Common Library
//!
//! Shared building blocks for the HostPulse sampler and watcher:
//!
//! - [`report`] - Utilization wire schema (`UtilizationReport`, `WireReport`)
//! - [`keyexpr`] - Key expression construction for utilization topics
//! - [`config`] - Broker connection settings and credential parsing
//! - [`session`] - Zenoh session management
//! - [`shutdown`] - Cooperative shutdown signal
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod keyexpr;
pub mod report;
pub mod session;
pub mod shutdown;

// Re-export commonly used types at the crate root
pub use config::{BrokerConfig, Credentials};
pub use error::{Error, Result};
pub use keyexpr::{EXCHANGE, utilization_key, vhost_namespace};
pub use report::{IfaceRate, UtilizationReport, WireIfaceRate, WireReport, decode_wire, encode};
pub use session::connect;
pub use shutdown::shutdown_signal;

/// Initialize tracing with the given default level.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
