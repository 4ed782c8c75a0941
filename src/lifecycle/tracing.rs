//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber that writes to
//! stderr, leaving stdout to the terminal screen.
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from the level
//! passed in (normally [`PosConfig::log_level`](crate::config::PosConfig::log_level)).
//!
//! ```bash
//! # Lookups, purchases and their outcomes
//! RUST_LOG=info pos
//!
//! # Every page request and HTTP call
//! RUST_LOG=debug pos
//!
//! # Only the client layer
//! RUST_LOG=pos_terminal::clients=debug pos
//! ```
//!
//! Typical `info` output for one sale:
//!
//! ```text
//! INFO Terminal started api=http://localhost:8000
//! INFO fetch_product_by_code{code="4901681517305"}: Product loaded code=4901681517305 price=150
//! INFO Lookup ok code=4901681517305
//! INFO Added to cart code=4901681517305 index=0 total=150
//! INFO Submitting purchase lines=1 total=150
//! INFO Purchase ok purchase_id=42 total=150
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, before [`PosSystem::new`](crate::lifecycle::PosSystem::new).
pub fn setup_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
