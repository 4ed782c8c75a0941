//! # Terminal Lifecycle
//!
//! Starts and stops everything the terminal runs.
//!
//! [`PosSystem::new`] builds one shared HTTP client, wraps it in the catalog
//! and checkout clients, and spawns the [`PageController`](crate::page::PageController)
//! with those clients injected. [`PosSystem::shutdown`] drops the handle and
//! waits for the controller task to finish.
//!
//! ```rust,ignore
//! let config = PosConfig::load()?;
//! setup_tracing(&config.log_level);
//!
//! let system = PosSystem::new(&config)?;
//! system.page.scan("4901681517305").await?;
//! system.page.add_to_cart().await?;
//! system.page.checkout().await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! Tracing setup lives in [`tracing`](self::tracing).

pub mod pos_system;
pub mod tracing;

pub use pos_system::PosSystem;
pub use self::tracing::setup_tracing;
