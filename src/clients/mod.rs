//! Typed clients for the backend HTTP API.
//!
//! The controller talks to the backend only through the [`CatalogApi`] and
//! [`CheckoutApi`] traits. [`CatalogClient`] and [`CheckoutClient`] implement
//! them over `reqwest`; [`mock`] implements them in memory for tests.

pub mod catalog_client;
pub mod checkout_client;
pub mod error;
mod http;
pub mod mock;
pub mod traits;

pub use catalog_client::*;
pub use checkout_client::*;
pub use error::*;
pub use traits::*;
