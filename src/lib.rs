//! # POS Terminal
//!
//! > **A self-checkout point-of-sale client for Tokio.**
//!
//! The terminal looks up products by code against a backend HTTP API, builds a
//! cart locally, and submits the cart as a single purchase. The backend owns
//! the catalog and the purchase records; the terminal owns only the screen
//! state.
//!
//! ## 🏗️ Design
//!
//! The checkout screen is a single actor, the [`PageController`](page::PageController).
//! It owns the [`PageState`](page::PageState) and processes user actions one
//! at a time over an `mpsc` channel, so no locks guard the state.
//!
//! Network calls are spawned off the loop. While a lookup or purchase is in
//! flight the busy flag is set and a second one is refused with
//! [`ControllerError::Busy`](page::ControllerError::Busy). Every state change
//! is published on a `watch` channel for whatever draws the screen.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer has its own `thiserror` enum: [`ClientError`](clients::ClientError)
//! for backend calls, [`ControllerError`](page::ControllerError) for the actor
//! plumbing, [`ConfigError`](config::ConfigError) for bad settings. Checkout
//! failures are not errors of the API; they become the message shown on the
//! page.
//!
//! ### 2. Dependency Injection
//! The controller sees the backend only through the [`CatalogApi`](clients::CatalogApi)
//! and [`CheckoutApi`](clients::CheckoutApi) traits. [`lifecycle`] wires in the
//! HTTP clients; tests wire in [`clients::mock`].
//!
//! ### 3. Observability
//! `tracing` everywhere, with `#[instrument]` spans on client calls. See
//! [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`], [`cart`])
//! - **Role**: Wire types for products and purchases, and the pure cart rules.
//! - **Key items**: [`Product`](model::Product), [`CartLine`](model::CartLine), [`Cart`](cart::Cart).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: Typed access to the backend's product and purchase endpoints.
//! - **Key items**: [`CatalogClient`](clients::CatalogClient), [`CheckoutClient`](clients::CheckoutClient).
//!
//! ### 3. The Engine ([`page`])
//! - **Role**: The checkout state machine.
//! - **Key items**: [`PageController`](page::PageController), [`PageHandle`](page::PageHandle).
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Reads settings, builds the clients, starts and stops the controller.
//! - **Key items**: [`PosConfig`](config::PosConfig), [`PosSystem`](lifecycle::PosSystem).
//!
//! ### 5. The Screen ([`command`], [`render`])
//! - **Role**: Parses typed commands and draws the page as text.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against a backend on localhost:8000
//! RUST_LOG=info cargo run
//!
//! # Elsewhere, with a store code
//! POS_API_URL=https://pos.example.com POS_STORE_CODE=30 cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart;
pub mod clients;
pub mod command;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod page;
pub mod render;
