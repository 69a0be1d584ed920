//! Storecheck — black-box contract verification for an e-commerce REST API
//!
//! This library is the shared core of a contract-test suite against a
//! live users/products/carts service. It bootstraps the process-wide
//! fixture baseline (cardinalities, maximum identifiers, the cached real
//! user), builds authenticated timed requests, decodes responses into
//! typed schemas, and independently re-verifies the service's cart
//! arithmetic. The test methods themselves live under `tests/` and are
//! declarative consumers of this core.

pub mod auth;
pub mod carts;
pub mod client;
pub mod config;
pub mod core;
pub mod fixture;
pub mod schema;

// Re-export commonly used types
pub use client::{ApiClient, ApiResponse};
pub use config::HarnessConfig;
pub use core::{HarnessError, Result};
pub use fixture::Harness;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for a test binary. Safe to call from every test;
/// only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storecheck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
