//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter for the
//! whole process.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown` with the final store size
//! - **Entity operations**: Create, Get, Update, Delete, Action, FindMany, SaveMany, List
//! - **Client calls**: every typed client method opens an `#[instrument]` span
//! - **Errors**: warnings carry the entity type, id and the error
//!
//! ## Filtering
//!
//! `RUST_LOG` wins when it is set. Otherwise the directive passed to
//! [`setup_tracing`] is used.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run                        # full payloads
//! RUST_LOG=order_service=debug,actor_framework=info cargo run
//! ```
//!
//! With `RUST_LOG=info` an accepted order from the demo binary reads roughly
//! as follows. Actor lines carry no span since each actor runs on its own task.
//!
//! ```text
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Saved entity_type="Product" count=1
//! INFO order_processing:create_order: Order completed order_id=order_1 total=30.00 quantity=3 customer_id=customer_1 lines=1
//! ```
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .init();
}
