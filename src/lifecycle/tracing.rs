//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter driven
//! by `RUST_LOG`. Module paths are hidden; table actors tag their lines with
//! `entity_type` and the sync layer with `client` instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # commands, completions, refreshes
//! RUST_LOG=debug cargo run    # item transitions, patches, remote events
//! ```
//!
//! A completed order with one low-stock dish reads roughly:
//!
//! ```text
//! INFO apply_command{client=client_5f.. kind="complete_order"}: Command applied order_id=order_1 status=completed
//! WARN apply_command{..}:complete_order{order_id=order_1}: Low stock item="ramen" stock=1 threshold=5
//! INFO apply_command{..}:complete_order{order_id=order_1}: Order fulfilled deducted=2 alerts=1 skipped=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
