// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-infrastructure-builder
//!
//! Builds a small order-processing graph shared by the integration tests.

use cim_infrastructure_builder::{compute, create_event, BuilderResult, Event, Resource};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Resources and events of the order-processing fixture
pub struct OrderGraph {
    pub table: Resource,
    pub notifier: Resource,
    pub handler: Resource,
    pub placed: Event,
    pub cancelled: Event,
}

/// handler <- placed, cancelled; handler uses table and notifier
pub fn order_graph() -> BuilderResult<OrderGraph> {
    let table = compute("ordersTable", "python3.12")?;
    let notifier = compute("notifier", "nodejs20.x")?;
    let handler = compute("orderHandler", "nodejs20.x")?;
    let placed = create_event("orderPlaced")?;
    let cancelled = create_event("orderCancelled")?;

    handler
        .set_description("Processes order lifecycle events")
        .set_source_control("https://git.example.com/shop/orders.git")
        .set_env("TABLE_NAME", table.id())
        .set_tag("team", "checkout")
        .on_event(&placed)
        .on_event(&cancelled)
        .uses(&table, ["read", "write"], None)
        .uses(&notifier, ["invoke"], Some("notify"));

    Ok(OrderGraph {
        table,
        notifier,
        handler,
        placed,
        cancelled,
    })
}
