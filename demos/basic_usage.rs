//! Basic logger usage example
//!
//! Demonstrates a logger attached to a buffered sync stream and the
//! threshold rule deciding which levels reach the stream.
//!
//! Run with: cargo run --example basic_usage

use rust_event_stream::prelude::*;
use rust_event_stream::{info, warning};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Event Stream - Basic Usage Example ===\n");

    let stream = Arc::new(SyncStream::new(&Context::background(), 64));
    let logger = Logger::builder()
        .level_name("info")?
        .tag("example", "basic_usage")
        .stream(stream.clone())
        .build();

    println!("1. Emitting at every level with an Info threshold:");
    logger.log(Level::Panic, "panic (not forwarded)");
    logger.log(Level::Fatal, "fatal (not forwarded)");
    logger.error("error (not forwarded)");
    logger.warning("warning (not forwarded)");
    logger.info("info (forwarded)");
    logger.debug("debug (forwarded)");
    logger.trace("trace (forwarded)");

    println!("\n2. Derived logger with extra tags:");
    let request_logger = logger.with_tag("request_id", "r-17");
    info!(request_logger, "handling {} items", 3);
    warning!(request_logger, "this one is filtered out");

    stream.close();
    for event in stream.get().iter() {
        println!(
            "   [{}] {:<7} tags={:?} data={:?}",
            event.timestamp.format("%H:%M:%S%.3f"),
            event.class.label(),
            event.tags,
            event.data
        );
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
