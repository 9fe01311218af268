//! Async stream example
//!
//! Shows fire-and-forget delivery: sends return immediately, a reader picks
//! events up later, and events nobody reads within the timeout are dropped.
//!
//! Run with: cargo run --example async_delivery

use rust_event_stream::prelude::*;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

fn main() {
    println!("=== Rust Event Stream - Async Delivery Example ===\n");

    let root = Context::background();
    let stream = AsyncStream::new(&root, Duration::from_millis(200));

    println!("1. Sending 5 events with a reader attached:");
    let receiver = stream.get();
    let reader = thread::spawn(move || {
        let mut values = Vec::new();
        while let Ok(event) = receiver.recv_timeout(Duration::from_millis(500)) {
            values.push(event.value());
        }
        values
    });
    for i in 0..5 {
        stream.send(Event::new(Any(i), HashMap::new(), ()));
    }
    let mut values = reader.join().unwrap_or_default();
    values.sort_unstable();
    println!("   received (sorted): {:?}", values);

    println!("\n2. Sending with nobody reading:");
    stream.send(Event::new(Any(99), HashMap::new(), ()));
    thread::sleep(Duration::from_millis(400));
    let metrics = stream.metrics();
    println!(
        "   sent={} delivered={} dropped={} drop rate={:.1}%",
        metrics.sent_count(),
        metrics.delivered_count(),
        metrics.dropped_count(),
        metrics.drop_rate()
    );

    stream.close();
    println!("\n=== Example completed successfully! ===");
}
