//! Blocking, optionally buffered stream

use crate::core::{Context, Event, Stream, StreamMetrics};
use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// Stream whose `send` blocks the caller until the buffer takes the event.
///
/// With a capacity of 0 every send is a direct hand-off to a reader. Events
/// that make it into the buffer are read back in the order they went in.
/// Cancelling the parent context or closing the stream releases blocked
/// senders; their events are dropped.
///
/// # Example
///
/// ```
/// use rust_event_stream::prelude::*;
/// use std::collections::HashMap;
///
/// let stream = SyncStream::new(&Context::background(), 2);
/// stream.send(Event::new(Any(1), HashMap::new(), ()));
/// stream.send(Event::new(Any(2), HashMap::new(), ()));
/// stream.close();
///
/// let values: Vec<i64> = stream.get().iter().map(|e| e.value()).collect();
/// assert_eq!(values, vec![1, 2]);
/// ```
pub struct SyncStream {
    sender: Mutex<Option<Sender<Event>>>,
    receiver: Receiver<Event>,
    ctx: Context,
    capacity: usize,
    metrics: Arc<StreamMetrics>,
}

impl SyncStream {
    pub fn new(parent: &Context, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
            ctx: parent.with_cancel(),
            capacity,
            metrics: Arc::new(StreamMetrics::new()),
        }
    }

    /// Consumer side of the buffer
    pub fn get(&self) -> Receiver<Event> {
        self.receiver.clone()
    }

    /// Cancel pending sends and close the buffer.
    ///
    /// Events already buffered can still be read; the receiver reports
    /// disconnection once they are drained.
    pub fn close(&self) {
        self.ctx.cancel();
        self.sender.lock().take();
    }

    pub fn is_closed(&self) -> bool {
        self.ctx.is_cancelled()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }
}

impl Stream for SyncStream {
    fn send(&self, event: Event) {
        self.metrics.record_sent();
        if self.ctx.is_cancelled() {
            self.metrics.record_dropped();
            return;
        }
        // Clone so the lock is not held while blocked
        let Some(sender) = self.sender.lock().clone() else {
            self.metrics.record_dropped();
            return;
        };

        self.metrics.begin_delivery();
        select! {
            send(sender, event) -> res => match res {
                Ok(()) => self.metrics.record_delivered(),
                Err(_) => self.metrics.record_dropped(),
            },
            recv(self.ctx.done()) -> _ => self.metrics.record_dropped(),
        };
        self.metrics.end_delivery();
    }
}

impl Drop for SyncStream {
    fn drop(&mut self) {
        self.close();
    }
}
