//! Non-blocking stream with detached delivery

use crate::core::{Context, Event, Stream, StreamMetrics};
use crossbeam_channel::{at, bounded, never, select, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// An accepted event waiting for a reader, with its own expiry
struct Pending {
    event: Event,
    deadline: Option<Instant>,
}

type Queue = Arc<Mutex<Option<Sender<Pending>>>>;

/// Stream whose `send` returns immediately.
///
/// Accepted events wait in an unbounded queue owned by the stream. A single
/// delivery worker offers them, one at a time, on an unbuffered hand-off to
/// a reader. Each event carries its own deadline, fixed when it was sent: a
/// non-zero timeout drops the event once that much time has passed without
/// a reader taking it, and a zero timeout means events never expire.
/// Closing the stream or cancelling its parent context drops everything
/// still waiting.
///
/// Waiting events cost queue memory only, so a burst with no reader never
/// blocks or fails the producer. Readers should not rely on any ordering
/// between events.
///
/// # Example
///
/// ```
/// use rust_event_stream::prelude::*;
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// let stream = AsyncStream::new(&Context::background(), Duration::ZERO);
/// stream.send(Event::new(Any(1), HashMap::new(), ()));
///
/// let event = stream.get().recv_timeout(Duration::from_secs(1)).unwrap();
/// assert_eq!(event.value(), 1);
/// ```
pub struct AsyncStream {
    queue: Queue,
    receiver: Receiver<Event>,
    ctx: Context,
    timeout: Duration,
    metrics: Arc<StreamMetrics>,
}

impl AsyncStream {
    pub fn new(parent: &Context, timeout: Duration) -> Self {
        let (handoff, receiver) = bounded(0);
        let (queue_tx, queue_rx) = unbounded();
        let queue: Queue = Arc::new(Mutex::new(Some(queue_tx)));
        let ctx = parent.with_cancel();
        let metrics = Arc::new(StreamMetrics::new());

        let worker = DeliveryWorker {
            handoff,
            pending: queue_rx,
            queue: Arc::clone(&queue),
            done: ctx.done().clone(),
            metrics: Arc::clone(&metrics),
        };
        let spawned = thread::Builder::new()
            .name("event-delivery".to_string())
            .spawn(move || worker.run());

        if let Err(e) = spawned {
            eprintln!(
                "[EVENT STREAM ERROR] Failed to start delivery worker: {}. \
                 Stream closed, sends will be dropped.",
                e
            );
            ctx.cancel();
            queue.lock().take();
        }

        Self {
            queue,
            receiver,
            ctx,
            timeout,
            metrics,
        }
    }

    /// Consumer side of the hand-off
    pub fn get(&self) -> Receiver<Event> {
        self.receiver.clone()
    }

    /// Drop every waiting event and close the hand-off once the worker exits
    pub fn close(&self) {
        self.ctx.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.ctx.is_cancelled()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }

    fn deadline(&self) -> Option<Instant> {
        if self.timeout.is_zero() {
            None
        } else {
            // Too far out to represent means never
            Instant::now().checked_add(self.timeout)
        }
    }
}

impl Stream for AsyncStream {
    fn send(&self, event: Event) {
        self.metrics.record_sent();
        if self.ctx.is_cancelled() {
            self.metrics.record_dropped();
            return;
        }

        let pending = Pending {
            event,
            deadline: self.deadline(),
        };

        // Held across the push so the worker's final drain sees every event
        let queue = self.queue.lock();
        let Some(queue) = queue.as_ref() else {
            self.metrics.record_dropped();
            return;
        };
        self.metrics.begin_delivery();
        if queue.send(pending).is_err() {
            self.metrics.record_dropped();
            self.metrics.end_delivery();
        }
    }
}

impl Drop for AsyncStream {
    fn drop(&mut self) {
        self.close();
    }
}

/// Background half of an [`AsyncStream`]
struct DeliveryWorker {
    handoff: Sender<Event>,
    pending: Receiver<Pending>,
    queue: Queue,
    done: Receiver<()>,
    metrics: Arc<StreamMetrics>,
}

impl DeliveryWorker {
    fn run(self) {
        loop {
            let next = select! {
                recv(self.pending) -> msg => msg.ok(),
                recv(self.done) -> _ => None,
            };
            let Some(pending) = next else { break };
            if !self.offer(pending) {
                break;
            }
        }

        // No more pushes once the sender is gone; drop what is left
        self.queue.lock().take();
        for _ in self.pending.try_iter() {
            self.settle(false);
        }
    }

    /// Wait for a reader to take the event. Returns false once the stream
    /// is cancelled.
    fn offer(&self, pending: Pending) -> bool {
        let Pending { event, deadline } = pending;
        if deadline.is_some_and(|when| when <= Instant::now()) {
            self.settle(false);
            return true;
        }
        let expiry = match deadline {
            Some(deadline) => at(deadline),
            None => never(),
        };

        select! {
            send(self.handoff, event) -> res => {
                self.settle(res.is_ok());
                true
            },
            recv(self.done) -> _ => {
                self.settle(false);
                false
            },
            recv(expiry) -> _ => {
                self.settle(false);
                true
            },
        }
    }

    fn settle(&self, delivered: bool) {
        if delivered {
            self.metrics.record_delivered();
        } else {
            self.metrics.record_dropped();
        }
        self.metrics.end_delivery();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Any;
    use std::collections::HashMap;

    fn event(value: i64) -> Event {
        Event::new(Any(value), HashMap::new(), ())
    }

    fn wait_settled(stream: &AsyncStream) {
        let start = Instant::now();
        while stream.metrics().in_flight() > 0 && start.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_send_does_not_block() {
        let stream = AsyncStream::new(&Context::background(), Duration::ZERO);
        let start = Instant::now();
        for i in 0..5 {
            stream.send(event(i));
        }
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(stream.metrics().sent_count(), 5);
    }

    #[test]
    fn test_zero_timeout_delivers() {
        let stream = AsyncStream::new(&Context::background(), Duration::ZERO);
        stream.send(event(3));

        let got = stream.get().recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(got.value(), 3);
    }

    #[test]
    fn test_expired_timeout_drops() {
        let stream = AsyncStream::new(&Context::background(), Duration::from_millis(20));
        stream.send(event(1));

        wait_settled(&stream);

        assert_eq!(stream.metrics().dropped_count(), 1);
        assert!(stream.get().try_recv().is_err());
    }

    #[test]
    fn test_each_waiting_event_expires_on_its_own() {
        let stream = AsyncStream::new(&Context::background(), Duration::from_millis(30));
        for i in 0..3 {
            stream.send(event(i));
        }

        wait_settled(&stream);

        assert_eq!(stream.metrics().dropped_count(), 3);
        assert!(!stream.is_closed());
        stream.send(event(9));
        let got = stream.get().recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(got.value(), 9);
    }

    #[test]
    fn test_close_drops_pending() {
        let stream = AsyncStream::new(&Context::background(), Duration::ZERO);
        stream.send(event(1));
        stream.send(event(2));
        stream.close();

        wait_settled(&stream);

        assert_eq!(stream.metrics().dropped_count(), 2);
        assert!(stream.get().recv().is_err());
    }

    #[test]
    fn test_all_events_arrive() {
        let stream = AsyncStream::new(&Context::background(), Duration::ZERO);
        for i in 0..20 {
            stream.send(event(i));
        }

        let receiver = stream.get();
        let mut values: Vec<i64> = (0..20)
            .map(|_| receiver.recv_timeout(Duration::from_secs(2)).unwrap().value())
            .collect();
        values.sort_unstable();
        assert_eq!(values, (0..20).collect::<Vec<_>>());
    }
}
