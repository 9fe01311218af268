//! Delivery capabilities

use super::event::Event;
use std::sync::Arc;

/// Delivery backend for events.
///
/// `send` may be called concurrently from any number of threads, so every
/// implementation must be `Send + Sync`. Delivery is best effort: a stream
/// may drop an event and `send` reports nothing back.
pub trait Stream: Send + Sync {
    fn send(&self, event: Event);
}

/// Producer that accepts a stream at runtime.
///
/// Attaching a stream may race with events being sent through the previous
/// one; implementations must serialise the swap.
pub trait Client: Send + Sync {
    fn with_stream(&self, stream: Arc<dyn Stream>);
}

impl<S: Stream + ?Sized> Stream for Arc<S> {
    fn send(&self, event: Event) {
        (**self).send(event)
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    fn send(&self, event: Event) {
        (**self).send(event)
    }
}
