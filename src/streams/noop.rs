//! Stream that discards every event

use crate::core::{Event, Stream};
use crossbeam_channel::{bounded, Receiver};

/// Default stream of a fresh [`Logger`](crate::Logger).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStream;

impl NoopStream {
    pub fn new() -> Self {
        NoopStream
    }

    /// Receiver that is already closed; iterating it yields nothing
    pub fn get(&self) -> Receiver<Event> {
        let (_, receiver) = bounded(0);
        receiver
    }
}

impl Stream for NoopStream {
    #[inline]
    fn send(&self, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Any;
    use std::collections::HashMap;

    #[test]
    fn test_send_discards() {
        let stream = NoopStream::new();
        stream.send(Event::new(Any(0), HashMap::new(), ()));
        assert_eq!(stream.get().iter().count(), 0);
    }

    #[test]
    fn test_get_is_closed() {
        let receiver = NoopStream.get();
        assert!(receiver.recv().is_err());
    }
}
