//! Cancellation scopes for streams
//!
//! A [`Context`] is a cheap, cloneable handle to a node in a cancellation
//! tree. Cancelling a node cancels every context derived from it. Waiters
//! observe cancellation through [`Context::done`], a channel that never
//! carries a value and becomes disconnected once the context is cancelled,
//! so it can sit in a `crossbeam_channel::select!` next to the real work.

use crossbeam_channel::{at, bounded, never, select, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::{Arc, LazyLock, Weak};
use std::thread;
use std::time::{Duration, Instant};

struct Inner {
    // Dropped on cancel, which disconnects `done_rx`
    done_tx: Mutex<Option<Sender<()>>>,
    done_rx: Receiver<()>,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
    fn new() -> Arc<Self> {
        let (done_tx, done_rx) = bounded(0);
        Arc::new(Self {
            done_tx: Mutex::new(Some(done_tx)),
            done_rx,
            children: Mutex::new(Vec::new()),
        })
    }

    fn cancel(&self) {
        if self.done_tx.lock().take().is_none() {
            return;
        }
        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.done_tx.lock().is_none()
    }
}

/// A scope waiting to be cancelled at `at`
struct Deadline {
    at: Instant,
    target: Weak<Inner>,
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Deadline {}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

/// Registration side of the shared deadline timer, `None` if it could not start
static DEADLINES: LazyLock<Option<Sender<Deadline>>> = LazyLock::new(|| {
    let (sender, receiver) = unbounded();
    let spawned = thread::Builder::new()
        .name("context-deadlines".to_string())
        .spawn(move || run_deadlines(receiver));
    match spawned {
        Ok(_) => Some(sender),
        Err(e) => {
            eprintln!(
                "[EVENT STREAM WARNING] Failed to start deadline timer: {}. \
                 Timeout contexts will be cancelled immediately.",
                e
            );
            None
        }
    }
});

fn run_deadlines(incoming: Receiver<Deadline>) {
    let mut scheduled: BinaryHeap<Reverse<Deadline>> = BinaryHeap::new();
    loop {
        let now = Instant::now();
        while scheduled.peek().is_some_and(|next| next.0.at <= now) {
            if let Some(Reverse(due)) = scheduled.pop() {
                if let Some(inner) = due.target.upgrade() {
                    inner.cancel();
                }
            }
        }

        let wake = match scheduled.peek() {
            Some(next) => at(next.0.at),
            None => never(),
        };
        select! {
            recv(incoming) -> msg => match msg {
                Ok(deadline) => scheduled.push(Reverse(deadline)),
                Err(_) => return,
            },
            recv(wake) -> _ => {},
        }
    }
}

/// Handle to a cancellation scope.
///
/// # Example
///
/// ```
/// use rust_event_stream::Context;
///
/// let root = Context::background();
/// let child = root.with_cancel();
/// let grandchild = child.with_cancel();
///
/// child.cancel();
/// assert!(grandchild.is_cancelled());
/// assert!(!root.is_cancelled());
/// ```
#[derive(Clone)]
pub struct Context {
    inner: Arc<Inner>,
}

impl Context {
    /// Root scope that is never cancelled on its own
    pub fn background() -> Self {
        Self {
            inner: Inner::new(),
        }
    }

    /// Derive a child scope that is cancelled with this one, or earlier via
    /// [`cancel`](Self::cancel) on the child.
    pub fn with_cancel(&self) -> Self {
        let child = Inner::new();
        {
            let mut children = self.inner.children.lock();
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child));
        }
        // The parent may have been cancelled before the child was registered
        if self.inner.is_cancelled() {
            child.cancel();
        }
        Self { inner: child }
    }

    /// Derive a child scope that cancels itself after `timeout`.
    ///
    /// Deadlines of every timeout scope in the process are tracked by one
    /// shared timer thread, so creating many of them is cheap.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let child = self.with_cancel();
        // Too far out to represent means the deadline never fires
        let Some(when) = Instant::now().checked_add(timeout) else {
            return child;
        };
        let deadline = Deadline {
            at: when,
            target: Arc::downgrade(&child.inner),
        };
        let scheduled = DEADLINES
            .as_ref()
            .is_some_and(|timer| timer.send(deadline).is_ok());
        if !scheduled {
            child.cancel();
        }
        child
    }

    /// Cancel this scope and every scope derived from it. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Channel that disconnects when this scope is cancelled
    pub fn done(&self) -> &Receiver<()> {
        &self.inner.done_rx
    }

    /// Block until this scope is cancelled
    pub fn wait(&self) {
        // Nothing is ever sent, so this only returns on disconnect
        let _ = self.inner.done_rx.recv();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_background_is_live() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.done().try_recv().is_err());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let ctx = Context::background().with_cancel();
        ctx.cancel();
        ctx.cancel();
        assert!(ctx.is_cancelled());
        ctx.wait();
    }

    #[test]
    fn test_cancel_propagates_down_not_up() {
        let root = Context::background();
        let child = root.with_cancel();
        let grandchild = child.with_cancel();
        let sibling = root.with_cancel();

        child.cancel();

        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
        assert!(!root.is_cancelled());
        assert!(!sibling.is_cancelled());
    }

    #[test]
    fn test_child_of_cancelled_parent_starts_cancelled() {
        let parent = Context::background().with_cancel();
        parent.cancel();
        let child = parent.with_cancel();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_timeout_cancels() {
        let start = Instant::now();
        let ctx = Context::background().with_timeout(Duration::from_millis(50));
        ctx.wait();
        assert!(ctx.is_cancelled());
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_timeout_follows_parent() {
        let parent = Context::background().with_cancel();
        let ctx = parent.with_timeout(Duration::from_secs(60));
        parent.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_many_deadlines_share_one_timer() {
        let long: Vec<Context> = (0..10_000)
            .map(|_| Context::background().with_timeout(Duration::from_secs(60)))
            .collect();

        // Registered after the long ones but due first
        let short = Context::background().with_timeout(Duration::from_millis(30));
        short.wait();

        assert!(short.is_cancelled());
        assert!(long.iter().all(|ctx| !ctx.is_cancelled()));
    }

    #[test]
    fn test_unrepresentable_timeout_never_fires() {
        let ctx = Context::background().with_timeout(Duration::MAX);
        assert!(!ctx.is_cancelled());
        ctx.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_done_wakes_select() {
        let ctx = Context::background().with_cancel();
        let waiter = {
            let ctx = ctx.clone();
            thread::spawn(move || {
                let (_tx, rx) = bounded::<()>(0);
                select! {
                    recv(rx) -> _ => false,
                    recv(ctx.done()) -> _ => true,
                }
            })
        };
        thread::sleep(Duration::from_millis(20));
        ctx.cancel();
        assert!(waiter.join().unwrap());
    }
}
