//! Per-element animation queue.
//!
//! An [`ElementQueue`] serializes start thunks so that at most one of them is
//! in flight at a time. The in-flight thunk is expected to call
//! [`ElementQueue::advance`] once its work is finished, which hands the slot
//! to the next pending thunk in submission order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for an element queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueId(u64);

impl QueueId {
    /// Get the raw u64 value of this queue ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique queue IDs.
static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

fn next_queue_id() -> QueueId {
    QueueId(NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed start thunk.
type BoxedThunk = Box<dyn FnOnce() + Send + 'static>;

/// Stops the in-flight work early.
type CancelHook = Arc<dyn Fn() + Send + Sync + 'static>;

/// Whether a queue currently has a thunk in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueState {
    /// Nothing is executing.
    #[default]
    Idle,
    /// A thunk has been started and has not yet called `advance`.
    Running,
}

#[derive(Default)]
struct QueueInner {
    state: QueueState,
    pending: VecDeque<BoxedThunk>,
    /// Registered by the in-flight thunk; cleared on `advance`.
    cancel: Option<CancelHook>,
}

/// FIFO queue with a single in-flight slot.
///
/// Cloning the handle shares the queue. Thunks always run with the internal
/// lock released, so a thunk that finishes synchronously may call
/// [`advance`](Self::advance) from inside itself.
///
/// # Example
///
/// ```
/// use horizon_kinetic_core::ElementQueue;
///
/// let queue = ElementQueue::new();
/// let q = queue.clone();
/// queue.enqueue(move || {
///     // ... start some work, then when it finishes:
///     q.advance();
/// });
/// assert!(!queue.is_running());
/// ```
#[derive(Clone)]
pub struct ElementQueue {
    id: QueueId,
    inner: Arc<Mutex<QueueInner>>,
}

impl ElementQueue {
    /// Create an empty, idle queue with a fresh ID.
    pub fn new() -> Self {
        Self {
            id: next_queue_id(),
            inner: Arc::new(Mutex::new(QueueInner::default())),
        }
    }

    /// The queue's unique ID.
    pub fn id(&self) -> QueueId {
        self.id
    }

    /// Append a thunk. If the queue is idle it starts immediately.
    pub fn enqueue<F>(&self, thunk: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let start = {
            let mut inner = self.inner.lock();
            inner.pending.push_back(Box::new(thunk));
            match inner.state {
                QueueState::Idle => {
                    inner.state = QueueState::Running;
                    inner.pending.pop_front()
                }
                QueueState::Running => None,
            }
        };

        tracing::trace!(
            target: targets::QUEUE,
            queue = self.id.0,
            started = start.is_some(),
            "enqueued"
        );

        if let Some(thunk) = start {
            thunk();
        }
    }

    /// Release the in-flight slot and start the next pending thunk, if any.
    pub fn advance(&self) {
        let next = {
            let mut inner = self.inner.lock();
            inner.cancel = None;
            match inner.pending.pop_front() {
                Some(thunk) => {
                    inner.state = QueueState::Running;
                    Some(thunk)
                }
                None => {
                    inner.state = QueueState::Idle;
                    None
                }
            }
        };

        tracing::trace!(
            target: targets::QUEUE,
            queue = self.id.0,
            idle = next.is_none(),
            "advanced"
        );

        if let Some(thunk) = next {
            thunk();
        }
    }

    /// Register how to stop the in-flight work.
    ///
    /// Meant to be called by the in-flight thunk. The hook is dropped on the
    /// next [`advance`](Self::advance). Ignored while the queue is idle.
    pub fn set_cancel_hook<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        if inner.state == QueueState::Running {
            inner.cancel = Some(Arc::new(hook));
        }
    }

    /// Ask the in-flight work to stop, through whichever handle started it.
    ///
    /// Returns `false` if nothing in flight registered a hook. The work is
    /// still expected to call [`advance`](Self::advance) when it winds down.
    pub fn cancel_in_flight(&self) -> bool {
        let hook = self.inner.lock().cancel.clone();
        match hook {
            Some(hook) => {
                tracing::trace!(target: targets::QUEUE, queue = self.id.0, "cancelling in-flight work");
                hook();
                true
            }
            None => false,
        }
    }

    /// Drop every pending thunk. The in-flight one is unaffected.
    ///
    /// Returns the number of thunks dropped.
    pub fn clear(&self) -> usize {
        let dropped: Vec<BoxedThunk> = self.inner.lock().pending.drain(..).collect();
        dropped.len()
    }

    /// Current state of the in-flight slot.
    pub fn state(&self) -> QueueState {
        self.inner.lock().state
    }

    /// Check if a thunk is in flight.
    pub fn is_running(&self) -> bool {
        self.state() == QueueState::Running
    }

    /// Number of thunks waiting behind the in-flight one.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl Default for ElementQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ElementQueue")
            .field("id", &self.id)
            .field("state", &inner.state)
            .field("pending", &inner.pending.len())
            .finish()
    }
}
