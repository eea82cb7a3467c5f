use core::fmt;

/// Error returned by [`RingQueue::enqueue`](crate::RingQueue::enqueue) when the queue has no free slot.
///
/// The rejected value is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be enqueued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is full")
    }
}

impl<T: fmt::Debug> core::error::Error for Full<T> {}

/// Error returned by [`RingQueue::dequeue`](crate::RingQueue::dequeue) when the queue holds no elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is empty")
    }
}

impl core::error::Error for Empty {}
