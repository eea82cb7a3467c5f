#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), no_std)]
//! # ringo-queue
//!
//! A fixed-capacity FIFO ring queue over caller-supplied storage.
//!
//! [`RingQueue`] never allocates. It borrows a mutable slice for its backing storage and
//! keeps two counters: `head` (elements ever dequeued) and `tail` (elements ever enqueued).
//! Physical slots are obtained by reducing those counters modulo the slice length, so
//! enqueue and dequeue are O(1) pure index arithmetic. This makes it usable in `no_std`,
//! real-time and other allocation-free environments.
//!
//! ## Quick Start
//!
//! ```rust
//! use ringo_queue::RingQueue;
//!
//! let mut storage = [0u32; 4];
//! let mut queue = RingQueue::new(&mut storage);
//!
//! queue.enqueue(1).unwrap();
//! queue.enqueue(2).unwrap();
//! assert_eq!(queue.len(), 2);
//!
//! assert_eq!(queue.dequeue(), Ok(1));
//! assert_eq!(queue.dequeue(), Ok(2));
//! assert!(queue.is_empty());
//! ```
//!
//! ## Growing
//!
//! The queue cannot allocate, so growth is driven by the caller, who hands over a larger
//! slice. Two paths exist:
//!
//! - [`RingQueue::resize`] swaps in storage that already holds the queued elements at the
//!   same offsets. It is only valid while [`RingQueue::can_resize`] is `true`, i.e. the
//!   elements do not wrap around the end of the current storage. [`RingQueue::make_contiguous`]
//!   can be used to get there.
//! - [`RingQueue::relocate`] moves the queued elements into the new storage itself, which
//!   also works for wrapped queues.
//!
//! ```rust
//! use ringo_queue::RingQueue;
//!
//! let mut small = [0u8; 2];
//! let mut large = [0u8; 8];
//!
//! let mut queue = RingQueue::new(&mut small);
//! queue.enqueue(7).unwrap();
//! queue.enqueue(8).unwrap();
//! assert!(queue.is_full());
//!
//! let old = queue.relocate(&mut large);
//! assert_eq!(old.len(), 2);
//! assert_eq!(queue.capacity(), 8);
//! queue.enqueue(9).unwrap();
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [7, 8, 9]);
//! ```
//!
//! ## Feature Flags
//!
//! - **`buf-trait`**: Implements [`bytes::Buf`] and [`bytes::BufMut`] for `RingQueue<u8>`.
//! - **`zeroize`**: Implements [`zeroize::Zeroize`], wiping the borrowed storage on request.

mod error;
mod iter;

#[cfg(feature = "buf-trait")]
mod buf;

pub use error::{Empty, Full};
pub use iter::Iter;

use core::fmt;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A FIFO ring queue backed by a borrowed slice.
///
/// The capacity is the length of the slice, and may be zero (such a queue is always both
/// empty and full). The queue does not own its storage: elements left in it when the queue
/// goes away stay where they are, and the slice can be reclaimed with
/// [`into_storage`](Self::into_storage).
///
/// Elements are moved in and out by copy, so the enqueue/dequeue family requires
/// `T: Copy`. Storage management ([`resize`](Self::resize), [`relocate`](Self::relocate),
/// [`make_contiguous`](Self::make_contiguous)) works for any `T`.
pub struct RingQueue<'a, T> {
    storage: &'a mut [T],
    head: usize,
    tail: usize,
}

impl<'a, T> RingQueue<'a, T> {
    /// Creates an empty queue over `storage`.
    ///
    /// Whatever the slice currently holds is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringo_queue::RingQueue;
    ///
    /// let mut storage = [0i64; 16];
    /// let queue = RingQueue::new(&mut storage);
    /// assert_eq!(queue.capacity(), 16);
    /// assert!(queue.is_empty());
    /// ```
    pub fn new(storage: &'a mut [T]) -> Self {
        Self {
            storage,
            head: 0,
            tail: 0,
        }
    }

    /// Returns the total capacity of the queue, which is the length of its storage.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of queued elements.
    pub fn len(&self) -> usize {
        self.tail.wrapping_sub(self.head)
    }

    /// Returns `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the queue has no free slot.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns the number of free slots.
    pub fn remaining_mut(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Empties the queue.
    ///
    /// The storage is not touched; only the counters are reset.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Returns a reference to the oldest element, if any.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let index = self.head_index();
        Some(&self.storage[index])
    }

    /// Returns a mutable reference to the oldest element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let index = self.head_index();
        Some(&mut self.storage[index])
    }

    /// Returns a front-to-back iterator over the queued elements.
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter::new(first, second)
    }

    /// Returns the queued elements as a pair of slices, oldest first.
    ///
    /// - If the elements are contiguous in storage, the second slice is empty.
    /// - If they wrap around, the first slice runs up to the end of the storage and the
    ///   second one continues from its start.
    ///
    /// # Example
    ///
    /// ```
    /// use ringo_queue::RingQueue;
    ///
    /// let mut storage = [0u8; 3];
    /// let mut queue = RingQueue::new(&mut storage);
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    /// queue.dequeue().unwrap();
    /// queue.enqueue(3).unwrap();
    /// queue.enqueue(4).unwrap();
    ///
    /// assert_eq!(queue.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.is_empty() {
            return (&[], &[]);
        }

        let capacity = self.capacity();
        let start = self.head_index();
        let len = self.len();

        if len <= capacity - start {
            (&self.storage[start..start + len], &[])
        } else {
            let (back, front) = self.storage.split_at(start);
            (front, &back[..len - (capacity - start)])
        }
    }

    /// Returns the free slots as a pair of mutable slices, in the order they will be filled.
    ///
    /// Write elements into these slices, then call [`commit`](Self::commit) to make them
    /// part of the queue. The slots still hold whatever values were left in the storage.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        if self.is_full() {
            return (&mut [][..], &mut [][..]);
        }

        let capacity = self.capacity();
        let write_start = self.tail_index();
        let available = capacity - self.len();

        if available <= capacity - write_start {
            (
                &mut self.storage[write_start..write_start + available],
                &mut [][..],
            )
        } else {
            let (back, front) = self.storage.split_at_mut(write_start);
            (front, &mut back[..available - (capacity - write_start)])
        }
    }

    /// Appends `cnt` elements previously written through [`as_mut_slices`](Self::as_mut_slices).
    ///
    /// # Panics
    ///
    /// Panics if `cnt` is greater than [`remaining_mut()`](Self::remaining_mut).
    ///
    /// # Example
    ///
    /// ```
    /// use ringo_queue::RingQueue;
    ///
    /// let mut storage = [0u8; 8];
    /// let mut queue = RingQueue::new(&mut storage);
    ///
    /// let (first, _) = queue.as_mut_slices();
    /// first[..3].copy_from_slice(b"abc");
    /// queue.commit(3);
    ///
    /// assert_eq!(queue.as_slices().0, b"abc");
    /// ```
    pub fn commit(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining_mut(),
            "attempt to commit beyond available space"
        );
        if cnt == 0 {
            return;
        }
        self.advance_tail(cnt);
    }

    /// Discards the `cnt` oldest elements.
    ///
    /// # Panics
    ///
    /// Panics if `cnt` is greater than [`len()`](Self::len).
    pub fn consume(&mut self, cnt: usize) {
        assert!(cnt <= self.len(), "attempt to consume beyond queued elements");
        self.head = self.head.wrapping_add(cnt);
    }

    /// Returns `true` if [`resize`](Self::resize) may be called.
    ///
    /// This holds when the queue is empty, or when its elements do not wrap around the
    /// end of the storage. Extending the storage of a wrapped queue would splice the new
    /// slots into the middle of the queue.
    pub fn can_resize(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.len() <= self.capacity() - self.head_index()
    }

    /// Swaps in a larger storage slice that already holds the queued elements, and returns
    /// the previous one.
    ///
    /// `storage` must contain the queued elements at the same offsets as the current
    /// storage, either because the caller copied the current contents over or because it is
    /// the same memory, extended. Afterwards the oldest element is at the same offset and
    /// new elements go into the additional slots.
    ///
    /// # Panics
    ///
    /// Panics if `storage` is shorter than the current capacity, or if
    /// [`can_resize()`](Self::can_resize) is `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use ringo_queue::RingQueue;
    ///
    /// let mut small = [0u16; 2];
    /// let mut large = [0u16; 4];
    ///
    /// let mut queue = RingQueue::new(&mut small);
    /// queue.enqueue(10).unwrap();
    /// queue.enqueue(20).unwrap();
    /// assert!(queue.can_resize());
    ///
    /// large[..2].copy_from_slice(queue.as_slices().0);
    /// queue.resize(&mut large);
    ///
    /// queue.enqueue(30).unwrap();
    /// assert_eq!(queue.len(), 3);
    /// assert_eq!(queue.dequeue(), Ok(10));
    /// ```
    pub fn resize(&mut self, storage: &'a mut [T]) -> &'a mut [T] {
        assert!(
            storage.len() >= self.capacity(),
            "attempt to shrink the queue storage"
        );
        assert!(
            self.can_resize(),
            "attempt to resize a queue that wraps around its storage"
        );
        if !self.is_empty() {
            self.rebase(self.head_index());
        }
        core::mem::replace(&mut self.storage, storage)
    }

    /// Moves the queued elements into `storage`, starting at offset zero, and returns the
    /// previous storage.
    ///
    /// Unlike [`resize`](Self::resize) this works whether or not the queue wraps, and the
    /// new storage may also be smaller as long as the queued elements fit. Elements are
    /// moved by swapping slots, so the vacated slots of the returned storage hold whatever
    /// `storage` held at the matching offsets.
    ///
    /// # Panics
    ///
    /// Panics if `storage` is shorter than [`len()`](Self::len).
    pub fn relocate(&mut self, storage: &'a mut [T]) -> &'a mut [T] {
        assert!(
            storage.len() >= self.len(),
            "attempt to relocate into storage that cannot hold the queued elements"
        );
        let (first, second) = self.live_slices_mut();
        for (dst, src) in storage
            .iter_mut()
            .zip(first.iter_mut().chain(second.iter_mut()))
        {
            core::mem::swap(dst, src);
        }
        self.rebase(0);
        core::mem::replace(&mut self.storage, storage)
    }

    /// Rotates the storage so the queued elements are contiguous, and returns them.
    ///
    /// Afterwards [`can_resize()`](Self::can_resize) is `true`.
    ///
    /// # Performance
    ///
    /// If the elements are already contiguous, this only returns them.
    /// If they wrap around, this rotates the storage (O(N)).
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if self.is_empty() {
            return &mut [];
        }

        let capacity = self.capacity();
        let len = self.len();
        let mut start = self.head_index();

        if len > capacity - start {
            self.storage.rotate_left(start);
            self.rebase(0);
            start = 0;
        }
        &mut self.storage[start..start + len]
    }

    /// Releases the storage.
    pub fn into_storage(self) -> &'a mut [T] {
        self.storage
    }

    fn live_slices_mut(&mut self) -> (&mut [T], &mut [T]) {
        if self.is_empty() {
            return (&mut [][..], &mut [][..]);
        }

        let capacity = self.capacity();
        let start = self.head_index();
        let len = self.len();

        if len <= capacity - start {
            (&mut self.storage[start..start + len], &mut [][..])
        } else {
            let (back, front) = self.storage.split_at_mut(start);
            (front, &mut back[..len - (capacity - start)])
        }
    }

    /// Physical slot of the oldest element. Only valid for a non-zero capacity.
    #[inline]
    fn head_index(&self) -> usize {
        debug_assert!(self.capacity() > 0);
        self.head % self.capacity()
    }

    /// Physical slot of the next element to be enqueued. Only valid for a non-zero capacity.
    #[inline]
    fn tail_index(&self) -> usize {
        debug_assert!(self.capacity() > 0);
        self.tail % self.capacity()
    }

    /// Moves the counters so the oldest element sits at logical position `head`, keeping
    /// the length.
    fn rebase(&mut self, head: usize) {
        let len = self.len();
        self.head = head;
        self.tail = head.wrapping_add(len);
    }

    #[inline]
    fn advance_tail(&mut self, cnt: usize) {
        // Raw overflow of `tail` would break the slot mapping unless the capacity divides
        // the counter range, so the counters are rebased first.
        if self.tail.checked_add(cnt).is_none() {
            self.rebase(self.head_index());
        }
        self.tail = self.tail.wrapping_add(cnt);
    }
}

impl<T: Copy> RingQueue<'_, T> {
    /// Appends `value` if there is a free slot.
    ///
    /// Returns `false`, leaving the queue untouched, if it is full.
    pub fn enqueue_if_not_full(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        // SAFETY: We checked that it isn't full
        unsafe { self.enqueue_unchecked(value) };
        true
    }

    /// Removes and returns the oldest element, or `None` if the queue is empty.
    pub fn dequeue_if_not_empty(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: We checked that it isn't empty
        Some(unsafe { self.dequeue_unchecked() })
    }

    /// Appends `value` to the back of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] carrying `value` back if the queue has no free slot. The queue is
    /// left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use ringo_queue::{Full, RingQueue};
    ///
    /// let mut storage = [0u8; 1];
    /// let mut queue = RingQueue::new(&mut storage);
    /// assert_eq!(queue.enqueue(1), Ok(()));
    /// assert_eq!(queue.enqueue(2), Err(Full(2)));
    /// ```
    pub fn enqueue(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }
        // SAFETY: We checked that it isn't full
        unsafe { self.enqueue_unchecked(value) };
        Ok(())
    }

    /// Removes and returns the oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`Empty`] if the queue holds no elements.
    pub fn dequeue(&mut self) -> Result<T, Empty> {
        self.dequeue_if_not_empty().ok_or(Empty)
    }

    /// Appends `value` without checking for a free slot.
    ///
    /// # Safety
    ///
    /// The queue must not be full. This is only checked with debug assertions enabled;
    /// otherwise the oldest element is overwritten and the queue's bookkeeping is corrupted.
    pub unsafe fn enqueue_unchecked(&mut self, value: T) {
        debug_assert!(!self.is_full(), "enqueue on a full queue");
        let index = self.tail_index();
        // SAFETY: `tail_index` is reduced modulo the storage length
        unsafe { *self.storage.get_unchecked_mut(index) = value };
        self.advance_tail(1);
    }

    /// Removes and returns the oldest element without checking that there is one.
    ///
    /// # Safety
    ///
    /// The queue must not be empty. This is only checked with debug assertions enabled;
    /// otherwise a stale slot is returned and the queue's bookkeeping is corrupted.
    pub unsafe fn dequeue_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "dequeue on an empty queue");
        let index = self.head_index();
        // SAFETY: `head_index` is reduced modulo the storage length
        let value = unsafe { *self.storage.get_unchecked(index) };
        self.head = self.head.wrapping_add(1);
        value
    }
}

impl<T> Default for RingQueue<'_, T> {
    /// Creates a queue with no storage, which is always both empty and full.
    fn default() -> Self {
        Self::new(&mut [])
    }
}

impl<'a, T> From<&'a mut [T]> for RingQueue<'a, T> {
    fn from(storage: &'a mut [T]) -> Self {
        Self::new(storage)
    }
}

impl<'q, T> IntoIterator for &'q RingQueue<'_, T> {
    type Item = &'q T;
    type IntoIter = Iter<'q, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity())
            .field("elements", &self.iter())
            .finish()
    }
}

#[cfg(feature = "zeroize")]
impl<T: Zeroize> Zeroize for RingQueue<'_, T> {
    /// Zeroes out the whole storage and empties the queue.
    fn zeroize(&mut self) {
        self.storage.iter_mut().zeroize();
        self.clear();
    }
}
