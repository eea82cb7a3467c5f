use core::iter::FusedIterator;
use core::{fmt, slice};

/// Front-to-back iterator over the elements of a [`RingQueue`](crate::RingQueue).
///
/// Created by [`RingQueue::iter`](crate::RingQueue::iter).
pub struct Iter<'q, T> {
    front: slice::Iter<'q, T>,
    back: slice::Iter<'q, T>,
}

impl<'q, T> Iter<'q, T> {
    pub(crate) fn new(front: &'q [T], back: &'q [T]) -> Self {
        Self {
            front: front.iter(),
            back: back.iter(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'q, T> Iterator for Iter<'q, T> {
    type Item = &'q T;

    fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.back.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.back.next_back().or_else(|| self.front.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
