use bytes::buf::UninitSlice;
use bytes::{Buf, BufMut};

use crate::RingQueue;

impl Buf for RingQueue<'_, u8> {
    fn remaining(&self) -> usize {
        self.len()
    }

    fn chunk(&self) -> &[u8] {
        let (first, second) = self.as_slices();
        if !first.is_empty() { first } else { second }
    }

    fn advance(&mut self, cnt: usize) {
        self.consume(cnt);
    }
}

unsafe impl BufMut for RingQueue<'_, u8> {
    fn remaining_mut(&self) -> usize {
        RingQueue::remaining_mut(self)
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        self.commit(cnt)
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        let (first, second) = self.as_mut_slices();
        let slice = if !first.is_empty() { first } else { second };

        UninitSlice::new(slice)
    }
}
