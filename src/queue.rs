use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Derivative)]
#[derivative(
    PartialEq(bound = ""),
    Eq(bound = ""),
    PartialOrd(bound = ""),
    Ord(bound = "")
)]
struct Entry<T> {
    weight: usize,

    // insertion order, breaks ties between equal weights
    seq: u64,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    item: T,
}

/// Min-priority queue keyed on weight, first-in first-out among equal weights.
#[derive(Debug)]
pub(crate) struct MergeQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> MergeQueue<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub(crate) fn push(&mut self, weight: usize, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { weight, seq, item }));
    }

    pub(crate) fn pop(&mut self) -> Option<(usize, T)> {
        self.heap.pop().map(|Reverse(e)| (e.weight, e.item))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
