/// Returned by [`BinaryMinHeap::pop_min`] and [`BinaryMinHeap::peek_min`]
/// when the heap holds no entries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, thiserror::Error)]
#[error("pop or peek on an empty heap")]
pub struct EmptyHeap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeapEntry<P, T> {
    pub priority: P,
    pub payload: T,
}

/// Array-backed binary min-heap over `(priority, payload)` pairs.
///
/// - The root always holds a minimum priority.
/// - Entries with equal payloads may coexist; there is no decrease-key.
/// - When both children of a node share the same priority, sifting down
///   follows the left child, so pop order is reproducible.
#[derive(Clone, Debug)]
pub struct BinaryMinHeap<P, T> {
    data: Vec<HeapEntry<P, T>>,
}

impl<P, T> Default for BinaryMinHeap<P, T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<P: PartialOrd, T> BinaryMinHeap<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Array snapshot in heap layout: children of `i` live at `2i + 1` and
    /// `2i + 2`.
    pub fn as_slice(&self) -> &[HeapEntry<P, T>] {
        &self.data
    }

    pub fn push(&mut self, priority: P, payload: T) {
        self.data.push(HeapEntry { priority, payload });
        let last = self.data.len() - 1;
        self.sift_up(last);
    }

    pub fn peek_min(&self) -> Result<&HeapEntry<P, T>, EmptyHeap> {
        self.data.first().ok_or(EmptyHeap)
    }

    pub fn pop_min(&mut self) -> Result<HeapEntry<P, T>, EmptyHeap> {
        if self.data.is_empty() {
            return Err(EmptyHeap);
        }
        let root = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(root)
    }

    /// Drains the heap in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<HeapEntry<P, T>> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Ok(entry) = self.pop_min() {
            out.push(entry);
        }
        out
    }

    #[inline]
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[parent].priority > self.data[idx].priority {
                self.data.swap(parent, idx);
                idx = parent;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right < len && self.data[right].priority < self.data[left].priority {
                child = right;
            }

            if self.data[child].priority < self.data[idx].priority {
                self.data.swap(idx, child);
                idx = child;
            } else {
                break;
            }
        }
    }
}

impl<P: PartialOrd, T> Extend<(P, T)> for BinaryMinHeap<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for (priority, payload) in iter {
            self.push(priority, payload);
        }
    }
}

impl<P: PartialOrd, T> FromIterator<(P, T)> for BinaryMinHeap<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
