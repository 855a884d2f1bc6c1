//! Array-backed binary min-heap.

use crate::error::{Error, Result};

/// Min-priority queue ordered by `T: Ord`.
///
/// Positions are 1-indexed in the heap arithmetic (parent of `k` is `k / 2`);
/// slot `k` lives at `items[k - 1]`.
#[derive(Debug, Clone)]
pub struct MinQueue<T> {
    items: Vec<T>,
}

impl<T: Ord> MinQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.swim(self.items.len());
    }

    /// Removes and returns the smallest item.
    pub fn extract_min(&mut self) -> Result<T> {
        let n = self.items.len();
        if n == 0 {
            return Err(Error::EmptyQueue);
        }

        self.items.swap(0, n - 1);
        let min = self.items.pop().ok_or(Error::EmptyQueue)?;
        self.sink(1);
        Ok(min)
    }

    fn greater(&self, i: usize, j: usize) -> bool {
        self.items[i - 1] > self.items[j - 1]
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.items.swap(k / 2 - 1, k - 1);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        let n = self.items.len();
        while 2 * k <= n {
            let mut j = 2 * k;
            if j < n && self.greater(j, j + 1) {
                j += 1;
            }
            if !self.greater(k, j) {
                break;
            }
            self.items.swap(k - 1, j - 1);
            k = j;
        }
    }
}

impl<T: Ord> Extend<T> for MinQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_from_empty() {
        let mut q: MinQueue<u32> = MinQueue::with_capacity(4);
        assert!(matches!(q.extract_min(), Err(Error::EmptyQueue)));
    }

    #[test]
    fn drains_in_order() {
        let mut q = MinQueue::with_capacity(16);
        q.extend([9, 3, 7, 1, 8, 2, 2, 6, 5, 4, 0]);
        assert_eq!(q.len(), 11);
        assert_eq!(q.peek(), Some(&0));

        let mut out = Vec::new();
        while !q.is_empty() {
            out.push(q.extract_min().unwrap());
        }
        assert_eq!(out, vec![0, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(matches!(q.extract_min(), Err(Error::EmptyQueue)));
    }

    #[test]
    fn interleaved_insert_extract() {
        let mut q = MinQueue::with_capacity(8);
        q.insert(5);
        q.insert(1);
        assert_eq!(q.extract_min().unwrap(), 1);
        q.insert(3);
        q.insert(0);
        assert_eq!(q.extract_min().unwrap(), 0);
        assert_eq!(q.extract_min().unwrap(), 3);
        assert_eq!(q.extract_min().unwrap(), 5);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_keys_follow_secondary_key() {
        let mut q = MinQueue::with_capacity(8);
        q.extend([(2, 'c'), (1, 'b'), (2, 'a'), (1, 'a')]);
        assert_eq!(q.extract_min().unwrap(), (1, 'a'));
        assert_eq!(q.extract_min().unwrap(), (1, 'b'));
        assert_eq!(q.extract_min().unwrap(), (2, 'a'));
        assert_eq!(q.extract_min().unwrap(), (2, 'c'));
    }
}
