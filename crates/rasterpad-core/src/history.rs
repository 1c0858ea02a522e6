//! Bounded undo stack.

use std::collections::VecDeque;

/// One undo step: the canvas as it was before a gesture, plus how many
/// committed items the drawing held at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry<S> {
    pub snapshot: S,
    pub model_len: usize,
}

/// LIFO stack with a fixed capacity. Pushing past capacity evicts the
/// oldest entry from the bottom.
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> UndoStack<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push a new entry. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Put a previously evicted entry back at the bottom. Ignored when the
    /// stack is already full.
    pub fn restore_oldest(&mut self, entry: T) {
        if self.entries.len() < self.capacity {
            self.entries.push_front(entry);
        }
    }

    /// Pop the most recent entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = UndoStack::new(20);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut stack = UndoStack::new(20);
        for i in 1..=20 {
            assert_eq!(stack.push(i), None);
        }
        assert_eq!(stack.push(21), Some(1));
        assert_eq!(stack.len(), 20);
        assert_eq!(stack.peek(), Some(&21));
        assert_eq!(stack.iter().next(), Some(&2));
        assert!(!stack.iter().any(|&e| e == 1));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut stack = UndoStack::new(3);
        for i in 0..100 {
            stack.push(i);
            assert!(stack.len() <= 3);
        }
        let drained: Vec<_> = std::iter::from_fn(|| stack.pop()).collect();
        assert_eq!(drained, vec![99, 98, 97]);
    }

    #[test]
    fn test_restore_oldest_after_pop() {
        let mut stack = UndoStack::new(2);
        stack.push(1);
        stack.push(2);
        let evicted = stack.push(3).unwrap();
        assert_eq!(stack.pop(), Some(3));
        stack.restore_oldest(evicted);
        let drained: Vec<_> = std::iter::from_fn(|| stack.pop()).collect();
        assert_eq!(drained, vec![2, 1]);
    }

    #[test]
    fn test_restore_oldest_ignored_when_full() {
        let mut stack = UndoStack::new(1);
        stack.push(1);
        stack.restore_oldest(0);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::new(5);
        stack.push("a");
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut stack = UndoStack::new(0);
        assert_eq!(stack.capacity(), 1);
        stack.push(1);
        assert_eq!(stack.push(2), Some(1));
    }
}
