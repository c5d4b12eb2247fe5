//! Frontier containers for the search algorithms.
//!
//! [`Queue`] and [`Stack`] are thin wrappers that make the discipline explicit
//! at the call site. [`PriorityQueue`] is an indexed binary min-heap: a side
//! map from key to heap slot lets `update` change an entry in place, so a key
//! is never present twice.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::hash::Hash;

/// First in, first out.
#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Last in, first out.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    priority: f64,
    seq: u64,
}

impl<K, V> Entry<K, V> {
    /// Lower priority first, then earlier insertion.
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-priority queue with at most one live entry per key.
#[derive(Debug, Clone)]
pub struct PriorityQueue<K, V> {
    heap: Vec<Entry<K, V>>,
    slots: FxHashMap<K, usize>,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash, V> PriorityQueue<K, V> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: Vec::new(),
            slots: FxHashMap::default(),
            next_seq: 0,
        }
    }

    /// Inserts a new entry. A key that is already queued is updated instead.
    pub fn push(&mut self, key: K, value: V, priority: f64) {
        if self.slots.contains_key(&key) {
            self.update(key, value, priority);
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let slot = self.heap.len();
        self.heap.push(Entry {
            key,
            value,
            priority,
            seq,
        });
        self.slots.insert(key, slot);
        self.sift_up(slot);
    }

    /// Replaces the value and priority of a queued key, keeping its place in
    /// insertion order. Inserts when the key is not queued.
    ///
    /// The new priority may be lower or higher than the old one and the heap
    /// is repaired in either direction. The best-first searches only ever
    /// lower it.
    pub fn update(&mut self, key: K, value: V, priority: f64) {
        let Some(&slot) = self.slots.get(&key) else {
            self.push(key, value, priority);
            return;
        };

        let entry = &mut self.heap[slot];
        let previous = entry.priority;
        entry.value = value;
        entry.priority = priority;
        match priority.total_cmp(&previous) {
            Ordering::Less => self.sift_up(slot),
            Ordering::Greater => self.sift_down(slot),
            Ordering::Equal => {}
        }
    }

    /// Removes the entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(K, V, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.value, entry.priority))
    }

    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.first().map(|entry| entry.priority)
    }

    pub fn priority_of(&self, key: &K) -> Option<f64> {
        self.slots.get(key).map(|&slot| self.heap[slot].priority)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].key, a);
        self.slots.insert(self.heap[b].key, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].cmp_rank(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].cmp_rank(&self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.heap[right].cmp_rank(&self.heap[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

impl<K: Copy + Eq + Hash, V> Default for PriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut queue = Queue::new();
        for i in 0..4 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 4);
        let drained: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn stack_is_lifo() {
        let mut stack = Stack::new();
        for i in 0..4 {
            stack.push(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| stack.pop()).collect();
        assert_eq!(drained, vec![3, 2, 1, 0]);
        assert!(stack.is_empty());
    }

    #[test]
    fn pops_in_priority_order() {
        let mut pq = PriorityQueue::new();
        for (key, priority) in [(1, 5.0), (2, 1.5), (3, 3.0), (4, 0.5), (5, 4.0)] {
            pq.push(key, key * 10, priority);
        }
        let keys: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(k, _, _)| k).collect();
        assert_eq!(keys, vec![4, 2, 3, 5, 1]);
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut pq = PriorityQueue::new();
        for key in [7, 3, 9, 1, 5, 2] {
            pq.push(key, (), 1.0);
        }
        let keys: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(k, _, _)| k).collect();
        assert_eq!(keys, vec![7, 3, 9, 1, 5, 2]);
    }

    #[test]
    fn update_reduces_key_without_duplicating() {
        let mut pq = PriorityQueue::new();
        pq.push('a', "old", 5.0);
        pq.push('b', "b", 3.0);
        pq.update('a', "new", 1.0);

        assert_eq!(pq.len(), 2);
        assert_eq!(pq.priority_of(&'a'), Some(1.0));
        assert_eq!(pq.pop(), Some(('a', "new", 1.0)));
        assert_eq!(pq.pop(), Some(('b', "b", 3.0)));
        assert_eq!(pq.pop(), None);
    }

    #[test]
    fn update_can_raise_priority() {
        let mut pq = PriorityQueue::new();
        pq.push(1, (), 1.0);
        pq.push(2, (), 2.0);
        pq.push(3, (), 3.0);
        pq.update(1, (), 10.0);
        let keys: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(k, _, _)| k).collect();
        assert_eq!(keys, vec![2, 3, 1]);
    }

    #[test]
    fn update_inserts_missing_key_and_push_of_live_key_updates() {
        let mut pq = PriorityQueue::new();
        pq.update(1, "one", 2.0);
        assert!(pq.contains(&1));
        pq.push(1, "uno", 0.5);
        assert_eq!(pq.len(), 1);
        assert_eq!(pq.peek_priority(), Some(0.5));
        assert_eq!(pq.pop(), Some((1, "uno", 0.5)));
        assert!(!pq.contains(&1));
    }

    #[test]
    fn updated_entry_keeps_its_tie_break_position() {
        let mut pq = PriorityQueue::new();
        pq.push(1, (), 2.0);
        pq.push(2, (), 1.0);
        pq.push(3, (), 1.0);
        // Key 1 was inserted first, so it wins the tie once lowered.
        pq.update(1, (), 1.0);
        let keys: Vec<_> = std::iter::from_fn(|| pq.pop()).map(|(k, _, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn heap_stays_consistent_under_mixed_operations() {
        let mut pq = PriorityQueue::new();
        for key in 0..50u32 {
            pq.push(key, key, f64::from((key * 37) % 50));
        }
        for key in (0..50u32).step_by(3) {
            pq.update(key, key, f64::from(key) / 10.0);
        }
        let mut last = f64::NEG_INFINITY;
        let mut seen = 0;
        while let Some((_, _, priority)) = pq.pop() {
            assert!(priority >= last);
            last = priority;
            seen += 1;
        }
        assert_eq!(seen, 50);
    }
}
