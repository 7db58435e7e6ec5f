//! Time-ordered queue of pending effect removals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use super::EffectHandle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingExpiry {
    at: Duration,
    /// Tie-breaker so equal deadlines pop in scheduling order
    seq: u64,
    handle: EffectHandle,
}

/// Min-heap of `(deadline, handle)` polled once per tick
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    heap: BinaryHeap<Reverse<PendingExpiry>>,
    next_seq: u64,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `handle` for removal at `at`
    pub fn schedule(&mut self, at: Duration, handle: EffectHandle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(PendingExpiry { at, seq, handle }));
    }

    /// Pop the earliest entry whose deadline is at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<EffectHandle> {
        let due = matches!(self.heap.peek(), Some(Reverse(next)) if next.at <= now);
        if due {
            self.heap.pop().map(|Reverse(p)| p.handle)
        } else {
            None
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(p)| p.at)
    }

    /// Cancel every pending removal
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(slot: u32) -> EffectHandle {
        EffectHandle {
            slot,
            generation: 0,
        }
    }

    #[test]
    fn test_pops_in_deadline_order() {
        let mut queue = ExpiryQueue::new();
        queue.schedule(Duration::from_millis(900), handle(0));
        queue.schedule(Duration::from_millis(100), handle(1));
        queue.schedule(Duration::from_millis(500), handle(2));

        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(100)));

        let now = Duration::from_secs(1);
        let order: Vec<u32> = std::iter::from_fn(|| queue.pop_due(now))
            .map(|h| h.slot)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut queue = ExpiryQueue::new();
        queue.schedule(Duration::from_millis(500), handle(0));

        assert_eq!(queue.pop_due(Duration::from_millis(499)), None);
        assert_eq!(queue.pop_due(Duration::from_millis(500)), Some(handle(0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_pop_in_schedule_order() {
        let mut queue = ExpiryQueue::new();
        let at = Duration::from_millis(500);
        queue.schedule(at, handle(7));
        queue.schedule(at, handle(3));
        queue.schedule(at, handle(5));

        assert_eq!(queue.pop_due(at), Some(handle(7)));
        assert_eq!(queue.pop_due(at), Some(handle(3)));
        assert_eq!(queue.pop_due(at), Some(handle(5)));
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut queue = ExpiryQueue::new();
        queue.schedule(Duration::from_millis(1), handle(0));
        queue.schedule(Duration::from_millis(2), handle(1));
        queue.clear();
        assert_eq!(queue.pop_due(Duration::from_secs(10)), None);
        assert_eq!(queue.len(), 0);
    }
}
