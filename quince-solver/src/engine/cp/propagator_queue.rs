use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::HashSet;
use crate::engine::cp::propagation::PropagatorId;
use crate::quince_assert_moderate;

/// The queue of propagators awaiting a propagation run, ordered by their priority class. A
/// propagator is present at most once regardless of how many events enqueued it.
#[derive(Debug)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    present_propagators: HashSet<PropagatorId>,
    present_priorities: BinaryHeap<Reverse<u32>>,
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            present_propagators: HashSet::default(),
            present_priorities: BinaryHeap::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.present_propagators.is_empty()
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: u32) {
        quince_assert_moderate!((priority as usize) < self.queues.len());

        if !self.is_propagator_enqueued(propagator_id) {
            if self.queues[priority as usize].is_empty() {
                self.present_priorities.push(Reverse(priority));
            }
            self.queues[priority as usize].push_back(propagator_id);
            let _ = self.present_propagators.insert(propagator_id);
        }
    }

    /// Removes and returns the highest-priority propagator in the queue.
    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        quince_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_propagator_id = self.queues[top_priority]
            .pop_front()
            .expect("a present priority has a non-empty queue");

        let _ = self.present_propagators.remove(&next_propagator_id);

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        Some(next_propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            quince_assert_moderate!(!self.queues[priority as usize].is_empty());
            self.queues[priority as usize].clear();
        }
        self.present_propagators.clear();
    }

    fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.present_propagators.contains(&propagator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_from_an_empty_queue_returns_none() {
        let mut queue = PropagatorQueue::new(4);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn propagators_are_popped_in_priority_order() {
        let mut queue = PropagatorQueue::new(4);

        queue.enqueue_propagator(PropagatorId(0), 3);
        queue.enqueue_propagator(PropagatorId(1), 0);
        queue.enqueue_propagator(PropagatorId(2), 1);

        assert_eq!(queue.pop(), Some(PropagatorId(1)));
        assert_eq!(queue.pop(), Some(PropagatorId(2)));
        assert_eq!(queue.pop(), Some(PropagatorId(0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn enqueueing_twice_keeps_a_single_entry() {
        let mut queue = PropagatorQueue::new(2);

        queue.enqueue_propagator(PropagatorId(7), 1);
        queue.enqueue_propagator(PropagatorId(7), 1);

        assert_eq!(queue.pop(), Some(PropagatorId(7)));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn clear_empties_every_priority_class() {
        let mut queue = PropagatorQueue::new(3);

        queue.enqueue_propagator(PropagatorId(0), 0);
        queue.enqueue_propagator(PropagatorId(1), 2);

        queue.clear();

        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }
}
