//! Min-priority frontier with stable ordering for equal priorities.

use std::{cmp::Ordering, collections::BinaryHeap};

use tilepath_core::Cell;

/// Open set of discovered cells ordered by estimated total cost.
///
/// Improving a cell pushes a fresh entry instead of updating the old one; the
/// search discards outdated entries once the cell is finalised.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, cell: Cell, priority: f32) {
        self.heap.push(FrontierEntry {
            priority,
            sequence: self.next_sequence,
            cell,
        });
        self.next_sequence += 1;
    }

    /// Removes the entry with the lowest priority; among equals, the one
    /// pushed first.
    pub(crate) fn pop(&mut self) -> Option<Cell> {
        self.heap.pop().map(|entry| entry.cell)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of entries ever pushed.
    pub(crate) fn pushes(&self) -> u64 {
        self.next_sequence
    }
}

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    priority: f32,
    sequence: u64,
    cell: Cell,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lower priority and earlier sequence win.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}
