//! Bounded selection queue for display layers that let users pick persons
//! to compare. Owned by the caller; the graph never holds selection state.

use std::collections::VecDeque;

/// Outcome of [`SelectionQueue::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange<T> {
    /// The item was added; `evicted` is the oldest item pushed out when full.
    Selected { evicted: Option<T> },
    /// The item was already selected and has been removed.
    Deselected(T),
}

/// Fixed-capacity FIFO of selected items, oldest first.
#[derive(Debug, Clone)]
pub struct SelectionQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> SelectionQueue<T> {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Selected items, oldest first.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Deselect `item` if it is selected, otherwise select it.
    pub fn toggle(&mut self, item: T) -> SelectionChange<T> {
        if let Some(pos) = self.items.iter().position(|i| *i == item) {
            let removed = self.items.remove(pos).unwrap_or(item);
            return SelectionChange::Deselected(removed);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        SelectionChange::Selected { evicted }
    }

    /// The two most recent selections, in selection order.
    pub fn pair(&self) -> Option<(&T, &T)> {
        let n = self.items.len();
        if n < 2 {
            return None;
        }
        Some((&self.items[n - 2], &self.items[n - 1]))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
