//! Per-category FIFO queues of pending edits

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::domain::model::{Category, EditRequest};

/// Pending edits grouped by category, each queue in submission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEditStore {
    queues: IndexMap<Category, VecDeque<EditRequest>>,
}

impl PendingEditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edit to the back of its category queue
    pub fn push(&mut self, request: EditRequest) {
        self.queues
            .entry(request.category)
            .or_default()
            .push_back(request);
    }

    /// True while any category queue is non-empty
    pub fn has_any(&self) -> bool {
        self.queues.values().any(|queue| !queue.is_empty())
    }

    /// Queued edits of one category, head first
    pub fn peek_category(&self, category: Category) -> Vec<&EditRequest> {
        self.queues
            .get(&category)
            .map(|queue| queue.iter().collect())
            .unwrap_or_default()
    }

    pub fn queue_len(&self, category: Category) -> usize {
        self.queues.get(&category).map_or(0, VecDeque::len)
    }

    /// Remove and return the oldest edit of a category
    pub fn dequeue_head(&mut self, category: Category) -> Option<EditRequest> {
        self.queues.get_mut(&category)?.pop_front()
    }

    /// Remove every edit of a category, preserving order
    pub fn drain_category(&mut self, category: Category) -> Vec<EditRequest> {
        self.queues
            .get_mut(&category)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Remove everything still queued, category by category
    pub fn drain_all(&mut self) -> Vec<EditRequest> {
        self.queues
            .values_mut()
            .flat_map(|queue| queue.drain(..))
            .collect()
    }

    /// Categories that currently have queued edits
    pub fn categories(&self) -> Vec<Category> {
        self.queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(category, _)| *category)
            .collect()
    }

    /// Total number of queued edits
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_any()
    }

    pub fn clear(&mut self) {
        self.queues.clear();
    }
}
