use std::collections::VecDeque;

use crate::Component;

/// Snapshot history backing single-step undo, plus a bounded log of what each change did.
///
/// Snapshots are full copies of the component collection. The activity log is descriptive only
/// and is not touched by popping a snapshot.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: Vec<Vec<Component>>,
    activity: VecDeque<String>,
    log_capacity: usize,
}

impl HistoryStack {
    pub(crate) fn new(log_capacity: usize) -> Self {
        HistoryStack {
            snapshots: Vec::new(),
            activity: VecDeque::with_capacity(log_capacity),
            log_capacity,
        }
    }

    /// Pushes a copy of `components` and records `label`, dropping the oldest label once the log
    /// is over capacity.
    pub(crate) fn snapshot(&mut self, components: &[Component], label: String) {
        self.snapshots.push(components.to_vec());
        self.activity.push_back(label);
        while self.activity.len() > self.log_capacity {
            self.activity.pop_front();
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Vec<Component>> {
        self.snapshots.pop()
    }

    /// Number of snapshots available to undo.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// True when there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Labels of recent changes, oldest first.
    pub fn activity(&self) -> impl Iterator<Item = &str> {
        self.activity.iter().map(String::as_str)
    }

    /// Maximum number of labels kept in the activity log.
    pub fn log_capacity(&self) -> usize {
        self.log_capacity
    }
}
