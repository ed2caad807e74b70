use crate::screen::InstanceId;

/// Tracks which screen instance is currently shown to the user.
///
/// Only the navigation context writes to the tracker, and only from the UI
/// thread. Blur/focus delivery lives in [`crate::NavContext`], which owns the
/// views the notifications are delivered to.
#[derive(Debug, Default)]
pub struct FocusTracker {
    current: Option<InstanceId>,
    transitions: u64,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<InstanceId> {
        self.current
    }

    pub fn is_focused(&self, instance: InstanceId) -> bool {
        self.current == Some(instance)
    }

    /// Point the tracker at `next`, returning the instance it replaces.
    pub fn replace(&mut self, next: InstanceId) -> Option<InstanceId> {
        let previous = self.current.replace(next);
        if previous != Some(next) {
            self.transitions = self.transitions.saturating_add(1);
        }
        previous
    }

    /// Clear the tracker if `instance` is the focused one.
    pub fn release(&mut self, instance: InstanceId) -> bool {
        if self.current == Some(instance) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
