//! Navigation lifecycle audit trail.
//!
//! The navigation core reports every structural transition (navigator
//! registration, screen materialization and teardown, focus changes, dropped
//! commands) to a [`NavAudit`] sink. The default sink discards everything;
//! tests and debugging tools install a recording sink instead.

use std::time::SystemTime;

use serde_json::Value;

/// Distinct lifecycle checkpoints emitted by the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAuditStage {
    /// A navigator was inserted into the arena (or re-keyed).
    NavigatorRegistered,
    /// A navigator was destroyed and its arena slot released.
    NavigatorDestroyed,
    /// A screen instance created its view or nested navigator.
    ScreenMaterialized,
    /// A screen instance was attached to a layout region.
    ScreenBound,
    /// A screen instance released everything it owned.
    ScreenDestroyed,
    /// The globally focused screen changed.
    FocusChanged,
    /// A stack dropped its oldest entry to stay within the depth bound.
    StackEvicted,
    /// A best-effort command could not be delivered.
    CommandDropped,
}

#[derive(Debug, Clone)]
pub struct NavAuditEvent {
    pub timestamp: SystemTime,
    pub stage: NavAuditStage,
    pub details: Vec<(String, Value)>,
}

impl NavAuditEvent {
    pub fn new(stage: NavAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Look up a detail by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

pub trait NavAudit: Send + Sync {
    fn record(&self, event: NavAuditEvent);
}

#[derive(Debug, Default)]
pub struct NullNavAudit;

impl NavAudit for NullNavAudit {
    fn record(&self, _event: NavAuditEvent) {}
}
