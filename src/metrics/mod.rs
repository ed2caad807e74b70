use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters for navigation activity within one context.
#[derive(Debug, Default, Clone)]
pub struct NavMetrics {
    navigations: u64,
    pushes: u64,
    pops: u64,
    binds: u64,
    focus_changes: u64,
    instances_destroyed: u64,
    navigators_destroyed: u64,
    evictions: u64,
    commands_dropped: u64,
}

impl NavMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_navigation(&mut self) {
        self.navigations = self.navigations.saturating_add(1);
    }

    pub fn record_push(&mut self) {
        self.pushes = self.pushes.saturating_add(1);
    }

    pub fn record_pops(&mut self, count: usize) {
        self.pops = self.pops.saturating_add(count as u64);
    }

    pub fn record_bind(&mut self) {
        self.binds = self.binds.saturating_add(1);
    }

    pub fn record_focus_change(&mut self) {
        self.focus_changes = self.focus_changes.saturating_add(1);
    }

    pub fn record_instance_destroyed(&mut self) {
        self.instances_destroyed = self.instances_destroyed.saturating_add(1);
    }

    pub fn record_navigator_destroyed(&mut self) {
        self.navigators_destroyed = self.navigators_destroyed.saturating_add(1);
    }

    pub fn record_eviction(&mut self) {
        self.evictions = self.evictions.saturating_add(1);
    }

    pub fn record_dropped_command(&mut self) {
        self.commands_dropped = self.commands_dropped.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            navigations: self.navigations,
            pushes: self.pushes,
            pops: self.pops,
            binds: self.binds,
            focus_changes: self.focus_changes,
            instances_destroyed: self.instances_destroyed,
            navigators_destroyed: self.navigators_destroyed,
            evictions: self.evictions,
            commands_dropped: self.commands_dropped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub navigations: u64,
    pub pushes: u64,
    pub pops: u64,
    pub binds: u64,
    pub focus_changes: u64,
    pub instances_destroyed: u64,
    pub navigators_destroyed: u64,
    pub evictions: u64,
    pub commands_dropped: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("navigations".to_string(), json!(self.navigations));
        map.insert("pushes".to_string(), json!(self.pushes));
        map.insert("pops".to_string(), json!(self.pops));
        map.insert("binds".to_string(), json!(self.binds));
        map.insert("focus_changes".to_string(), json!(self.focus_changes));
        map.insert(
            "instances_destroyed".to_string(),
            json!(self.instances_destroyed),
        );
        map.insert(
            "navigators_destroyed".to_string(),
            json!(self.navigators_destroyed),
        );
        map.insert("evictions".to_string(), json!(self.evictions));
        map.insert("commands_dropped".to_string(), json!(self.commands_dropped));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "navigation_metrics", self.as_fields())
    }
}
