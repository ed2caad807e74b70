//! Recording doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::audit::{NavAudit, NavAuditEvent, NavAuditStage};
use crate::context::{NavConfig, NavContext, NavSettings};
use crate::embedded::{EmbeddedEvent, EmbeddedRuntime, RootViewProps};
use crate::geometry::Size;
use crate::logging::{BufferSink, LogEvent, Logger};
use crate::registry::ScreenDescriptor;
use crate::screen::InstanceId;
use crate::view::{FocusListener, NativeView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RuntimeCall {
    Mount {
        component: String,
        props: RootViewProps,
    },
    Resize(InstanceId, Size),
    Emit(EmbeddedEvent),
    Unmount(InstanceId),
}

type CallLog = Rc<RefCell<Vec<RuntimeCall>>>;

pub(crate) struct RecordingRuntime {
    calls: CallLog,
}

impl EmbeddedRuntime for RecordingRuntime {
    fn mount(&mut self, component: &str, props: &RootViewProps) {
        self.calls.borrow_mut().push(RuntimeCall::Mount {
            component: component.to_string(),
            props: props.clone(),
        });
    }

    fn resize(&mut self, instance: InstanceId, size: Size) {
        self.calls
            .borrow_mut()
            .push(RuntimeCall::Resize(instance, size));
    }

    fn emit(&mut self, event: &EmbeddedEvent) {
        self.calls.borrow_mut().push(RuntimeCall::Emit(event.clone()));
    }

    fn unmount(&mut self, instance: InstanceId) {
        self.calls.borrow_mut().push(RuntimeCall::Unmount(instance));
    }
}

#[derive(Default)]
pub(crate) struct RecordingAudit {
    events: Mutex<Vec<NavAuditEvent>>,
}

impl RecordingAudit {
    fn events(&self) -> Vec<NavAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl NavAudit for RecordingAudit {
    fn record(&self, event: NavAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

/// Native view that records its focus callbacks as `focus:<name>` and
/// `blur:<name>`.
pub(crate) struct ProbeView {
    name: String,
    calls: Rc<RefCell<Vec<String>>>,
}

impl NativeView for ProbeView {
    fn name(&self) -> &str {
        &self.name
    }

    fn focus_listener(&mut self) -> Option<&mut dyn FocusListener> {
        Some(self)
    }
}

impl FocusListener for ProbeView {
    fn on_focus(&mut self) {
        self.calls.borrow_mut().push(format!("focus:{}", self.name));
    }

    fn on_blur(&mut self) {
        self.calls.borrow_mut().push(format!("blur:{}", self.name));
    }
}

pub(crate) struct Harness {
    pub cx: NavContext,
    calls: CallLog,
    audit: Arc<RecordingAudit>,
    logs: BufferSink,
    probes: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(NavSettings::default())
    }

    pub fn with_settings(settings: NavSettings) -> Self {
        let calls = CallLog::default();
        let audit = Arc::new(RecordingAudit::default());
        let logs = BufferSink::new();
        let config = NavConfig::default()
            .with_settings(settings)
            .with_logger(Logger::new(logs.clone()))
            .with_audit(audit.clone());
        let runtime = RecordingRuntime {
            calls: Rc::clone(&calls),
        };
        Self {
            cx: NavContext::with_runtime(config, Box::new(runtime)),
            calls,
            audit,
            logs,
            probes: Rc::default(),
        }
    }

    pub fn runtime_calls(&self) -> Vec<RuntimeCall> {
        self.calls.borrow().clone()
    }

    pub fn embedded_events(&self) -> Vec<EmbeddedEvent> {
        self.runtime_calls()
            .into_iter()
            .filter_map(|call| match call {
                RuntimeCall::Emit(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn mounted_components(&self) -> Vec<String> {
        self.runtime_calls()
            .into_iter()
            .filter_map(|call| match call {
                RuntimeCall::Mount { component, .. } => Some(component),
                _ => None,
            })
            .collect()
    }

    pub fn unmounted(&self) -> Vec<InstanceId> {
        self.runtime_calls()
            .into_iter()
            .filter_map(|call| match call {
                RuntimeCall::Unmount(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// How many times `instance` reported its teardown.
    pub fn destroyed_count(&self, instance: InstanceId) -> usize {
        let wanted = json!(instance.to_string());
        self.audit
            .events()
            .iter()
            .filter(|event| event.stage == NavAuditStage::ScreenDestroyed)
            .filter(|event| event.get("instance") == Some(&wanted))
            .count()
    }

    pub fn audit_stages(&self) -> Vec<NavAuditStage> {
        self.audit.events().iter().map(|event| event.stage).collect()
    }

    pub fn log_messages(&self) -> Vec<String> {
        self.logs.messages()
    }

    pub fn log_events(&self) -> Vec<LogEvent> {
        self.logs.events()
    }

    /// Register `screen_type` as a native screen built from [`ProbeView`].
    pub fn probe_screen(&mut self, screen_type: &str) {
        let calls = Rc::clone(&self.probes);
        let name = screen_type.to_string();
        self.cx
            .register_screen(ScreenDescriptor::native_view(screen_type, move |_| {
                Box::new(ProbeView {
                    name: name.clone(),
                    calls: Rc::clone(&calls),
                })
            }));
    }

    pub fn probe_calls(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }
}
