//! Narrow interface to the embedded UI runtime.
//!
//! The navigation core asks the runtime to mount a root view for a component,
//! forwards focus/blur and live prop updates as named events, and unmounts the
//! root view when the owning screen is destroyed. Nothing flows back.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::geometry::Size;
use crate::screen::InstanceId;

/// Launch options handed to the runtime when a component root view mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootViewProps {
    pub component_id: String,
    pub view_id: String,
    pub navigator_id: String,
    pub stack_depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_screen_options: Option<String>,
}

/// Events pushed to the running embedded runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedEvent {
    FocusView { view_id: InstanceId },
    BlurView { view_id: InstanceId },
    NavigationProp {
        component_id: InstanceId,
        key: String,
        value: String,
    },
}

impl EmbeddedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EmbeddedEvent::FocusView { .. } => "onFocusView",
            EmbeddedEvent::BlurView { .. } => "onBlurView",
            EmbeddedEvent::NavigationProp { .. } => "navigationProp",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            EmbeddedEvent::FocusView { view_id } | EmbeddedEvent::BlurView { view_id } => {
                json!({ "viewId": view_id.to_string() })
            }
            EmbeddedEvent::NavigationProp {
                component_id,
                key,
                value,
            } => {
                let mut props = Map::new();
                props.insert(key.clone(), Value::String(value.clone()));
                json!({
                    "componentId": component_id.to_string(),
                    "props": props,
                })
            }
        }
    }
}

pub trait EmbeddedRuntime {
    fn mount(&mut self, component: &str, props: &RootViewProps);

    fn resize(&mut self, _instance: InstanceId, _size: Size) {}

    fn emit(&mut self, event: &EmbeddedEvent);

    fn unmount(&mut self, instance: InstanceId);
}

/// Runtime stand-in used when no embedded runtime is attached.
#[derive(Debug, Default)]
pub struct NullEmbeddedRuntime;

impl EmbeddedRuntime for NullEmbeddedRuntime {
    fn mount(&mut self, _component: &str, _props: &RootViewProps) {}

    fn emit(&mut self, _event: &EmbeddedEvent) {}

    fn unmount(&mut self, _instance: InstanceId) {}
}
