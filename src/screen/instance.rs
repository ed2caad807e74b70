use std::fmt;
use std::rc::Rc;

use serde_json::json;

use crate::audit::{NavAuditEvent, NavAuditStage};
use crate::context::NavContext;
use crate::embedded::{EmbeddedEvent, RootViewProps};
use crate::error::{Misuse, fail_fast};
use crate::geometry::Size;
use crate::logging::{LogLevel, json_kv};
use crate::navigator::{NavigatorCore, NavigatorHandle};
use crate::registry::{NativeViewFactory, NavigatorFactory, ScreenDescriptor, ScreenKind};
use crate::view::{LayoutId, ViewId};

const LOG_TARGET: &str = "nav::screen";
const OPTIONS_PROP: &str = "navigationScreenOptions";

/// Identifier of one screen instance, also used as the embedded view id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen-{}", self.0)
    }
}

/// What an instance created on its first bind. It owns it until destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    Embedded(ViewId),
    Native(ViewId),
    Navigator(NavigatorHandle),
}

/// A screen occupying one navigation slot.
///
/// Instances are never shared between slots. The view or navigator behind an
/// instance is created lazily on the first [`bind`](Self::bind) and released
/// exactly once by [`destroy`](Self::destroy).
#[derive(Debug)]
pub struct ScreenInstance {
    id: InstanceId,
    descriptor: Rc<ScreenDescriptor>,
    materialized: Option<Materialized>,
    options: Option<String>,
    destroyed: bool,
}

impl ScreenInstance {
    pub(crate) fn new(id: InstanceId, descriptor: Rc<ScreenDescriptor>) -> Self {
        Self {
            id,
            descriptor,
            materialized: None,
            options: None,
            destroyed: false,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn screen_type(&self) -> &str {
        self.descriptor.screen_type()
    }

    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    pub fn materialized(&self) -> Option<Materialized> {
        self.materialized
    }

    /// The view this instance shows, for component and native screens.
    pub fn view(&self) -> Option<ViewId> {
        match self.materialized {
            Some(Materialized::Embedded(view)) | Some(Materialized::Native(view)) => Some(view),
            _ => None,
        }
    }

    pub fn nested_navigator(&self) -> Option<NavigatorHandle> {
        match self.materialized {
            Some(Materialized::Navigator(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Materialize on first use, then attach into `layout` (`None` is the
    /// window root) on behalf of `owner`.
    pub fn bind(
        &mut self,
        cx: &mut NavContext,
        owner: &NavigatorCore,
        layout: Option<LayoutId>,
        size: Size,
        depth: usize,
    ) {
        cx.assert_ui_thread();
        if self.destroyed {
            fail_fast(Misuse::BindDestroyedInstance(self.id.to_string()));
        }

        let descriptor = Rc::clone(&self.descriptor);
        match descriptor.kind() {
            ScreenKind::Component(component) => {
                self.bind_component(cx, owner, component, layout, size, depth)
            }
            ScreenKind::NativeView(factory) => self.bind_native(cx, factory, layout, size),
            ScreenKind::Navigator(factory) => self.bind_navigator(cx, factory, layout, size),
        }

        cx.metrics_mut().record_bind();
        cx.audit(
            NavAuditEvent::new(NavAuditStage::ScreenBound)
                .detail("instance", self.id.to_string())
                .detail("screen_type", self.screen_type())
                .detail("navigator", owner.id())
                .detail("depth", depth),
        );
    }

    fn bind_component(
        &mut self,
        cx: &mut NavContext,
        owner: &NavigatorCore,
        component: &str,
        layout: Option<LayoutId>,
        size: Size,
        depth: usize,
    ) {
        let focusing = cx.begin_focus(self.id);

        // A fresh mount is the component's initial focus.
        let (view, notify) = match self.materialized {
            Some(Materialized::Embedded(view)) => (view, true),
            _ => {
                let view = cx.views_mut().insert_embedded(self.id, component);
                let props = RootViewProps {
                    component_id: self.id.to_string(),
                    view_id: self.id.to_string(),
                    navigator_id: owner.id().to_string(),
                    stack_depth: depth,
                    navigation_screen_options: self.options.clone(),
                };
                cx.embedded_mut().mount(component, &props);
                self.materialized = Some(Materialized::Embedded(view));
                self.record_materialized(cx);
                (view, false)
            }
        };

        cx.embedded_mut().resize(self.id, size);
        if focusing {
            cx.finish_focus(self.id, notify);
        }
        cx.views_mut().set_content(layout, view);
    }

    fn bind_native(
        &mut self,
        cx: &mut NavContext,
        factory: &NativeViewFactory,
        layout: Option<LayoutId>,
        size: Size,
    ) {
        let focusing = cx.begin_focus(self.id);

        let view = match self.materialized {
            Some(Materialized::Native(view)) => view,
            _ => {
                let native = factory(cx);
                let view = cx.views_mut().insert_native(self.id, native);
                self.materialized = Some(Materialized::Native(view));
                self.record_materialized(cx);
                view
            }
        };

        if let Some(native) = cx.views_mut().native_mut(view) {
            native.resize(size);
        }
        if focusing {
            cx.finish_focus(self.id, true);
        }
        cx.views_mut().set_content(layout, view);
    }

    fn bind_navigator(
        &mut self,
        cx: &mut NavContext,
        factory: &NavigatorFactory,
        layout: Option<LayoutId>,
        size: Size,
    ) {
        let handle = match self.materialized {
            Some(Materialized::Navigator(handle)) => handle,
            _ => {
                let navigator = factory(cx);
                let handle = cx.register_navigator(navigator);
                self.materialized = Some(Materialized::Navigator(handle));
                self.record_materialized(cx);
                handle
            }
        };

        let bound = cx.with_navigator(handle, |navigator, cx| {
            navigator.bind_views(cx, layout, size);
        });
        if bound.is_none() {
            cx.log(
                LogLevel::Warn,
                LOG_TARGET,
                "nested_navigator_unavailable",
                [json_kv("instance", json!(self.id.to_string()))],
            );
        }
    }

    fn record_materialized(&self, cx: &mut NavContext) {
        cx.audit(
            NavAuditEvent::new(NavAuditStage::ScreenMaterialized)
                .detail("instance", self.id.to_string())
                .detail("screen_type", self.screen_type())
                .detail("kind", self.descriptor.kind().label()),
        );
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "screen_materialized",
            [
                json_kv("instance", json!(self.id.to_string())),
                json_kv("screen_type", json!(self.screen_type())),
            ],
        );
    }

    /// Replace the options payload. `None` keeps the current one.
    ///
    /// A mounted component receives the payload as a live prop update;
    /// otherwise it is handed over at mount time.
    pub fn set_options(&mut self, cx: &mut NavContext, options: Option<String>) {
        let Some(options) = options else {
            return;
        };
        if self.destroyed {
            cx.log(
                LogLevel::Debug,
                LOG_TARGET,
                "options_dropped",
                [json_kv("instance", json!(self.id.to_string()))],
            );
            return;
        }

        if let Some(Materialized::Embedded(_)) = self.materialized {
            cx.embedded_mut().emit(&EmbeddedEvent::NavigationProp {
                component_id: self.id,
                key: OPTIONS_PROP.to_string(),
                value: options.clone(),
            });
        }
        self.options = Some(options);
    }

    /// Let the nested navigator, if any, consume a back press.
    pub fn delegate_back(&self, cx: &mut NavContext) -> bool {
        self.nested_navigator()
            .and_then(|handle| cx.with_navigator(handle, |navigator, cx| navigator.handle_back(cx)))
            .unwrap_or(false)
    }

    pub fn delegate_pop_to_top(&self, cx: &mut NavContext) -> bool {
        self.nested_navigator()
            .and_then(|handle| cx.with_navigator(handle, |navigator, cx| navigator.pop_to_top(cx)))
            .unwrap_or(false)
    }

    pub fn delegate_destroy_views(&self, cx: &mut NavContext) {
        if let Some(handle) = self.nested_navigator() {
            cx.with_navigator(handle, |navigator, cx| navigator.destroy_views(cx));
        }
    }

    /// Release everything this instance owns. Safe to call repeatedly and
    /// before any bind.
    pub fn destroy(&mut self, cx: &mut NavContext) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        cx.release_focus(self.id);
        match self.materialized.take() {
            Some(Materialized::Embedded(view)) => {
                cx.embedded_mut().unmount(self.id);
                cx.views_mut().remove(view);
            }
            Some(Materialized::Native(view)) => {
                cx.views_mut().remove(view);
            }
            Some(Materialized::Navigator(handle)) => cx.destroy_navigator(handle),
            None => {}
        }

        cx.metrics_mut().record_instance_destroyed();
        cx.audit(
            NavAuditEvent::new(NavAuditStage::ScreenDestroyed)
                .detail("instance", self.id.to_string())
                .detail("screen_type", self.screen_type()),
        );
    }
}
