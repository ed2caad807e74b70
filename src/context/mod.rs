//! Process-wide navigation state.
//!
//! [`NavContext`] owns the screen registry, the navigator arena, the view
//! tree, the focus tracker and the embedded runtime binding. It is created once
//! on the UI thread and passed explicitly to every navigator call. The type is
//! `!Send`; cross-thread callers go through [`CommandSender`].

mod config;

use std::sync::Arc;
use std::thread::{self, ThreadId};

use serde_json::{Value, json};

pub use config::{LogFileSettings, NavConfig, NavSettings};

use crate::audit::{NavAudit, NavAuditEvent, NavAuditStage};
use crate::command::{CommandQueue, CommandSender, NavCommand};
use crate::embedded::{EmbeddedEvent, EmbeddedRuntime, NullEmbeddedRuntime};
use crate::error::{Misuse, NavError, Result, fail_fast};
use crate::focus::FocusTracker;
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::NavMetrics;
use crate::navigator::{CheckoutError, Navigator, NavigatorArena, NavigatorHandle, NavigatorKind};
use crate::registry::{ScreenDescriptor, ScreenRegistry};
use crate::screen::{InstanceId, ScreenInstance};
use crate::view::{ViewKind, ViewTree};

const LOG_TARGET: &str = "nav::context";

/// The thread a context was created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiThread {
    id: ThreadId,
}

impl UiThread {
    pub fn current() -> Self {
        Self {
            id: thread::current().id(),
        }
    }

    pub fn is_current(&self) -> bool {
        thread::current().id() == self.id
    }

    #[track_caller]
    pub fn assert_current(&self) {
        if !self.is_current() {
            fail_fast(Misuse::OffUiThread);
        }
    }
}

pub struct NavContext {
    settings: NavSettings,
    logger: Option<Logger>,
    audit: Arc<dyn NavAudit>,
    registry: ScreenRegistry,
    navigators: NavigatorArena,
    views: ViewTree,
    focus: FocusTracker,
    embedded: Box<dyn EmbeddedRuntime>,
    metrics: NavMetrics,
    ui_thread: UiThread,
    commands: CommandQueue,
    root: Option<NavigatorHandle>,
}

#[derive(Clone, Copy)]
enum FocusSignal {
    Focus,
    Blur,
}

impl NavContext {
    pub fn new(config: NavConfig) -> Self {
        Self::with_runtime(config, Box::new(NullEmbeddedRuntime))
    }

    pub fn with_runtime(config: NavConfig, embedded: Box<dyn EmbeddedRuntime>) -> Self {
        let NavConfig {
            settings,
            logger,
            audit,
        } = config;
        Self {
            settings,
            logger,
            audit,
            registry: ScreenRegistry::new(),
            navigators: NavigatorArena::new(),
            views: ViewTree::new(),
            focus: FocusTracker::new(),
            embedded,
            metrics: NavMetrics::new(),
            ui_thread: UiThread::current(),
            commands: CommandQueue::new(),
            root: None,
        }
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ScreenRegistry {
        &mut self.registry
    }

    pub fn views(&self) -> &ViewTree {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut ViewTree {
        &mut self.views
    }

    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn metrics(&self) -> &NavMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut NavMetrics {
        &mut self.metrics
    }

    pub fn embedded_mut(&mut self) -> &mut dyn EmbeddedRuntime {
        self.embedded.as_mut()
    }

    pub fn navigators(&self) -> &NavigatorArena {
        &self.navigators
    }

    pub fn navigators_mut(&mut self) -> &mut NavigatorArena {
        &mut self.navigators
    }

    pub fn ui_thread(&self) -> UiThread {
        self.ui_thread
    }

    #[track_caller]
    pub fn assert_ui_thread(&self) {
        self.ui_thread.assert_current();
    }

    pub fn register_screen(&mut self, descriptor: ScreenDescriptor) {
        let screen_type = descriptor.screen_type().to_string();
        let kind = descriptor.kind().label();
        let replaced = self.registry.register(descriptor).is_some();
        self.log(
            LogLevel::Debug,
            LOG_TARGET,
            "screen_registered",
            [
                json_kv("screen_type", json!(screen_type)),
                json_kv("kind", json!(kind)),
                json_kv("replaced", json!(replaced)),
            ],
        );
    }

    pub fn resolve_screen(&mut self, screen_type: &str) -> ScreenInstance {
        self.registry.resolve(screen_type)
    }

    /// Hand a navigator to the arena so it can be found by id.
    pub fn register_navigator(&mut self, navigator: Box<dyn Navigator>) -> NavigatorHandle {
        let id = navigator.id().to_string();
        let kind = navigator.kind();
        let handle = self.navigators.insert(navigator);
        self.audit(
            NavAuditEvent::new(NavAuditStage::NavigatorRegistered)
                .detail("navigator", id.as_str())
                .detail("kind", kind.to_string())
                .detail("handle", handle.to_string()),
        );
        self.log(
            LogLevel::Debug,
            LOG_TARGET,
            "navigator_registered",
            [
                json_kv("navigator", json!(id)),
                json_kv("kind", json!(kind.to_string())),
            ],
        );
        handle
    }

    /// Weak lookup by id. `None` for unknown or destroyed navigators.
    pub fn find_navigator(&self, id: &str) -> Option<NavigatorHandle> {
        self.navigators.lookup(id)
    }

    /// Borrow a resident navigator. `None` while it is stale or checked out.
    pub fn navigator(&self, handle: NavigatorHandle) -> Option<&dyn Navigator> {
        self.navigators.get(handle)
    }

    /// Re-key a registered navigator under `id`.
    pub fn rename_navigator(&mut self, handle: NavigatorHandle, id: &str) -> bool {
        let Some(navigator) = self.navigators.get_mut(handle) else {
            return false;
        };
        let previous = navigator.id().to_string();
        navigator.set_id(id);
        self.navigators.rename(handle, id);
        self.audit(
            NavAuditEvent::new(NavAuditStage::NavigatorRegistered)
                .detail("navigator", id)
                .detail("previous", previous)
                .detail("handle", handle.to_string()),
        );
        true
    }

    fn try_with_navigator<R>(
        &mut self,
        handle: NavigatorHandle,
        f: impl FnOnce(&mut dyn Navigator, &mut NavContext) -> R,
    ) -> std::result::Result<R, CheckoutError> {
        let mut navigator = self.navigators.checkout(handle)?;
        let result = f(navigator.as_mut(), self);
        if let Some(mut orphan) = self.navigators.restore(handle, navigator) {
            orphan.destroy(self);
        }
        Ok(result)
    }

    /// Run `f` against the navigator behind `handle`.
    ///
    /// The navigator is taken out of the arena for the duration of the call,
    /// so `f` may freely use the context, including other navigators. Returns
    /// `None` if the handle is stale or the navigator is already in use
    /// further up the call stack.
    pub fn with_navigator<R>(
        &mut self,
        handle: NavigatorHandle,
        f: impl FnOnce(&mut dyn Navigator, &mut NavContext) -> R,
    ) -> Option<R> {
        match self.try_with_navigator(handle, f) {
            Ok(result) => Some(result),
            Err(err) => {
                self.log(
                    LogLevel::Debug,
                    LOG_TARGET,
                    "navigator_unavailable",
                    [
                        json_kv("handle", json!(handle.to_string())),
                        json_kv("busy", json!(err == CheckoutError::Busy)),
                    ],
                );
                None
            }
        }
    }

    /// Like [`with_navigator`](Self::with_navigator), addressed by id.
    pub fn with_navigator_id<R>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut dyn Navigator, &mut NavContext) -> R,
    ) -> Result<R> {
        let handle = self
            .find_navigator(id)
            .ok_or_else(|| NavError::UnknownNavigator(id.to_string()))?;
        self.try_with_navigator(handle, f).map_err(|err| match err {
            CheckoutError::Busy => NavError::NavigatorBusy(id.to_string()),
            CheckoutError::Stale => NavError::UnknownNavigator(id.to_string()),
        })
    }

    /// Destroy the navigator behind `handle` and free its slot.
    pub fn destroy_navigator(&mut self, handle: NavigatorHandle) {
        if !self.navigators.is_live(handle) {
            return;
        }
        if self.root == Some(handle) {
            self.root = None;
        }
        let id = self
            .navigators
            .get(handle)
            .map(|navigator| navigator.id().to_string());
        if let Some(mut navigator) = self.navigators.release(handle) {
            navigator.destroy(self);
        }

        self.metrics.record_navigator_destroyed();
        self.audit(
            NavAuditEvent::new(NavAuditStage::NavigatorDestroyed)
                .detail("navigator", id)
                .detail("handle", handle.to_string()),
        );
    }

    /// Make `navigator` the window's root navigator, destroying any previous
    /// root.
    pub fn install_root(&mut self, navigator: Box<dyn Navigator>) -> NavigatorHandle {
        if let Some(previous) = self.root.take() {
            self.destroy_navigator(previous);
        }
        let handle = self.register_navigator(navigator);
        self.root = Some(handle);
        handle
    }

    pub fn root(&self) -> Option<NavigatorHandle> {
        self.root
    }

    /// Bind the root navigator to the window's root content.
    pub fn bind_root(&mut self, size: Size) {
        self.assert_ui_thread();
        let Some(root) = self.root else {
            return;
        };
        self.with_navigator(root, |navigator, cx| navigator.bind_views(cx, None, size));
        self.log(
            LogLevel::Info,
            LOG_TARGET,
            "root_bound",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
    }

    /// Platform back press. `false` means the platform default applies.
    pub fn handle_back(&mut self) -> bool {
        self.assert_ui_thread();
        self.root
            .and_then(|root| self.with_navigator(root, |navigator, cx| navigator.handle_back(cx)))
            .unwrap_or(false)
    }

    /// Destroy the root navigator and everything below it.
    pub fn teardown(&mut self) {
        self.assert_ui_thread();
        if let Some(root) = self.root.take() {
            self.destroy_navigator(root);
        }
        self.log_metrics();
    }

    /// Execute one command. Misses of the best-effort kind come back as errors.
    pub fn execute(&mut self, command: NavCommand) -> Result<bool> {
        self.assert_ui_thread();
        let name = command.name();
        let navigates = matches!(
            command,
            NavCommand::Navigate { .. } | NavCommand::NavigatePush { .. }
        );
        match command {
            NavCommand::Navigate {
                navigator_id,
                screen_type,
                options,
                fullscreen,
            } => {
                let target = match (&self.settings.fullscreen_navigator_id, fullscreen) {
                    (Some(fullscreen_id), true) => fullscreen_id.clone(),
                    _ => navigator_id,
                };
                self.with_command_target(&target, name, navigates, |navigator, cx| {
                    navigator.navigate(cx, &screen_type, options);
                    true
                })
            }
            NavCommand::NavigatePush {
                navigator_id,
                screen_type,
                options,
            } => self.with_command_target(&navigator_id, name, navigates, |navigator, cx| {
                navigator.navigate_push(cx, &screen_type, options);
                true
            }),
            NavCommand::Back { navigator_id } => {
                let target = navigator_id.unwrap_or_else(|| self.settings.root_navigator_id.clone());
                self.with_command_target(&target, name, navigates, |navigator, cx| {
                    navigator.handle_back(cx)
                })
            }
            NavCommand::PopToTop { navigator_id } => {
                let target = navigator_id.unwrap_or_else(|| self.settings.root_navigator_id.clone());
                self.with_command_target(&target, name, navigates, |navigator, cx| {
                    navigator.pop_to_top(cx)
                })
            }
        }
    }

    /// Resolve the target of a command. Navigators that would fail fast on it
    /// (unbound, or a tab navigator asked to navigate) are reported as misses.
    fn with_command_target<R>(
        &mut self,
        id: &str,
        command: &'static str,
        navigates: bool,
        f: impl FnOnce(&mut dyn Navigator, &mut NavContext) -> R,
    ) -> Result<R> {
        self.with_navigator_id(id, |navigator, cx| {
            let reason = if !navigator.core().has_bound() {
                Some("not bound yet")
            } else if navigates && navigator.kind() == NavigatorKind::Tab {
                Some("tab navigators only switch between their tabs")
            } else {
                None
            };
            match reason {
                Some(reason) => Err(NavError::NotNavigable {
                    navigator: navigator.id().to_string(),
                    command,
                    reason,
                }),
                None => Ok(f(navigator, cx)),
            }
        })?
    }

    /// Best-effort execution: misses are logged, counted and dropped.
    pub fn submit(&mut self, command: NavCommand) -> bool {
        let name = command.name();
        match self.execute(command) {
            Ok(handled) => handled,
            Err(err) => {
                self.record_dropped(name, &err);
                false
            }
        }
    }

    pub(crate) fn record_dropped(&mut self, command: &str, err: &NavError) {
        self.metrics.record_dropped_command();
        self.audit(
            NavAuditEvent::new(NavAuditStage::CommandDropped)
                .detail("command", command)
                .detail("reason", err.to_string()),
        );
        self.log(
            LogLevel::Warn,
            LOG_TARGET,
            "command_dropped",
            [
                json_kv("command", json!(command)),
                json_kv("reason", json!(err.to_string())),
            ],
        );
    }

    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    /// Execute every queued command. Returns how many were processed.
    pub fn drain_commands(&mut self) -> usize {
        self.assert_ui_thread();
        let mut processed = 0;
        while let Some(command) = self.commands.try_next() {
            self.submit(command);
            processed += 1;
        }
        processed
    }

    pub fn log_metrics(&self) {
        if let Some(logger) = &self.logger {
            let event = self
                .metrics
                .snapshot()
                .to_log_event(&self.settings.metrics_target);
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn log(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = &self.logger {
            if logger.enabled(level) {
                let _ = logger.log_event(event_with_fields(level, target, message, fields));
            }
        }
    }

    pub(crate) fn audit(&self, event: NavAuditEvent) {
        self.audit.record(event);
    }

    /// Start a focus transition towards `instance`.
    ///
    /// Returns `false` if it already holds focus. Otherwise the previous
    /// holder has been blurred and the caller must follow up with
    /// [`finish_focus`](Self::finish_focus) before attaching the view.
    pub(crate) fn begin_focus(&mut self, instance: InstanceId) -> bool {
        if self.focus.is_focused(instance) {
            return false;
        }
        let previous = self.focus.replace(instance);
        if let Some(previous) = previous {
            self.deliver(previous, FocusSignal::Blur);
        }
        self.metrics.record_focus_change();
        self.audit(
            NavAuditEvent::new(NavAuditStage::FocusChanged)
                .detail("from", previous.map(|id| id.to_string()))
                .detail("to", instance.to_string()),
        );
        true
    }

    pub(crate) fn finish_focus(&mut self, instance: InstanceId, notify: bool) {
        if notify {
            self.deliver(instance, FocusSignal::Focus);
        }
    }

    /// Blur `instance` if it holds focus, leaving nothing focused.
    pub(crate) fn release_focus(&mut self, instance: InstanceId) {
        if self.focus.release(instance) {
            self.deliver(instance, FocusSignal::Blur);
        }
    }

    fn deliver(&mut self, instance: InstanceId, signal: FocusSignal) {
        let Some(view) = self.views.view_for_instance(instance) else {
            return;
        };
        let embedded = matches!(self.views.kind(view), Some(ViewKind::Embedded { .. }));
        if embedded {
            let event = match signal {
                FocusSignal::Focus => EmbeddedEvent::FocusView { view_id: instance },
                FocusSignal::Blur => EmbeddedEvent::BlurView { view_id: instance },
            };
            self.embedded.emit(&event);
            return;
        }

        if let Some(listener) = self
            .views
            .native_mut(view)
            .and_then(|native| native.focus_listener())
        {
            match signal {
                FocusSignal::Focus => listener.on_focus(),
                FocusSignal::Blur => listener.on_blur(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::NavAuditStage;
    use crate::navigator::{StackNavigator, SwapNavigator, TabNavigator};
    use crate::test_support::Harness;

    fn rooted(h: &mut Harness) -> NavigatorHandle {
        let root = StackNavigator::new(&mut h.cx, "Home").with_id("Root");
        let handle = h.cx.install_root(Box::new(root));
        h.cx.bind_root(Size::new(360, 640));
        handle
    }

    #[test]
    fn execute_targets_navigator_by_id() {
        let mut h = Harness::new();
        rooted(&mut h);

        let handled = h
            .cx
            .execute(NavCommand::navigate("Root", "PlayDeck").with_options("{\"deckId\":\"d\"}"))
            .unwrap();
        assert!(handled);
        assert!(h.cx.execute(NavCommand::back()).unwrap());
        assert!(!h.cx.execute(NavCommand::back()).unwrap());
        assert_eq!(h.mounted_components(), vec!["Home", "PlayDeck"]);
    }

    #[test]
    fn unknown_navigator_is_a_best_effort_miss() {
        let mut h = Harness::new();
        rooted(&mut h);

        let err = h
            .cx
            .execute(NavCommand::navigate("LoggedInRootStack", "PlayDeck"))
            .unwrap_err();
        assert!(matches!(err, NavError::UnknownNavigator(id) if id == "LoggedInRootStack"));

        assert!(!h.cx.submit(NavCommand::navigate("LoggedInRootStack", "PlayDeck")));
        assert_eq!(h.cx.metrics().snapshot().commands_dropped, 1);
        assert_eq!(h.audit_stages().last(), Some(&NavAuditStage::CommandDropped));
        assert!(h.log_messages().contains(&"command_dropped".to_string()));
    }

    #[test]
    fn command_to_busy_navigator_is_reported() {
        let mut h = Harness::new();
        let root = rooted(&mut h);
        let result = h
            .cx
            .with_navigator(root, |_, cx| cx.execute(NavCommand::back()))
            .unwrap();
        assert!(matches!(result, Err(NavError::NavigatorBusy(id)) if id == "Root"));
    }

    #[test]
    fn commands_that_would_fail_fast_are_misses() {
        let mut h = Harness::new();
        let mut tabs = TabNavigator::new(&mut h.cx).with_id("Root");
        tabs.add_tab(&mut h.cx, "Feed", "Feed", None);
        tabs.done_adding_tabs();
        h.cx.install_root(Box::new(tabs));
        h.cx.bind_root(Size::new(360, 640));

        let err = h
            .cx
            .execute(NavCommand::navigate("Root", "Detail"))
            .unwrap_err();
        assert!(matches!(
            err,
            NavError::NotNavigable { ref navigator, command: "navigate", .. } if navigator == "Root"
        ));
        assert!(!h.cx.submit(NavCommand::navigate_push("Root", "Detail")));
        assert!(!h.cx.execute(NavCommand::back()).unwrap());

        let unbound = StackNavigator::new(&mut h.cx, "Home").with_id("Pending");
        h.cx.register_navigator(Box::new(unbound));
        assert!(!h.cx.submit(NavCommand::Back {
            navigator_id: Some("Pending".into()),
        }));

        assert_eq!(h.cx.metrics().snapshot().commands_dropped, 2);
        assert_eq!(h.mounted_components(), vec!["Feed"]);
        assert!(h.cx.find_navigator("Root").is_some());
        assert!(h.cx.execute(NavCommand::back()).is_ok());
    }

    #[test]
    fn ui_thread_is_enforced() {
        let ui = UiThread::current();
        ui.assert_current();
        let off_thread = std::thread::spawn(move || ui.assert_current()).join();
        assert!(off_thread.is_err());
    }

    #[test]
    fn fullscreen_commands_are_rerouted() {
        let mut h = Harness::with_settings(NavSettings {
            fullscreen_navigator_id: Some("Modal".into()),
            ..NavSettings::default()
        });
        rooted(&mut h);
        let mut modal = SwapNavigator::new(&mut h.cx, "Blank").with_id("Modal");
        modal.bind_views(&mut h.cx, None, Size::new(360, 640));
        let modal = h.cx.register_navigator(Box::new(modal));

        h.cx
            .execute(NavCommand::Navigate {
                navigator_id: "Root".into(),
                screen_type: "Viewer".into(),
                options: None,
                fullscreen: true,
            })
            .unwrap();

        let current = h
            .cx
            .navigator(modal)
            .and_then(|n| n.current_screen())
            .map(|s| s.screen_type().to_string());
        assert_eq!(current.as_deref(), Some("Viewer"));
    }

    #[test]
    fn queued_commands_drain_on_ui_thread() {
        let mut h = Harness::new();
        rooted(&mut h);
        let sender = h.cx.command_sender();
        std::thread::spawn(move || {
            sender.send(NavCommand::navigate_push("Root", "Detail"));
            sender.send(NavCommand::navigate_push("Missing", "Detail"));
        })
        .join()
        .unwrap();

        assert_eq!(h.cx.drain_commands(), 2);
        assert_eq!(h.cx.metrics().snapshot().commands_dropped, 1);
        assert_eq!(h.cx.metrics().snapshot().pushes, 1);
    }

    #[test]
    fn destroyed_navigator_is_no_longer_found() {
        let mut h = Harness::new();
        let root = rooted(&mut h);
        assert_eq!(h.cx.find_navigator("Root"), Some(root));

        h.cx.teardown();
        assert_eq!(h.cx.find_navigator("Root"), None);
        assert_eq!(h.cx.root(), None);
        assert!(!h.cx.submit(NavCommand::navigate("Root", "Home")));
        assert!(h.log_messages().contains(&"navigation_metrics".to_string()));
    }

    #[test]
    fn installing_a_new_root_destroys_the_old_one() {
        let mut h = Harness::new();
        let first = rooted(&mut h);
        let home = h
            .cx
            .navigator(first)
            .and_then(|n| n.current_screen())
            .map(|s| s.id())
            .unwrap();

        let next = SwapNavigator::new(&mut h.cx, "LoggedIn").with_id("Root");
        let second = h.cx.install_root(Box::new(next));
        h.cx.bind_root(Size::new(360, 640));

        assert!(h.cx.navigator(first).is_none());
        assert_eq!(h.destroyed_count(home), 1);
        assert_eq!(h.cx.find_navigator("Root"), Some(second));
    }

    #[test]
    fn rename_rekeys_lookup() {
        let mut h = Harness::new();
        let root = rooted(&mut h);
        assert!(h.cx.rename_navigator(root, "LoggedInRootStack"));
        assert_eq!(h.cx.find_navigator("Root"), None);
        assert_eq!(h.cx.find_navigator("LoggedInRootStack"), Some(root));
        assert_eq!(
            h.cx.navigator(root).map(|n| n.id()),
            Some("LoggedInRootStack")
        );
    }

    #[test]
    fn back_falls_through_at_root_base() {
        let mut h = Harness::new();
        assert!(!h.cx.handle_back());
        rooted(&mut h);
        assert!(!h.cx.handle_back());
    }

    #[test]
    fn focus_is_delegated_through_nested_tabs() {
        let mut h = Harness::new();
        h.cx.register_screen(ScreenDescriptor::navigator("Tabs", |cx| {
            let mut tabs = TabNavigator::new(cx);
            tabs.add_tab(cx, "Feed", "Feed", None);
            tabs.add_tab(cx, "History", "History", None);
            tabs.done_adding_tabs();
            Box::new(tabs)
        }));
        let root = StackNavigator::new(&mut h.cx, "Tabs").with_id("Root");
        h.cx.install_root(Box::new(root));
        h.cx.bind_root(Size::new(360, 640));

        let focused = h.cx.focus().current().unwrap();
        let feed = h.cx.views().view_for_instance(focused).unwrap();
        assert!(matches!(
            h.cx.views().kind(feed),
            Some(ViewKind::Embedded { component }) if component == "Feed"
        ));

        let tabs = h
            .cx
            .root()
            .and_then(|root| h.cx.navigator(root))
            .and_then(|root| root.current_screen())
            .and_then(ScreenInstance::nested_navigator)
            .unwrap();
        h.cx.with_navigator(tabs, |navigator, cx| {
            if let Some(tabs) = navigator.as_any_mut().downcast_mut::<TabNavigator>() {
                tabs.select_tab(cx, 1);
            }
        });
        assert_eq!(h.mounted_components(), vec!["Feed", "History"]);
        assert_ne!(h.cx.focus().current(), Some(focused));
    }
}
