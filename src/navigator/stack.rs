use std::any::Any;

use serde_json::json;

use crate::audit::{NavAuditEvent, NavAuditStage};
use crate::context::NavContext;
use crate::geometry::Size;
use crate::logging::{LogLevel, json_kv};
use crate::screen::ScreenInstance;
use crate::view::LayoutId;

use super::{Navigator, NavigatorCore, NavigatorKind};

const LOG_TARGET: &str = "nav::stack";

/// Push/pop history of screen instances.
///
/// The stack is seeded with one base screen and is never empty until it is
/// destroyed. The current index always points at the top entry.
pub struct StackNavigator {
    core: NavigatorCore,
    screens: Vec<ScreenInstance>,
    index: usize,
    max_depth: Option<usize>,
}

impl StackNavigator {
    pub fn new(cx: &mut NavContext, screen_type: &str) -> Self {
        let core = NavigatorCore::new(cx);
        let base = cx.resolve_screen(screen_type);
        Self {
            core,
            screens: vec![base],
            index: 0,
            max_depth: cx.settings().stack_bound(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.core.set_id(id);
        self
    }

    /// Override the configured depth bound. `None` keeps every entry.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth.map(|depth| depth.max(2));
        self
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn screens(&self) -> &[ScreenInstance] {
        &self.screens
    }

    pub fn screen_types(&self) -> Vec<&str> {
        self.screens.iter().map(ScreenInstance::screen_type).collect()
    }

    fn bind_current(&mut self, cx: &mut NavContext) {
        let (layout, size) = (self.core.layout(), self.core.size());
        let depth = self.index;
        if let Some(screen) = self.screens.get_mut(self.index) {
            screen.bind(cx, &self.core, layout, size, depth);
        }
    }

    /// Destroy every entry above `position`, top first.
    fn pop_above(&mut self, cx: &mut NavContext, position: usize) -> usize {
        let mut popped = 0;
        while self.screens.len() > position + 1 {
            if let Some(mut screen) = self.screens.pop() {
                screen.destroy(cx);
                popped += 1;
            }
        }
        self.index = self.screens.len().saturating_sub(1);
        if popped > 0 {
            cx.metrics_mut().record_pops(popped);
        }
        popped
    }

    fn push(&mut self, cx: &mut NavContext, screen: ScreenInstance) {
        self.screens.push(screen);
        if let Some(max_depth) = self.max_depth {
            while self.screens.len() > max_depth {
                self.evict_oldest(cx);
            }
        }
        self.index = self.screens.len() - 1;
    }

    fn evict_oldest(&mut self, cx: &mut NavContext) {
        let mut evicted = self.screens.remove(1);
        evicted.destroy(cx);
        cx.metrics_mut().record_eviction();
        cx.audit(
            NavAuditEvent::new(NavAuditStage::StackEvicted)
                .detail("navigator", self.core.id())
                .detail("instance", evicted.id().to_string())
                .detail("screen_type", evicted.screen_type()),
        );
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "stack_evicted",
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("screen_type", json!(evicted.screen_type())),
            ],
        );
    }

    fn ignore_destroyed(&self, cx: &mut NavContext, operation: &str) -> bool {
        if !self.core.is_destroyed() {
            return false;
        }
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "destroyed_navigator_ignored",
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("operation", json!(operation)),
            ],
        );
        true
    }

    fn log_transition(&self, cx: &mut NavContext, message: &str) {
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            message,
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("depth", json!(self.screens.len())),
                json_kv(
                    "top",
                    json!(self.current_screen().map(ScreenInstance::screen_type)),
                ),
            ],
        );
    }
}

impl Navigator for StackNavigator {
    fn core(&self) -> &NavigatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NavigatorCore {
        &mut self.core
    }

    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Stack
    }

    fn current_screen(&self) -> Option<&ScreenInstance> {
        if self.core.is_destroyed() {
            return None;
        }
        self.screens.get(self.index)
    }

    fn bind_views(&mut self, cx: &mut NavContext, layout: Option<LayoutId>, size: Size) {
        cx.assert_ui_thread();
        if self.ignore_destroyed(cx, "bind_views") {
            return;
        }
        self.core.record_bind(layout, size);
        self.bind_current(cx);
    }

    fn destroy_views(&mut self, cx: &mut NavContext) {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return;
        }
        self.pop_above(cx, 0);
        if let Some(base) = self.screens.first() {
            base.delegate_destroy_views(cx);
        }
        self.log_transition(cx, "stack_views_destroyed");
    }

    fn destroy(&mut self, cx: &mut NavContext) {
        if !self.core.mark_destroyed() {
            return;
        }
        self.core.release_overlay(cx);
        for mut screen in self.screens.drain(..).rev() {
            screen.destroy(cx);
        }
        self.index = 0;
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "stack_destroyed",
            [json_kv("navigator", json!(self.core.id()))],
        );
    }

    fn navigate(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>) {
        cx.assert_ui_thread();
        if self.ignore_destroyed(cx, "navigate") {
            return;
        }
        self.core.require_bound("navigate");
        cx.metrics_mut().record_navigation();

        let existing = self
            .screens
            .iter()
            .rposition(|screen| screen.screen_type() == screen_type);
        match existing {
            Some(position) => {
                self.pop_above(cx, position);
                self.screens[position].set_options(cx, options);
            }
            None => {
                let mut screen = cx.resolve_screen(screen_type);
                screen.set_options(cx, options);
                self.push(cx, screen);
            }
        }

        self.bind_current(cx);
        self.log_transition(cx, "stack_navigate");
    }

    fn navigate_push(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>) {
        cx.assert_ui_thread();
        if self.ignore_destroyed(cx, "navigate_push") {
            return;
        }
        self.core.require_bound("navigate_push");
        cx.metrics_mut().record_push();

        let mut screen = cx.resolve_screen(screen_type);
        screen.set_options(cx, options);
        self.push(cx, screen);

        self.bind_current(cx);
        self.log_transition(cx, "stack_push");
    }

    fn handle_back(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.ignore_destroyed(cx, "handle_back") {
            return false;
        }
        self.core.require_bound("handle_back");

        if self
            .screens
            .get(self.index)
            .is_some_and(|screen| screen.delegate_back(cx))
        {
            return true;
        }
        if self.index == 0 {
            return false;
        }

        self.pop_above(cx, self.index - 1);
        self.bind_current(cx);
        self.log_transition(cx, "stack_back");
        true
    }

    fn pop_to_top(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.ignore_destroyed(cx, "pop_to_top") {
            return false;
        }
        self.core.require_bound("pop_to_top");

        if self
            .screens
            .get(self.index)
            .is_some_and(|screen| screen.delegate_pop_to_top(cx))
        {
            return true;
        }
        if self.pop_above(cx, 0) == 0 {
            return false;
        }

        self.bind_current(cx);
        self.log_transition(cx, "stack_pop_to_top");
        true
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NavSettings;
    use crate::embedded::EmbeddedEvent;
    use crate::registry::ScreenDescriptor;
    use crate::test_support::{Harness, RuntimeCall};

    fn bound_stack(h: &mut Harness, base: &str) -> StackNavigator {
        let mut stack = StackNavigator::new(&mut h.cx, base);
        stack.bind_views(&mut h.cx, None, Size::new(360, 640));
        stack
    }

    #[test]
    fn navigate_collapses_to_existing_entry() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");

        stack.navigate(&mut h.cx, "A", None);
        let a = stack.current_screen().map(|s| s.id()).unwrap();
        stack.navigate(&mut h.cx, "B", None);
        let b = stack.current_screen().map(|s| s.id()).unwrap();
        stack.navigate(&mut h.cx, "A", None);

        assert_eq!(stack.screen_types(), vec!["Home", "A"]);
        assert_eq!(stack.current_screen().map(|s| s.id()), Some(a));
        assert_eq!(h.destroyed_count(b), 1);
        assert_eq!(h.destroyed_count(a), 0);
    }

    #[test]
    fn navigate_push_keeps_duplicates() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");

        stack.navigate_push(&mut h.cx, "Detail", None);
        stack.navigate_push(&mut h.cx, "Detail", None);

        let screens = stack.screens();
        assert_eq!(screens.len(), 3);
        assert_ne!(screens[1].id(), screens[2].id());
        assert!(screens.iter().all(|s| !s.is_destroyed()));
        assert_eq!(stack.index(), 2);
    }

    #[test]
    fn back_unwinds_one_level_at_a_time() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        for screen in ["One", "Two", "Three"] {
            stack.navigate_push(&mut h.cx, screen, None);
        }

        for _ in 0..3 {
            assert!(stack.handle_back(&mut h.cx));
        }
        assert_eq!(stack.screen_types(), vec!["Home"]);
        assert!(!stack.handle_back(&mut h.cx));
        assert_eq!(h.cx.views().content_of(None), stack.screens()[0].view());
    }

    #[test]
    fn destroy_twice_releases_each_instance_once() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        stack.navigate(&mut h.cx, "Profile", None);
        let ids: Vec<_> = stack.screens().iter().map(|s| s.id()).collect();

        stack.destroy(&mut h.cx);
        stack.destroy(&mut h.cx);

        for id in ids {
            assert_eq!(h.destroyed_count(id), 1);
        }
        assert!(stack.current_screen().is_none());
        assert_eq!(h.unmounted().len(), 2);
    }

    #[test]
    fn home_profile_home_scenario() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");

        stack.navigate(&mut h.cx, "Profile", None);
        assert_eq!(stack.screen_types(), vec!["Home", "Profile"]);
        assert_eq!(stack.index(), 1);
        let profile = stack.current_screen().map(|s| s.id()).unwrap();

        stack.navigate(&mut h.cx, "Home", None);
        assert_eq!(stack.screen_types(), vec!["Home"]);
        assert_eq!(stack.index(), 0);
        assert_eq!(h.destroyed_count(profile), 1);

        assert!(!stack.handle_back(&mut h.cx));
    }

    #[test]
    fn renavigating_current_screen_pushes_fresh_options() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        stack.navigate(&mut h.cx, "Deck", Some("{\"deckId\":\"a\"}".into()));
        let deck = stack.current_screen().map(|s| s.id()).unwrap();

        stack.navigate(&mut h.cx, "Deck", Some("{\"deckId\":\"b\"}".into()));

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current_screen().map(|s| s.id()), Some(deck));
        assert_eq!(
            stack.current_screen().and_then(|s| s.options()),
            Some("{\"deckId\":\"b\"}")
        );
        assert!(h.embedded_events().contains(&EmbeddedEvent::NavigationProp {
            component_id: deck,
            key: "navigationScreenOptions".into(),
            value: "{\"deckId\":\"b\"}".into(),
        }));
    }

    #[test]
    fn focus_moves_blur_first_and_pairs_on_back() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        let home = stack.current_screen().map(|s| s.id()).unwrap();

        stack.navigate(&mut h.cx, "Profile", None);
        let profile = stack.current_screen().map(|s| s.id()).unwrap();
        stack.handle_back(&mut h.cx);

        let calls: Vec<_> = h
            .runtime_calls()
            .into_iter()
            .filter(|call| !matches!(call, RuntimeCall::Resize(..)))
            .collect();
        let blur_home = calls
            .iter()
            .position(|c| *c == RuntimeCall::Emit(EmbeddedEvent::BlurView { view_id: home }))
            .unwrap();
        let mount_profile = calls
            .iter()
            .position(|c| matches!(c, RuntimeCall::Mount { component, .. } if component == "Profile"))
            .unwrap();
        assert!(blur_home < mount_profile);

        assert!(h.embedded_events().contains(&EmbeddedEvent::BlurView { view_id: profile }));
        assert!(h.embedded_events().contains(&EmbeddedEvent::FocusView { view_id: home }));
        assert_eq!(h.cx.focus().current(), Some(home));
    }

    #[test]
    fn depth_bound_evicts_oldest_above_base() {
        let mut h = Harness::with_settings(NavSettings {
            max_stack_depth: 3,
            ..NavSettings::default()
        });
        let mut stack = bound_stack(&mut h, "Home");

        stack.navigate_push(&mut h.cx, "One", None);
        let one = stack.current_screen().map(|s| s.id()).unwrap();
        stack.navigate_push(&mut h.cx, "Two", None);
        stack.navigate_push(&mut h.cx, "Three", None);

        assert_eq!(stack.screen_types(), vec!["Home", "Two", "Three"]);
        assert_eq!(stack.index(), 2);
        assert_eq!(h.destroyed_count(one), 1);
        assert_eq!(h.cx.metrics().snapshot().evictions, 1);
    }

    #[test]
    fn back_is_offered_to_nested_navigator_first() {
        let mut h = Harness::new();
        h.cx.register_screen(ScreenDescriptor::navigator("FeedStack", |cx| {
            Box::new(StackNavigator::new(cx, "Feed"))
        }));
        let mut stack = bound_stack(&mut h, "Home");
        stack.navigate(&mut h.cx, "FeedStack", None);
        let nested = stack
            .current_screen()
            .and_then(ScreenInstance::nested_navigator)
            .unwrap();
        let nested_id = h.cx.navigator(nested).map(|n| n.id().to_string()).unwrap();
        h.cx.with_navigator(nested, |navigator, cx| navigator.navigate(cx, "Post", None));

        assert!(stack.handle_back(&mut h.cx));
        assert_eq!(stack.depth(), 2);
        assert_eq!(
            h.cx.navigator(nested).and_then(|n| n.current_screen()).map(|s| s.screen_type()),
            Some("Feed")
        );

        assert!(stack.handle_back(&mut h.cx));
        assert_eq!(stack.depth(), 1);
        assert!(h.cx.navigator(nested).is_none());
        assert!(h.cx.find_navigator(&nested_id).is_none());
    }

    #[test]
    fn pop_to_top_clears_history_in_one_pass() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        stack.navigate_push(&mut h.cx, "One", None);
        stack.navigate_push(&mut h.cx, "Two", None);

        assert!(stack.pop_to_top(&mut h.cx));
        assert_eq!(stack.screen_types(), vec!["Home"]);
        assert_eq!(h.cx.metrics().snapshot().pops, 2);
        assert!(!stack.pop_to_top(&mut h.cx));
    }

    #[test]
    fn destroy_views_keeps_base_for_rebinding() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        stack.navigate_push(&mut h.cx, "One", None);
        stack.destroy_views(&mut h.cx);

        assert_eq!(stack.screen_types(), vec!["Home"]);
        stack.bind_views(&mut h.cx, None, Size::new(320, 480));
        assert_eq!(h.cx.views().content_of(None), stack.screens()[0].view());
    }

    #[test]
    fn navigate_after_destroy_is_a_noop() {
        let mut h = Harness::new();
        let mut stack = bound_stack(&mut h, "Home");
        stack.destroy(&mut h.cx);
        stack.navigate(&mut h.cx, "Profile", None);
        assert_eq!(stack.depth(), 0);
        assert!(h.log_messages().contains(&"destroyed_navigator_ignored".to_string()));
    }

    #[test]
    #[should_panic(expected = "received `navigate` before its first bind_views")]
    fn navigate_before_bind_fails_fast() {
        let mut h = Harness::new();
        let mut stack = StackNavigator::new(&mut h.cx, "Home");
        stack.navigate(&mut h.cx, "Profile", None);
    }
}
