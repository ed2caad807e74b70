use std::any::Any;

use serde_json::json;

use crate::context::NavContext;
use crate::geometry::Size;
use crate::logging::{LogLevel, json_kv};
use crate::screen::ScreenInstance;
use crate::view::LayoutId;

use super::{Navigator, NavigatorCore, NavigatorKind};

const LOG_TARGET: &str = "nav::swap";

/// Single-slot navigator for mutually exclusive modes.
///
/// Navigating destroys the current screen before the replacement binds, so
/// nothing of the old mode survives the switch.
pub struct SwapNavigator {
    core: NavigatorCore,
    current: Option<ScreenInstance>,
}

impl SwapNavigator {
    pub fn new(cx: &mut NavContext, screen_type: &str) -> Self {
        Self {
            core: NavigatorCore::new(cx),
            current: Some(cx.resolve_screen(screen_type)),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.core.set_id(id);
        self
    }

    fn bind_current(&mut self, cx: &mut NavContext) {
        let (layout, size) = (self.core.layout(), self.core.size());
        if let Some(screen) = self.current.as_mut() {
            screen.bind(cx, &self.core, layout, size, 0);
        }
    }

    fn swap_to(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>) {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            cx.log(
                LogLevel::Debug,
                LOG_TARGET,
                "destroyed_navigator_ignored",
                [json_kv("navigator", json!(self.core.id()))],
            );
            return;
        }
        self.core.require_bound("navigate");
        cx.metrics_mut().record_navigation();

        let previous = self.current.take();
        if let Some(mut previous) = previous {
            previous.destroy(cx);
        }

        let mut screen = cx.resolve_screen(screen_type);
        screen.set_options(cx, options);
        self.current = Some(screen);
        self.bind_current(cx);

        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "swap_navigate",
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("screen_type", json!(screen_type)),
            ],
        );
    }
}

impl Navigator for SwapNavigator {
    fn core(&self) -> &NavigatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NavigatorCore {
        &mut self.core
    }

    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Swap
    }

    fn current_screen(&self) -> Option<&ScreenInstance> {
        self.current.as_ref()
    }

    fn bind_views(&mut self, cx: &mut NavContext, layout: Option<LayoutId>, size: Size) {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return;
        }
        self.core.record_bind(layout, size);
        self.bind_current(cx);
    }

    fn destroy_views(&mut self, cx: &mut NavContext) {
        if let Some(screen) = self.current.as_ref() {
            screen.delegate_destroy_views(cx);
        }
    }

    fn destroy(&mut self, cx: &mut NavContext) {
        if !self.core.mark_destroyed() {
            return;
        }
        self.core.release_overlay(cx);
        if let Some(mut screen) = self.current.take() {
            screen.destroy(cx);
        }
    }

    fn navigate(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>) {
        self.swap_to(cx, screen_type, options);
    }

    fn navigate_push(&mut self, cx: &mut NavContext, screen_type: &str, options: Option<String>) {
        self.swap_to(cx, screen_type, options);
    }

    fn handle_back(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return false;
        }
        self.core.require_bound("handle_back");
        self.current
            .as_ref()
            .is_some_and(|screen| screen.delegate_back(cx))
    }

    fn pop_to_top(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return false;
        }
        self.core.require_bound("pop_to_top");
        self.current
            .as_ref()
            .is_some_and(|screen| screen.delegate_pop_to_top(cx))
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
