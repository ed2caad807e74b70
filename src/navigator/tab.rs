use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::context::NavContext;
use crate::error::{Misuse, fail_fast};
use crate::geometry::Size;
use crate::logging::{LogLevel, json_kv};
use crate::screen::ScreenInstance;
use crate::view::{LayoutId, ViewId};

use super::{Navigator, NavigatorCore, NavigatorKind};

const LOG_TARGET: &str = "nav::tab";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabBarPosition {
    Top,
    #[default]
    Bottom,
}

/// One sibling screen behind a tab-bar entry.
#[derive(Debug)]
pub struct Tab {
    title: String,
    icon: Option<String>,
    badge: Option<u32>,
    hidden: bool,
    screen: ScreenInstance,
}

impl Tab {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn badge(&self) -> Option<u32> {
        self.badge
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn screen(&self) -> &ScreenInstance {
        &self.screen
    }
}

/// Fixed set of sibling screens switched by a tab bar.
///
/// Tabs are appended until [`done_adding_tabs`](Self::done_adding_tabs).
/// Switching tabs detaches the previous tab's view without destroying it, so
/// every tab keeps its state for the lifetime of the navigator.
pub struct TabNavigator {
    core: NavigatorCore,
    tabs: Vec<Tab>,
    selected: usize,
    finalized: bool,
    position: TabBarPosition,
    tab_bar_height: u32,
    container: ViewId,
    content: LayoutId,
}

impl TabNavigator {
    pub fn new(cx: &mut NavContext) -> Self {
        let core = NavigatorCore::new(cx);
        let container = cx.views_mut().insert_chrome(format!("{}:tabs", core.id()));
        let content = cx.views_mut().create_layout(format!("{}:content", core.id()));
        Self {
            core,
            tabs: Vec::new(),
            selected: 0,
            finalized: false,
            position: TabBarPosition::default(),
            tab_bar_height: cx.settings().tab_bar_height,
            container,
            content,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.core.set_id(id);
        self
    }

    pub fn with_tab_bar_position(mut self, position: TabBarPosition) -> Self {
        self.position = position;
        self
    }

    /// Append a tab. Only legal before [`done_adding_tabs`](Self::done_adding_tabs).
    pub fn add_tab(
        &mut self,
        cx: &mut NavContext,
        screen_type: &str,
        title: &str,
        icon: Option<&str>,
    ) -> usize {
        if self.finalized {
            fail_fast(Misuse::TabsFinalized(self.core.id().to_string()));
        }
        self.tabs.push(Tab {
            title: title.to_string(),
            icon: icon.map(str::to_string),
            badge: None,
            hidden: false,
            screen: cx.resolve_screen(screen_type),
        });
        self.tabs.len() - 1
    }

    pub fn done_adding_tabs(&mut self) {
        if self.tabs.is_empty() {
            fail_fast(Misuse::NoTabs(self.core.id().to_string()));
        }
        self.finalized = true;
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn tab_bar_position(&self) -> TabBarPosition {
        self.position
    }

    pub fn content_layout(&self) -> LayoutId {
        self.content
    }

    /// Size of the region tabs render into: the navigator minus the tab bar.
    pub fn content_size(&self) -> Size {
        self.core.size().shrink_height(self.tab_bar_height)
    }

    pub fn visible_tab_count(&self) -> usize {
        self.tabs.iter().filter(|tab| !tab.hidden).count()
    }

    /// Switch to `index`, binding its screen if the navigator is on screen.
    pub fn select_tab(&mut self, cx: &mut NavContext, index: usize) {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return;
        }
        if self.tabs.get(index).is_none_or(|tab| tab.hidden) {
            fail_fast(Misuse::InvalidTab {
                navigator: self.core.id().to_string(),
                index,
            });
        }

        self.selected = index;
        if self.core.has_bound() {
            self.bind_selected(cx);
        }
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "tab_selected",
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("index", json!(index)),
                json_kv("screen_type", json!(self.tabs[index].screen.screen_type())),
            ],
        );
    }

    /// Show `badge` on a tab, or clear it with `None`.
    pub fn set_badge(&mut self, index: usize, badge: Option<u32>) -> bool {
        match self.tabs.get_mut(index) {
            Some(tab) => {
                tab.badge = badge;
                true
            }
            None => false,
        }
    }

    /// Hide or reveal a tab-bar entry.
    ///
    /// Hiding the selected tab moves the selection to the first visible tab.
    /// The last visible tab cannot be hidden.
    pub fn set_tab_hidden(&mut self, cx: &mut NavContext, index: usize, hidden: bool) -> bool {
        let Some(tab) = self.tabs.get(index) else {
            return false;
        };
        if tab.hidden == hidden {
            return true;
        }
        if hidden && self.visible_tab_count() == 1 {
            return false;
        }

        self.tabs[index].hidden = hidden;
        if hidden && index == self.selected {
            if let Some(next) = self.tabs.iter().position(|tab| !tab.hidden) {
                self.select_tab(cx, next);
            }
        }
        true
    }

    fn bind_selected(&mut self, cx: &mut NavContext) {
        let size = self.content_size();
        let content = self.content;
        if let Some(tab) = self.tabs.get_mut(self.selected) {
            tab.screen.bind(cx, &self.core, Some(content), size, 0);
        }
    }

    fn selected_screen(&self) -> Option<&ScreenInstance> {
        self.tabs.get(self.selected).map(|tab| &tab.screen)
    }
}

impl Navigator for TabNavigator {
    fn core(&self) -> &NavigatorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NavigatorCore {
        &mut self.core
    }

    fn kind(&self) -> NavigatorKind {
        NavigatorKind::Tab
    }

    fn current_screen(&self) -> Option<&ScreenInstance> {
        if self.core.is_destroyed() {
            return None;
        }
        self.selected_screen()
    }

    fn bind_views(&mut self, cx: &mut NavContext, layout: Option<LayoutId>, size: Size) {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return;
        }
        if !self.finalized {
            fail_fast(Misuse::TabsNotFinalized(self.core.id().to_string()));
        }
        self.core.record_bind(layout, size);
        self.core.set_content_view(cx, self.container);
        self.bind_selected(cx);
    }

    fn destroy_views(&mut self, cx: &mut NavContext) {
        for tab in &self.tabs {
            tab.screen.delegate_destroy_views(cx);
        }
    }

    fn destroy(&mut self, cx: &mut NavContext) {
        if !self.core.mark_destroyed() {
            return;
        }
        self.core.release_overlay(cx);
        for tab in &mut self.tabs {
            tab.screen.destroy(cx);
        }
        cx.views_mut().remove_layout(self.content);
        cx.views_mut().remove(self.container);
        cx.log(
            LogLevel::Debug,
            LOG_TARGET,
            "tabs_destroyed",
            [
                json_kv("navigator", json!(self.core.id())),
                json_kv("tabs", json!(self.tabs.len())),
            ],
        );
    }

    fn navigate(&mut self, _cx: &mut NavContext, _screen_type: &str, _options: Option<String>) {
        fail_fast(Misuse::NavigateOnTabNavigator(self.core.id().to_string()));
    }

    fn navigate_push(&mut self, _cx: &mut NavContext, _screen_type: &str, _options: Option<String>) {
        fail_fast(Misuse::NavigateOnTabNavigator(self.core.id().to_string()));
    }

    fn handle_back(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return false;
        }
        self.core.require_bound("handle_back");
        self.selected_screen()
            .is_some_and(|screen| screen.delegate_back(cx))
    }

    fn pop_to_top(&mut self, cx: &mut NavContext) -> bool {
        cx.assert_ui_thread();
        if self.core.is_destroyed() {
            return false;
        }
        self.core.require_bound("pop_to_top");
        self.selected_screen()
            .is_some_and(|screen| screen.delegate_pop_to_top(cx))
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
